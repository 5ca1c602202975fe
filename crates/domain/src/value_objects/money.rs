//! Money value object
//!
//! Amounts are whole cents in a signed 64-bit integer. No floating point is
//! involved anywhere, including fractional scaling.

use std::fmt;
use std::iter::Sum;
use std::num::NonZeroU32;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

const CENTS_PER_DOLLAR: i64 = 100;

/// An exact monetary amount in cents.
///
/// Serializes as a bare integer number of cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn of_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn of_dollars(dollars: i64) -> Self {
        Self(dollars * CENTS_PER_DOLLAR)
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Scale by an integer factor.
    pub fn multiply(self, factor: i64) -> Money {
        Money(self.0 * factor)
    }

    /// Scale by `numerator / denominator`, rounding half-up to the nearest cent.
    ///
    /// Half-up means ties round towards positive infinity, so `-2.5` cents
    /// becomes `-2` and `2.5` becomes `3`. Results beyond the `i64` range
    /// saturate.
    pub fn multiply_fraction(self, numerator: u32, denominator: NonZeroU32) -> Money {
        let product = i128::from(self.0) * i128::from(numerator);
        let denominator = i128::from(denominator.get());
        let rounded = (2 * product + denominator).div_euclid(2 * denominator);
        let cents = i64::try_from(rounded).unwrap_or(if rounded.is_negative() {
            i64::MIN
        } else {
            i64::MAX
        });
        Money(cents)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        self.multiply(rhs)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Formats as dollars with thousands separators, e.g. `$1,500.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let dollars = (abs / CENTS_PER_DOLLAR as u64).to_string();
        let cents = abs % CENTS_PER_DOLLAR as u64;

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, ch) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}${}.{:02}", sign, grouped, cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap()
    }

    #[test]
    fn test_of_dollars_is_cents() {
        assert_eq!(Money::of_dollars(15).cents(), 1500);
        assert_eq!(Money::of_cents(1500), Money::of_dollars(15));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::of_dollars(10);
        let b = Money::of_cents(250);
        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((b - a).cents(), -750);
        assert_eq!((b * 3).cents(), 750);
    }

    #[test]
    fn test_predicates() {
        assert!(Money::zero().is_zero());
        assert!(Money::of_cents(-1).is_negative());
        assert!(Money::of_cents(1).is_positive());
        assert!(!Money::zero().is_positive());
    }

    #[test]
    fn test_comparison() {
        assert!(Money::of_dollars(2) > Money::of_dollars(1));
        assert!(Money::of_dollars(1) >= Money::of_cents(100));
    }

    #[test]
    fn test_multiply_fraction_rounds_half_up() {
        // 150 * 1/2 = 75 exactly
        assert_eq!(Money::of_cents(150).multiply_fraction(1, nz(2)).cents(), 75);
        // 5 * 1/2 = 2.5 -> 3
        assert_eq!(Money::of_cents(5).multiply_fraction(1, nz(2)).cents(), 3);
        // -5 * 1/2 = -2.5 -> -2
        assert_eq!(Money::of_cents(-5).multiply_fraction(1, nz(2)).cents(), -2);
        // 3000 * 11/10 = 3300
        assert_eq!(Money::of_cents(3000).multiply_fraction(11, nz(10)).cents(), 3300);
        // 1 * 1/3 = 0.33 -> 0
        assert_eq!(Money::of_cents(1).multiply_fraction(1, nz(3)).cents(), 0);
    }

    #[test]
    fn test_multiply_fraction_saturates() {
        let max = Money::of_cents(i64::MAX).multiply_fraction(3, nz(2));
        assert_eq!(max.cents(), i64::MAX);
        let min = Money::of_cents(i64::MIN).multiply_fraction(3, nz(2));
        assert_eq!(min.cents(), i64::MIN);
    }

    #[test]
    fn test_checked_overflow() {
        assert!(Money::of_cents(i64::MAX).checked_add(Money::of_cents(1)).is_none());
        assert_eq!(
            Money::of_cents(5).checked_sub(Money::of_cents(3)),
            Some(Money::of_cents(2))
        );
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::of_dollars(1), Money::of_dollars(2)].into_iter().sum();
        assert_eq!(total, Money::of_dollars(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::of_dollars(1500).to_string(), "$1,500.00");
        assert_eq!(Money::of_cents(5).to_string(), "$0.05");
        assert_eq!(Money::of_cents(-12345).to_string(), "-$123.45");
        assert_eq!(Money::of_dollars(1_000_000).to_string(), "$1,000,000.00");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::of_dollars(2)).unwrap();
        assert_eq!(json, "200");
        let back: Money = serde_json::from_str("200").unwrap();
        assert_eq!(back, Money::of_dollars(2));
    }
}
