//! Engine configuration from environment variables.
//!
//! | Variable                      | Default            |
//! |-------------------------------|--------------------|
//! | `FORE_LOG_FILTER`             | `fore_engine=info` |
//! | `FORE_DEFAULT_NPC_DIFFICULTY` | `MEDIUM`           |
//! | `FORE_IDLE_LOCK_TTL_SECS`     | `3600`             |
//!
//! Unparseable values fall back to the default with a warning.

use std::time::Duration;

use fore_domain::Difficulty;

pub const LOG_FILTER_VAR: &str = "FORE_LOG_FILTER";
pub const DEFAULT_NPC_DIFFICULTY_VAR: &str = "FORE_DEFAULT_NPC_DIFFICULTY";
pub const IDLE_LOCK_TTL_VAR: &str = "FORE_IDLE_LOCK_TTL_SECS";

const DEFAULT_LOG_FILTER: &str = "fore_engine=info";
const DEFAULT_IDLE_LOCK_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// `tracing_subscriber::EnvFilter` directive string
    pub log_filter: String,
    /// Used when a game against the NPC is created without a difficulty
    pub default_npc_difficulty: Difficulty,
    /// Per-game locks unused for this long are evicted
    pub idle_lock_ttl: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            default_npc_difficulty: Difficulty::default(),
            idle_lock_ttl: Duration::from_secs(DEFAULT_IDLE_LOCK_TTL_SECS),
        }
    }
}

impl EngineSettings {
    /// Read settings from the process environment, after loading `.env` files.
    pub fn from_env() -> Self {
        load_dotenv_from_repo_root();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let log_filter = value(LOG_FILTER_VAR).unwrap_or(defaults.log_filter);

        let default_npc_difficulty = match value(DEFAULT_NPC_DIFFICULTY_VAR) {
            Some(raw) => raw.parse::<Difficulty>().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    fallback = %defaults.default_npc_difficulty,
                    "Invalid {}, using default",
                    DEFAULT_NPC_DIFFICULTY_VAR
                );
                defaults.default_npc_difficulty
            }),
            None => defaults.default_npc_difficulty,
        };

        let idle_lock_ttl = match value(IDLE_LOCK_TTL_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        value = %raw,
                        fallback = DEFAULT_IDLE_LOCK_TTL_SECS,
                        "Invalid {}, using default",
                        IDLE_LOCK_TTL_VAR
                    );
                    defaults.idle_lock_ttl
                }
            },
            None => defaults.idle_lock_ttl,
        };

        Self {
            log_filter,
            default_npc_difficulty,
            idle_lock_ttl,
        }
    }
}

/// Load `.env.local` then `.env` from the workspace root, if present.
///
/// Variables already set in the environment win over file values.
fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load env file");
            }
        }
    }
}
