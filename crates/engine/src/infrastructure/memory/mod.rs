//! In-memory adapters for the repository ports.
//!
//! Nothing here survives a restart. Suitable for development, tests and
//! single-process hosting.

mod events;
mod games;

pub use events::InMemoryGameEventRepo;
pub use games::InMemoryGameRepo;
