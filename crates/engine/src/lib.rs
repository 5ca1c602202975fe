//! Fore Engine library.
//!
//! Hosts game sessions from the `fore-domain` rules engine: storage ports,
//! per-game command serialization, and the use cases clients call.
//!
//! ## Structure
//!
//! - `use_cases/` - Create, join, act on and query games
//! - `infrastructure/` - Ports, in-memory adapters, clock/random, settings
//! - `stores/` - Runtime state that is never persisted (per-game locks)
//! - `app` - Application composition
//! - `telemetry` - Tracing subscriber setup

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod telemetry;
pub mod use_cases;

pub use app::App;
pub use infrastructure::settings::EngineSettings;
