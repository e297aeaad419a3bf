#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Score-tracking core for the Parvis betting card game.
//!
//! Three components with real invariants live here: the round ledger
//! reconciler (dense bet/result matrix kept consistent with a monotonic
//! current-round counter), the statistics aggregator (lifetime and per-game
//! derived numbers), and the family forest builder (multi-parent ancestry
//! rendered as trees). Presentation and persistence stay outside; the
//! external data service is reached through the `repos` traits.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod repos;
pub mod services;
pub mod telemetry;
pub mod test_support;

// Re-exports for public API
pub use adapters::memory::MemoryStore;
pub use config::settings::Settings;
pub use domain::models::{Game, GameStatus, Player, Round};
pub use errors::domain::{ConflictKind, DomainError, NotFoundKind};
pub use services::games::GameService;
pub use services::players::PlayerService;
pub use services::rounds::RoundService;
pub use services::stats::StatsService;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_support::logging::init();
}
