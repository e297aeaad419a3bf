//! Service layer: orchestration over the repo traits.

pub mod games;
pub mod players;
pub mod rounds;
pub mod stats;

pub use games::GameService;
pub use players::{PlayerFamily, PlayerService};
pub use rounds::RoundService;
pub use stats::StatsService;
