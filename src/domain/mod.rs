//! Domain layer: pure score-tracking logic, no I/O.

pub mod family_tree;
pub mod lifecycle;
pub mod matrix;
pub mod models;
pub mod rules;
pub mod scoring;
pub mod stats;

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod tests_lifecycle;
#[cfg(test)]
mod tests_props_reconciler;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_stats;

// Re-exports for ergonomics
pub use family_tree::{build_forest, recent_player_ids, to_render_tree, RenderTree, TreeNode};
pub use matrix::{build_matrix, totals, Matrix, MatrixCell};
pub use models::{Game, GameStatus, Player, Round};
pub use rules::{validate_bet, validate_total_rounds, BASE_SCORE};
pub use scoring::calculate_score;
pub use stats::{
    aggregate, bet_distribution, compute_player_stats, game_player_stats, game_series,
    CombinedStats, GamePlayerStats, GameSeries, PlayerStats,
};
