//! Domain models shared by the pure logic, the repo traits, and the services.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// A registered player.
///
/// `parent_ids` is an order-irrelevant set of other player ids forming a
/// multi-parent DAG (never a cycle, never the player's own id; enforced by
/// `PlayerService`). `last_game_date` is stamped whenever the player is put
/// on a game roster and drives the "recent players" forest view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub alias: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<Date>,
    #[serde(with = "time::serde::rfc3339")]
    pub registration_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_game_date: Option<OffsetDateTime>,
    pub parent_ids: Vec<i64>,
}

/// One game session with a fixed roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    /// The fixed roster for this session, set at creation (len >= 2).
    pub player_ids: Vec<i64>,
    /// Total number of rounds; mutable while the game is active.
    pub total_rounds: u32,
    /// Monotonically non-decreasing while active, in `[0, total_rounds]`.
    /// Creation seeds round 1, so a fresh game starts at 1.
    pub current_round: u32,
    /// Exactly one game may be active at a time.
    pub is_active: bool,
    /// True once explicitly finished; false while unfinished or cancelled.
    pub is_valid: bool,
    pub notes: Option<String>,
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Game {
    pub fn status(&self) -> GameStatus {
        if self.is_active {
            GameStatus::Active
        } else if self.is_valid {
            GameStatus::Finished
        } else {
            GameStatus::Cancelled
        }
    }
}

/// Lifecycle state derived from the `(is_active, is_valid)` flag pair.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Open for round-by-round editing.
    Active,
    /// Terminal and counted by statistics.
    Finished,
    /// Cancelled or minimized; rows are kept but excluded from statistics.
    Cancelled,
}

/// One ledger row: player `player_id` bet `bet` in round `round_number` of
/// game `game_id`. Unique per `(game_id, round_number, player_id)`; the store
/// upserts on that key and never duplicates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: i64,
    pub game_id: i64,
    pub round_number: u32,
    pub player_id: i64,
    pub bet: u32,
    pub success: bool,
    /// Derived from `(bet, success)` when a result is recorded; `None` for
    /// freshly seeded rows whose result has not been marked yet.
    pub score: Option<i64>,
}

impl Round {
    /// Whether a result has been recorded for this row.
    pub fn is_resolved(&self) -> bool {
        self.score.is_some()
    }
}
