//! Dense matrix projection of a game's round ledger.
//!
//! The ledger is sparse (rows exist only up to `current_round`); the UI wants
//! a dense `total_rounds x roster` grid. `build_matrix` and `totals` are pure
//! projections over a ledger snapshot: they never mutate their inputs and are
//! recomputed on every call, so a mutation can never leave a stale view.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::models::{Game, Round};

/// One cell of the matrix. `bet` is `None` for rounds that have no ledger row
/// yet (not-yet-playable in the UI).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixCell {
    pub bet: Option<u32>,
    pub success: bool,
    pub score: Option<i64>,
}

impl MatrixCell {
    fn empty() -> Self {
        Self {
            bet: None,
            success: false,
            score: None,
        }
    }
}

/// Dense projection indexed `rows[round_number - 1][player_index]`, with
/// `player_index` following the roster order in `player_ids`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    pub player_ids: Vec<i64>,
    pub rows: Vec<Vec<MatrixCell>>,
}

/// Project the ledger onto a dense grid of exactly `total_rounds` rows and
/// `roster.len()` columns. Ledger rows beyond `total_rounds` (left over from
/// a downward round adjustment) and rows for players not on the roster are
/// ignored.
pub fn build_matrix(game: &Game, rounds: &[Round]) -> Matrix {
    let roster = &game.player_ids;
    let column: HashMap<i64, usize> = roster
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx))
        .collect();

    let mut rows =
        vec![vec![MatrixCell::empty(); roster.len()]; game.total_rounds as usize];

    for round in rounds {
        if round.round_number < 1 || round.round_number > game.total_rounds {
            continue;
        }
        let Some(&col) = column.get(&round.player_id) else {
            continue;
        };
        rows[(round.round_number - 1) as usize][col] = MatrixCell {
            bet: Some(round.bet),
            success: round.success,
            score: round.score,
        };
    }

    Matrix {
        player_ids: roster.clone(),
        rows,
    }
}

/// Per-player score totals across all ledger rows, ordered like `roster`.
/// Missing scores count as 0. This is the live leaderboard sum and must match
/// the per-game sum used by the statistics aggregator.
pub fn totals(roster: &[i64], rounds: &[Round]) -> Vec<i64> {
    let column: HashMap<i64, usize> = roster
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx))
        .collect();

    let mut sums = vec![0i64; roster.len()];
    for round in rounds {
        if let Some(&col) = column.get(&round.player_id) {
            sums[col] += round.score.unwrap_or(0);
        }
    }
    sums
}
