//! Statistics aggregation over ledger rows.
//!
//! Pure computations: the services fetch the relevant rows (valid games only,
//! rows within each game's `total_rounds`) and delegate here. Rates are
//! always defined; empty row sets produce 0, never NaN or a division error.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::models::{Game, Player, Round};

/// One bar of the bet-frequency histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BetBucket {
    pub bet: u32,
    pub count: u32,
}

/// Lifetime statistics for one player across valid (finished) games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub player_id: i64,
    pub player_alias: String,
    pub games_played: u32,
    pub total_rounds: u32,
    pub total_score: i64,
    pub successful_bets: u32,
    pub failed_bets: u32,
    /// `successful_bets / total_rounds * 100`; 0 when no rounds.
    pub win_rate: f64,
    /// Mean bet over all rows; 0 when no rounds.
    pub average_bet: f64,
    /// Frequencies per distinct bet value, ascending by bet.
    pub bet_distribution: Vec<BetBucket>,
}

/// Rollup over several players' stats for combined views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedStats {
    pub player_ids: Vec<i64>,
    pub games_played: u32,
    pub total_rounds: u32,
    pub total_score: i64,
    pub successful_bets: u32,
    pub failed_bets: u32,
    pub win_rate: f64,
    pub average_bet: f64,
    pub bet_distribution: Vec<BetBucket>,
}

/// Per-player statistics scoped to a single game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GamePlayerStats {
    pub game_id: i64,
    pub player_id: i64,
    pub player_alias: String,
    pub total_score: i64,
    pub rounds_played: u32,
    pub successful_bets: u32,
    pub failed_bets: u32,
    pub average_bet: f64,
}

/// Cumulative score series for one game, one point per round number
/// `1..=total_rounds`. Unplayed rounds carry the last cumulative value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSeries {
    pub game_id: i64,
    pub player_ids: Vec<i64>,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub round_number: u32,
    /// Cumulative score per player, parallel to `player_ids`.
    pub cumulative: Vec<i64>,
}

/// Build the bet-frequency histogram for a row set, ascending by bet value.
pub fn bet_distribution(rows: &[Round]) -> Vec<BetBucket> {
    let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.bet).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(bet, count)| BetBucket { bet, count })
        .collect()
}

/// Lifetime stats for one player. `games_played` is the number of valid games
/// containing the player; `rows` are that player's ledger rows across those
/// games. Rows whose result has not been recorded count toward `total_rounds`
/// and `average_bet` but toward neither success counter.
pub fn compute_player_stats(
    player_id: i64,
    player_alias: &str,
    games_played: u32,
    rows: &[Round],
) -> PlayerStats {
    let total_rounds = rows.len() as u32;
    let total_score: i64 = rows.iter().map(|r| r.score.unwrap_or(0)).sum();
    let successful_bets = rows.iter().filter(|r| r.is_resolved() && r.success).count() as u32;
    let failed_bets = rows.iter().filter(|r| r.is_resolved() && !r.success).count() as u32;

    PlayerStats {
        player_id,
        player_alias: player_alias.to_string(),
        games_played,
        total_rounds,
        total_score,
        successful_bets,
        failed_bets,
        win_rate: rate(successful_bets, total_rounds),
        average_bet: mean_bet(rows),
        bet_distribution: bet_distribution(rows),
    }
}

/// Combine stats across players. Summable fields are added; `win_rate` is
/// recomputed from the summed counters and `average_bet` is the
/// round-count-weighted mean, so players with more rounds weigh more.
/// Histograms merge by summing counts per bet value.
pub fn aggregate(stats: &[PlayerStats]) -> CombinedStats {
    let games_played = stats.iter().map(|s| s.games_played).sum();
    let total_rounds: u32 = stats.iter().map(|s| s.total_rounds).sum();
    let total_score = stats.iter().map(|s| s.total_score).sum();
    let successful_bets: u32 = stats.iter().map(|s| s.successful_bets).sum();
    let failed_bets = stats.iter().map(|s| s.failed_bets).sum();

    let average_bet = if total_rounds == 0 {
        0.0
    } else {
        stats
            .iter()
            .map(|s| s.average_bet * f64::from(s.total_rounds))
            .sum::<f64>()
            / f64::from(total_rounds)
    };

    let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
    for s in stats {
        for bucket in &s.bet_distribution {
            *counts.entry(bucket.bet).or_insert(0) += bucket.count;
        }
    }

    CombinedStats {
        player_ids: stats.iter().map(|s| s.player_id).collect(),
        games_played,
        total_rounds,
        total_score,
        successful_bets,
        failed_bets,
        win_rate: rate(successful_bets, total_rounds),
        average_bet,
        bet_distribution: counts
            .into_iter()
            .map(|(bet, count)| BetBucket { bet, count })
            .collect(),
    }
}

/// Per-player stats for a single game. Only rows with
/// `round_number <= game.total_rounds` count, matching the matrix view.
pub fn game_player_stats(game: &Game, players: &[Player], rounds: &[Round]) -> Vec<GamePlayerStats> {
    game.player_ids
        .iter()
        .map(|&player_id| {
            let rows: Vec<Round> = rounds
                .iter()
                .filter(|r| r.player_id == player_id && r.round_number <= game.total_rounds)
                .cloned()
                .collect();
            let alias = players
                .iter()
                .find(|p| p.id == player_id)
                .map(|p| p.alias.as_str())
                .unwrap_or_default();

            let successful_bets =
                rows.iter().filter(|r| r.is_resolved() && r.success).count() as u32;
            let failed_bets =
                rows.iter().filter(|r| r.is_resolved() && !r.success).count() as u32;

            GamePlayerStats {
                game_id: game.id,
                player_id,
                player_alias: alias.to_string(),
                total_score: rows.iter().map(|r| r.score.unwrap_or(0)).sum(),
                rounds_played: rows.len() as u32,
                successful_bets,
                failed_bets,
                average_bet: mean_bet(&rows),
            }
        })
        .collect()
}

/// Cumulative score series for a game chart: point `i` holds each player's
/// score sum over rows with `round_number <= i`. Rounds past `current_round`
/// have no rows, so their points repeat the last cumulative value.
pub fn game_series(game: &Game, rounds: &[Round]) -> GameSeries {
    let mut points = Vec::with_capacity(game.total_rounds as usize);

    for round_number in 1..=game.total_rounds {
        let cumulative = game
            .player_ids
            .iter()
            .map(|&player_id| {
                rounds
                    .iter()
                    .filter(|r| r.player_id == player_id && r.round_number <= round_number)
                    .map(|r| r.score.unwrap_or(0))
                    .sum()
            })
            .collect();
        points.push(SeriesPoint {
            round_number,
            cumulative,
        });
    }

    GameSeries {
        game_id: game.id,
        player_ids: game.player_ids.clone(),
        points,
    }
}

fn rate(successful: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(successful) / f64::from(total) * 100.0
    }
}

fn mean_bet(rows: &[Round]) -> f64 {
    if rows.is_empty() {
        0.0
    } else {
        rows.iter().map(|r| f64::from(r.bet)).sum::<f64>() / rows.len() as f64
    }
}
