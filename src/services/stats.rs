//! Statistics service: fetches the relevant ledger slices and delegates the
//! arithmetic to `domain::stats`.
//!
//! Lifetime statistics only count valid (finished) games, and within each
//! game only the rounds reachable by the matrix view
//! (`round_number <= total_rounds`).

use std::collections::HashMap;

use crate::domain::models::Round;
use crate::domain::stats::{
    aggregate, bet_distribution, compute_player_stats, game_player_stats, game_series, BetBucket,
    CombinedStats, GamePlayerStats, GameSeries, PlayerStats,
};
use crate::errors::domain::DomainError;
use crate::repos::games::{require_game, GameRepo};
use crate::repos::players::{require_player, PlayerRepo};
use crate::repos::rounds::RoundRepo;

pub struct StatsService<G, P, R> {
    games: G,
    players: P,
    rounds: R,
}

impl<G, P, R> StatsService<G, P, R>
where
    G: GameRepo,
    P: PlayerRepo,
    R: RoundRepo,
{
    pub fn new(games: G, players: P, rounds: R) -> Self {
        Self {
            games,
            players,
            rounds,
        }
    }

    /// Lifetime statistics for one player across valid games.
    pub async fn player_stats(&self, player_id: i64) -> Result<PlayerStats, DomainError> {
        let player = require_player(&self.players, player_id).await?;
        let (games_played, rows) = self.valid_rows_for(player_id).await?;
        Ok(compute_player_stats(
            player.id,
            &player.alias,
            games_played,
            &rows,
        ))
    }

    /// Rollup across several players for combined views.
    pub async fn combined_stats(&self, player_ids: &[i64]) -> Result<CombinedStats, DomainError> {
        let mut per_player = Vec::with_capacity(player_ids.len());
        for &player_id in player_ids {
            per_player.push(self.player_stats(player_id).await?);
        }
        Ok(aggregate(&per_player))
    }

    /// Bet-frequency histogram for one player, over the same row set as
    /// [`Self::player_stats`].
    pub async fn player_bet_distribution(
        &self,
        player_id: i64,
    ) -> Result<Vec<BetBucket>, DomainError> {
        require_player(&self.players, player_id).await?;
        let (_, rows) = self.valid_rows_for(player_id).await?;
        Ok(bet_distribution(&rows))
    }

    /// Per-player statistics for one game.
    pub async fn game_stats(&self, game_id: i64) -> Result<Vec<GamePlayerStats>, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        let players = self.players.list().await?;
        let rounds = self.rounds.list_by_game(game_id).await?;
        Ok(game_player_stats(&game, &players, &rounds))
    }

    /// Cumulative score series for one game's chart.
    pub async fn game_score_series(&self, game_id: i64) -> Result<GameSeries, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        let rounds = self.rounds.list_by_game(game_id).await?;
        Ok(game_series(&game, &rounds))
    }

    /// The player's ledger rows restricted to valid games and in-range
    /// rounds, plus the count of valid games they appeared in.
    async fn valid_rows_for(&self, player_id: i64) -> Result<(u32, Vec<Round>), DomainError> {
        let games = self.games.list_for_player(player_id).await?;
        let valid: HashMap<i64, u32> = games
            .iter()
            .filter(|g| g.is_valid)
            .map(|g| (g.id, g.total_rounds))
            .collect();
        let rows = self
            .rounds
            .list_by_player(player_id)
            .await?
            .into_iter()
            .filter(|r| valid.get(&r.game_id).is_some_and(|&total| r.round_number <= total))
            .collect();
        Ok((valid.len() as u32, rows))
    }
}
