//! Game lifecycle and round reconciliation service.
//!
//! Owns the game state machine (create/advance/adjust/finish/cancel/
//! reactivate/delete) and keeps the ledger dense up to `current_round`:
//! every round that is opened gets a seeded row for every roster player.
//! Seeding is idempotent, so a batch that fails halfway is retriable
//! without duplicating rows.

use tracing::{debug, info, warn};

use crate::domain::lifecycle;
use crate::domain::matrix::{build_matrix, totals, Matrix};
use crate::domain::models::{Game, Round};
use crate::domain::rules;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::games::{require_game, GameCreate, GameRepo};
use crate::repos::players::{require_player, PlayerRepo};
use crate::repos::rounds::{RoundRepo, RoundUpsert};

pub struct GameService<G, P, R> {
    games: G,
    players: P,
    rounds: R,
}

impl<G, P, R> GameService<G, P, R>
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

    /// Create a game with a fixed roster and make it the active game.
    ///
    /// Round 1 is seeded for the full roster (`bet = 0`, no result), so the
    /// matrix has no undefined round-1 cells, and every roster member's
    /// `last_game_date` is stamped. All validation runs before any write.
    pub async fn create_game(&self, dto: GameCreate) -> Result<Game, DomainError> {
        rules::validate_roster(&dto.player_ids)?;
        rules::validate_total_rounds(dto.total_rounds)?;
        for &player_id in &dto.player_ids {
            require_player(&self.players, player_id).await?;
        }
        if let Some(active) = self.games.find_active().await? {
            return Err(DomainError::conflict(
                ConflictKind::ActiveGameExists,
                format!("game {} is already active", active.id),
            ));
        }

        let game = self.games.create(dto).await?;
        info!(
            game_id = game.id,
            players = game.player_ids.len(),
            total_rounds = game.total_rounds,
            "game created"
        );

        self.seed_round(&game, 1).await?;
        self.players
            .touch_last_game(&game.player_ids, game.date)
            .await?;
        Ok(game)
    }

    /// Open the next round: seed its rows for the full roster, then advance
    /// the counter. Seeding happens first so a partial failure leaves the
    /// counter untouched and a retry completes the seed idempotently.
    pub async fn advance_round(&self, game_id: i64) -> Result<Game, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        lifecycle::ensure_can_advance(&game)?;

        let next = game.current_round + 1;
        self.seed_round(&game, next).await?;
        let updated = self
            .games
            .update_rounds(game_id, game.total_rounds, next)
            .await?;
        info!(game_id, round = next, "advanced to next round");
        Ok(updated)
    }

    /// Re-seed the current round's rows, skipping the ones that exist.
    /// Recovery path after a partial seed failure.
    pub async fn reseed_current_round(&self, game_id: i64) -> Result<(), DomainError> {
        let game = require_game(&self.games, game_id).await?;
        lifecycle::ensure_active(&game)?;
        self.seed_round(&game, game.current_round).await
    }

    /// Change the total round count. `current_round` is clamped down when
    /// the new total undercuts it, never raised; ledger rows beyond the new
    /// total are retained but disappear from the matrix view.
    pub async fn adjust_total_rounds(
        &self,
        game_id: i64,
        new_total: u32,
    ) -> Result<Game, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        lifecycle::ensure_active(&game)?;
        rules::validate_total_rounds(new_total)?;

        let clamped = game.current_round.min(new_total);
        if clamped < game.current_round {
            warn!(
                game_id,
                from = game.current_round,
                to = clamped,
                "clamping current round to the new total"
            );
        }
        let updated = self.games.update_rounds(game_id, new_total, clamped).await?;
        info!(game_id, new_total, current_round = clamped, "total rounds adjusted");
        Ok(updated)
    }

    /// Finish the active game. Only legal once `current_round` has reached
    /// `total_rounds`; the finished game counts toward statistics.
    pub async fn finish_game(&self, game_id: i64) -> Result<Game, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        lifecycle::ensure_can_finish(&game)?;
        let updated = self.games.update_status(game_id, false, true).await?;
        info!(game_id, "game finished");
        Ok(updated)
    }

    /// Cancel/minimize the active game at any round. Rows are kept, but the
    /// game is excluded from valid statistics.
    pub async fn cancel_game(&self, game_id: i64) -> Result<Game, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        lifecycle::ensure_active(&game)?;
        let updated = self.games.update_status(game_id, false, false).await?;
        info!(game_id, "game cancelled");
        Ok(updated)
    }

    /// Bring a finished or cancelled game back into the active state for
    /// correction. Refused while another game holds the active slot; marks
    /// the game unfinished again until it is re-finished.
    pub async fn reactivate_game(&self, game_id: i64) -> Result<Game, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        let active = self.games.find_active().await?;
        lifecycle::ensure_can_reactivate(&game, active.as_ref())?;
        let updated = self.games.update_status(game_id, true, false).await?;
        info!(game_id, "game reactivated");
        Ok(updated)
    }

    /// Hard-remove the game and its ledger rows. Irreversible.
    pub async fn delete_game(&self, game_id: i64) -> Result<(), DomainError> {
        require_game(&self.games, game_id).await?;
        self.rounds.delete_by_game(game_id).await?;
        self.games.delete(game_id).await?;
        info!(game_id, "game deleted");
        Ok(())
    }

    /// Update notes/location. `None` keeps the current value; an empty
    /// string clears the field.
    pub async fn update_metadata(
        &self,
        game_id: i64,
        notes: Option<String>,
        location: Option<String>,
    ) -> Result<Game, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        let notes = merge_field(game.notes.clone(), notes);
        let location = merge_field(game.location.clone(), location);
        self.games.update_metadata(game_id, notes, location).await
    }

    pub async fn get_game(&self, game_id: i64) -> Result<Game, DomainError> {
        require_game(&self.games, game_id).await
    }

    pub async fn list_games(&self, active_only: bool) -> Result<Vec<Game>, DomainError> {
        self.games.list(active_only).await
    }

    pub async fn game_rounds(&self, game_id: i64) -> Result<Vec<Round>, DomainError> {
        require_game(&self.games, game_id).await?;
        self.rounds.list_by_game(game_id).await
    }

    /// Dense bet/result matrix for the game, recomputed from the current
    /// ledger snapshot.
    pub async fn matrix(&self, game_id: i64) -> Result<Matrix, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        let rounds = self.rounds.list_by_game(game_id).await?;
        Ok(build_matrix(&game, &rounds))
    }

    /// Per-player score totals for the leaderboard and the matrix footer,
    /// over the rounds reachable by the matrix view.
    pub async fn game_totals(&self, game_id: i64) -> Result<Vec<i64>, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        let rounds: Vec<Round> = self
            .rounds
            .list_by_game(game_id)
            .await?
            .into_iter()
            .filter(|r| r.round_number <= game.total_rounds)
            .collect();
        Ok(totals(&game.player_ids, &rounds))
    }

    /// Seed one row per roster player for `round_number`, skipping rows that
    /// already exist. A failed write surfaces as `PartialBatch` naming the
    /// failed key; rows written before the failure stay valid.
    async fn seed_round(&self, game: &Game, round_number: u32) -> Result<(), DomainError> {
        for &player_id in &game.player_ids {
            if self
                .rounds
                .find(game.id, round_number, player_id)
                .await?
                .is_some()
            {
                continue;
            }
            self.rounds
                .upsert(RoundUpsert {
                    game_id: game.id,
                    round_number,
                    player_id,
                    bet: 0,
                    success: false,
                    score: None,
                })
                .await
                .map_err(|err| DomainError::partial_batch(round_number, player_id, err))?;
        }
        debug!(game_id = game.id, round = round_number, "round seeded");
        Ok(())
    }
}

fn merge_field(current: Option<String>, incoming: Option<String>) -> Option<String> {
    match incoming {
        None => current,
        Some(s) if s.is_empty() => None,
        Some(s) => Some(s),
    }
}
