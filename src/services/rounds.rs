//! Round cell editing service.

use tracing::debug;

use crate::domain::lifecycle;
use crate::domain::models::Round;
use crate::domain::rules::validate_bet;
use crate::domain::scoring::calculate_score;
use crate::errors::domain::DomainError;
use crate::repos::games::{require_game, GameRepo};
use crate::repos::rounds::{RoundRepo, RoundUpsert};

pub struct RoundService<G, R> {
    games: G,
    rounds: R,
}

impl<G, R> RoundService<G, R>
where
    G: GameRepo,
    R: RoundRepo,
{
    pub fn new(games: G, rounds: R) -> Self {
        Self { games, rounds }
    }

    /// Record or correct one cell of the matrix.
    ///
    /// The game must be active, the player on the roster, the round already
    /// opened (`<= current_round`), and the bet within `[0, round_number]`.
    /// The score is recomputed here from `(bet, success)`; callers never
    /// supply one. Applying the same upsert twice leaves the ledger
    /// unchanged after the first application.
    pub async fn upsert_round(
        &self,
        game_id: i64,
        round_number: u32,
        player_id: i64,
        bet: u32,
        success: bool,
    ) -> Result<Round, DomainError> {
        let game = require_game(&self.games, game_id).await?;
        lifecycle::ensure_active(&game)?;
        if !game.player_ids.contains(&player_id) {
            return Err(DomainError::validation(format!(
                "player {player_id} is not on the roster of game {game_id}"
            )));
        }
        lifecycle::ensure_editable_round(&game, round_number)?;
        validate_bet(bet, round_number)?;

        let score = calculate_score(bet, success);
        let round = self
            .rounds
            .upsert(RoundUpsert {
                game_id,
                round_number,
                player_id,
                bet,
                success,
                score: Some(score),
            })
            .await?;
        debug!(game_id, round = round_number, player_id, bet, success, score, "round upserted");
        Ok(round)
    }
}
