//! Round ledger repository trait.

use async_trait::async_trait;

use crate::domain::models::Round;
use crate::errors::domain::DomainError;

/// One upsert against the ledger, keyed by
/// `(game_id, round_number, player_id)`. Seeding passes `score: None`;
/// result-recording upserts pass the server-computed score.
#[derive(Debug, Clone)]
pub struct RoundUpsert {
    pub game_id: i64,
    pub round_number: u32,
    pub player_id: i64,
    pub bet: u32,
    pub success: bool,
    pub score: Option<i64>,
}

#[async_trait]
pub trait RoundRepo: Send + Sync {
    /// Insert or update the row for the upsert key; never duplicates it.
    async fn upsert(&self, dto: RoundUpsert) -> Result<Round, DomainError>;

    async fn find(
        &self,
        game_id: i64,
        round_number: u32,
        player_id: i64,
    ) -> Result<Option<Round>, DomainError>;

    /// All rows of one game, ordered by round number then player id.
    async fn list_by_game(&self, game_id: i64) -> Result<Vec<Round>, DomainError>;

    /// All rows of one player across all games.
    async fn list_by_player(&self, player_id: i64) -> Result<Vec<Round>, DomainError>;

    async fn delete_by_game(&self, game_id: i64) -> Result<(), DomainError>;

    /// Whether any ledger row references the player (drives the player
    /// delete guard).
    async fn has_rows_for_player(&self, player_id: i64) -> Result<bool, DomainError>;
}
