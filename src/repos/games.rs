//! Game repository trait.

use async_trait::async_trait;

use crate::domain::models::Game;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Fields for creating a game. The store stamps the creation date and starts
/// the game active and unfinished; `current_round` starts at 1 because
/// creation seeds the round-1 cells.
#[derive(Debug, Clone, Default)]
pub struct GameCreate {
    pub player_ids: Vec<i64>,
    pub total_rounds: u32,
    pub notes: Option<String>,
    pub location: Option<String>,
}

#[async_trait]
pub trait GameRepo: Send + Sync {
    /// List games, optionally only the active one(s).
    async fn list(&self, active_only: bool) -> Result<Vec<Game>, DomainError>;

    async fn find_by_id(&self, game_id: i64) -> Result<Option<Game>, DomainError>;

    /// The single active game, if any.
    async fn find_active(&self) -> Result<Option<Game>, DomainError>;

    /// Games whose roster contains the player.
    async fn list_for_player(&self, player_id: i64) -> Result<Vec<Game>, DomainError>;

    async fn create(&self, dto: GameCreate) -> Result<Game, DomainError>;

    async fn update_rounds(
        &self,
        game_id: i64,
        total_rounds: u32,
        current_round: u32,
    ) -> Result<Game, DomainError>;

    async fn update_status(
        &self,
        game_id: i64,
        is_active: bool,
        is_valid: bool,
    ) -> Result<Game, DomainError>;

    /// Replace notes/location with the given values.
    async fn update_metadata(
        &self,
        game_id: i64,
        notes: Option<String>,
        location: Option<String>,
    ) -> Result<Game, DomainError>;

    /// Hard-remove the game row. Ledger rows are removed separately via
    /// `RoundRepo::delete_by_game`.
    async fn delete(&self, game_id: i64) -> Result<(), DomainError>;
}

/// Load a game or fail with `NotFound`.
pub async fn require_game<G: GameRepo + ?Sized>(
    repo: &G,
    game_id: i64,
) -> Result<Game, DomainError> {
    repo.find_by_id(game_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found")))
}
