//! Player repository trait.

use async_trait::async_trait;
use time::{Date, OffsetDateTime};

use crate::domain::models::Player;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Fields for registering a player. `registration_date` is stamped by the
/// store at creation and is immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct PlayerCreate {
    pub alias: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<Date>,
    pub parent_ids: Vec<i64>,
}

/// Full-replace update of a player's editable fields.
#[derive(Debug, Clone, Default)]
pub struct PlayerUpdate {
    pub alias: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<Date>,
    pub parent_ids: Vec<i64>,
}

#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<Player>, DomainError>;

    async fn find_by_id(&self, player_id: i64) -> Result<Option<Player>, DomainError>;

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Player>, DomainError>;

    async fn create(&self, dto: PlayerCreate) -> Result<Player, DomainError>;

    async fn update(&self, player_id: i64, dto: PlayerUpdate) -> Result<Player, DomainError>;

    /// Delete a player. The store owns the referential guard: deleting a
    /// player that still has ledger rows is a conflict.
    async fn delete(&self, player_id: i64) -> Result<(), DomainError>;

    /// Stamp `last_game_date` for every listed player.
    async fn touch_last_game(
        &self,
        player_ids: &[i64],
        date: OffsetDateTime,
    ) -> Result<(), DomainError>;
}

/// Load a player or fail with `NotFound`.
pub async fn require_player<P: PlayerRepo + ?Sized>(
    repo: &P,
    player_id: i64,
) -> Result<Player, DomainError> {
    repo.find_by_id(player_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, format!("player {player_id} not found"))
    })
}
