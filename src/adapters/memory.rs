//! In-process reference implementation of the repo traits.
//!
//! Backs the integration tests and doubles as the executable contract of the
//! external data service: id allocation, upsert-on-key semantics, alias
//! uniqueness, and the player delete guard all live here. Cloning the store
//! clones a handle to the same shared state.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;

use crate::domain::models::{Game, Player, Round};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::games::{GameCreate, GameRepo};
use crate::repos::players::{PlayerCreate, PlayerRepo, PlayerUpdate};
use crate::repos::rounds::{RoundRepo, RoundUpsert};

#[derive(Default)]
struct StoreInner {
    players: BTreeMap<i64, Player>,
    games: BTreeMap<i64, Game>,
    rounds: BTreeMap<i64, Round>,
    next_player_id: i64,
    next_game_id: i64,
    next_round_id: i64,
    /// Remaining round upserts to fail, for exercising partial-batch paths.
    fail_upserts: u32,
}

impl StoreInner {
    fn alloc_player_id(&mut self) -> i64 {
        self.next_player_id += 1;
        self.next_player_id
    }
    fn alloc_game_id(&mut self) -> i64 {
        self.next_game_id += 1;
        self.next_game_id
    }
    fn alloc_round_id(&mut self) -> i64 {
        self.next_round_id += 1;
        self.next_round_id
    }
}

/// Shared in-memory store implementing all repo traits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` round upserts fail with a store error. Each failed
    /// call consumes one unit, so a retry after `n` failures succeeds.
    pub fn fail_next_upserts(&self, n: u32) {
        self.inner.write().fail_upserts = n;
    }
}

#[async_trait]
impl PlayerRepo for MemoryStore {
    async fn list(&self) -> Result<Vec<Player>, DomainError> {
        Ok(self.inner.read().players.values().cloned().collect())
    }

    async fn find_by_id(&self, player_id: i64) -> Result<Option<Player>, DomainError> {
        Ok(self.inner.read().players.get(&player_id).cloned())
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Player>, DomainError> {
        Ok(self
            .inner
            .read()
            .players
            .values()
            .find(|p| p.alias == alias)
            .cloned())
    }

    async fn create(&self, dto: PlayerCreate) -> Result<Player, DomainError> {
        let mut inner = self.inner.write();
        if inner.players.values().any(|p| p.alias == dto.alias) {
            return Err(DomainError::conflict(
                ConflictKind::AliasTaken,
                format!("alias '{}' already exists", dto.alias),
            ));
        }
        let id = inner.alloc_player_id();
        let player = Player {
            id,
            alias: dto.alias,
            first_name: dto.first_name,
            middle_name: dto.middle_name,
            last_name: dto.last_name,
            birthdate: dto.birthdate,
            registration_date: OffsetDateTime::now_utc(),
            last_game_date: None,
            parent_ids: dto.parent_ids,
        };
        inner.players.insert(id, player.clone());
        Ok(player)
    }

    async fn update(&self, player_id: i64, dto: PlayerUpdate) -> Result<Player, DomainError> {
        let mut inner = self.inner.write();
        if inner
            .players
            .values()
            .any(|p| p.id != player_id && p.alias == dto.alias)
        {
            return Err(DomainError::conflict(
                ConflictKind::AliasTaken,
                format!("alias '{}' already exists", dto.alias),
            ));
        }
        let player = inner.players.get_mut(&player_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("player {player_id} not found"))
        })?;
        player.alias = dto.alias;
        player.first_name = dto.first_name;
        player.middle_name = dto.middle_name;
        player.last_name = dto.last_name;
        player.birthdate = dto.birthdate;
        player.parent_ids = dto.parent_ids;
        Ok(player.clone())
    }

    async fn delete(&self, player_id: i64) -> Result<(), DomainError> {
        let mut inner = self.inner.write();
        if !inner.players.contains_key(&player_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Player,
                format!("player {player_id} not found"),
            ));
        }
        // Referential guard: round history pins the player.
        if inner.rounds.values().any(|r| r.player_id == player_id) {
            return Err(DomainError::conflict(
                ConflictKind::PlayerHasHistory,
                format!("player {player_id} has recorded rounds and cannot be deleted"),
            ));
        }
        inner.players.remove(&player_id);
        Ok(())
    }

    async fn touch_last_game(
        &self,
        player_ids: &[i64],
        date: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.write();
        for id in player_ids {
            if let Some(player) = inner.players.get_mut(id) {
                player.last_game_date = Some(date);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl GameRepo for MemoryStore {
    async fn list(&self, active_only: bool) -> Result<Vec<Game>, DomainError> {
        Ok(self
            .inner
            .read()
            .games
            .values()
            .filter(|g| !active_only || g.is_active)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, game_id: i64) -> Result<Option<Game>, DomainError> {
        Ok(self.inner.read().games.get(&game_id).cloned())
    }

    async fn find_active(&self) -> Result<Option<Game>, DomainError> {
        Ok(self
            .inner
            .read()
            .games
            .values()
            .find(|g| g.is_active)
            .cloned())
    }

    async fn list_for_player(&self, player_id: i64) -> Result<Vec<Game>, DomainError> {
        Ok(self
            .inner
            .read()
            .games
            .values()
            .filter(|g| g.player_ids.contains(&player_id))
            .cloned()
            .collect())
    }

    async fn create(&self, dto: GameCreate) -> Result<Game, DomainError> {
        let mut inner = self.inner.write();
        let id = inner.alloc_game_id();
        let game = Game {
            id,
            player_ids: dto.player_ids,
            total_rounds: dto.total_rounds,
            current_round: 1,
            is_active: true,
            is_valid: false,
            notes: dto.notes,
            location: dto.location,
            date: OffsetDateTime::now_utc(),
        };
        inner.games.insert(id, game.clone());
        Ok(game)
    }

    async fn update_rounds(
        &self,
        game_id: i64,
        total_rounds: u32,
        current_round: u32,
    ) -> Result<Game, DomainError> {
        let mut inner = self.inner.write();
        let game = require_game_mut(&mut inner, game_id)?;
        game.total_rounds = total_rounds;
        game.current_round = current_round;
        Ok(game.clone())
    }

    async fn update_status(
        &self,
        game_id: i64,
        is_active: bool,
        is_valid: bool,
    ) -> Result<Game, DomainError> {
        let mut inner = self.inner.write();
        let game = require_game_mut(&mut inner, game_id)?;
        game.is_active = is_active;
        game.is_valid = is_valid;
        Ok(game.clone())
    }

    async fn update_metadata(
        &self,
        game_id: i64,
        notes: Option<String>,
        location: Option<String>,
    ) -> Result<Game, DomainError> {
        let mut inner = self.inner.write();
        let game = require_game_mut(&mut inner, game_id)?;
        game.notes = notes;
        game.location = location;
        Ok(game.clone())
    }

    async fn delete(&self, game_id: i64) -> Result<(), DomainError> {
        let mut inner = self.inner.write();
        inner.games.remove(&game_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found"))
        })?;
        Ok(())
    }
}

#[async_trait]
impl RoundRepo for MemoryStore {
    async fn upsert(&self, dto: RoundUpsert) -> Result<Round, DomainError> {
        let mut inner = self.inner.write();
        if inner.fail_upserts > 0 {
            inner.fail_upserts -= 1;
            return Err(DomainError::infra(
                InfraErrorKind::StoreUnavailable,
                "round write failed",
            ));
        }
        let existing_id = inner
            .rounds
            .values()
            .find(|r| {
                r.game_id == dto.game_id
                    && r.round_number == dto.round_number
                    && r.player_id == dto.player_id
            })
            .map(|r| r.id);
        let id = match existing_id {
            Some(id) => id,
            None => inner.alloc_round_id(),
        };
        let round = Round {
            id,
            game_id: dto.game_id,
            round_number: dto.round_number,
            player_id: dto.player_id,
            bet: dto.bet,
            success: dto.success,
            score: dto.score,
        };
        inner.rounds.insert(id, round.clone());
        Ok(round)
    }

    async fn find(
        &self,
        game_id: i64,
        round_number: u32,
        player_id: i64,
    ) -> Result<Option<Round>, DomainError> {
        Ok(self
            .inner
            .read()
            .rounds
            .values()
            .find(|r| {
                r.game_id == game_id
                    && r.round_number == round_number
                    && r.player_id == player_id
            })
            .cloned())
    }

    async fn list_by_game(&self, game_id: i64) -> Result<Vec<Round>, DomainError> {
        let mut rows: Vec<Round> = self
            .inner
            .read()
            .rounds
            .values()
            .filter(|r| r.game_id == game_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.round_number, r.player_id));
        Ok(rows)
    }

    async fn list_by_player(&self, player_id: i64) -> Result<Vec<Round>, DomainError> {
        let mut rows: Vec<Round> = self
            .inner
            .read()
            .rounds
            .values()
            .filter(|r| r.player_id == player_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.game_id, r.round_number));
        Ok(rows)
    }

    async fn delete_by_game(&self, game_id: i64) -> Result<(), DomainError> {
        self.inner.write().rounds.retain(|_, r| r.game_id != game_id);
        Ok(())
    }

    async fn has_rows_for_player(&self, player_id: i64) -> Result<bool, DomainError> {
        Ok(self
            .inner
            .read()
            .rounds
            .values()
            .any(|r| r.player_id == player_id))
    }
}

fn require_game_mut(inner: &mut StoreInner, game_id: i64) -> Result<&mut Game, DomainError> {
    inner.games.get_mut(&game_id).ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found"))
    })
}
