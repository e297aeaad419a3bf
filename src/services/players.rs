//! Player registration, editing, and family views.

use std::collections::HashSet;

use serde::Serialize;
use tracing::info;

use crate::domain::family_tree::{build_forest, recent_player_ids, TreeNode};
use crate::domain::models::Player;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::players::{require_player, PlayerCreate, PlayerRepo, PlayerUpdate};
use crate::repos::rounds::RoundRepo;

/// Parent/child edges of one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerFamily {
    pub id: i64,
    pub alias: String,
    pub parent_ids: Vec<i64>,
    pub child_ids: Vec<i64>,
}

pub struct PlayerService<P, R> {
    players: P,
    rounds: R,
}

impl<P, R> PlayerService<P, R>
where
    P: PlayerRepo,
    R: RoundRepo,
{
    pub fn new(players: P, rounds: R) -> Self {
        Self { players, rounds }
    }

    pub async fn list_players(&self) -> Result<Vec<Player>, DomainError> {
        self.players.list().await
    }

    pub async fn get_player(&self, player_id: i64) -> Result<Player, DomainError> {
        require_player(&self.players, player_id).await
    }

    /// Register a player. The alias must be non-empty and unused; requested
    /// parents that do not exist are dropped silently (dangling references
    /// never fail the call).
    pub async fn create_player(&self, mut dto: PlayerCreate) -> Result<Player, DomainError> {
        if dto.alias.trim().is_empty() {
            return Err(DomainError::validation("alias must not be empty"));
        }
        if self.players.find_by_alias(&dto.alias).await?.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::AliasTaken,
                format!("alias '{}' already exists", dto.alias),
            ));
        }
        dto.parent_ids = self.existing_parents(dto.parent_ids, None).await?;
        let player = self.players.create(dto).await?;
        info!(player_id = player.id, alias = %player.alias, "player registered");
        Ok(player)
    }

    /// Edit a player. Rejects alias collisions, self-parenting, and any
    /// parent set that would make an ancestor out of a descendant.
    pub async fn update_player(
        &self,
        player_id: i64,
        mut dto: PlayerUpdate,
    ) -> Result<Player, DomainError> {
        let current = require_player(&self.players, player_id).await?;
        if dto.alias.trim().is_empty() {
            return Err(DomainError::validation("alias must not be empty"));
        }
        if dto.alias != current.alias {
            if self.players.find_by_alias(&dto.alias).await?.is_some() {
                return Err(DomainError::conflict(
                    ConflictKind::AliasTaken,
                    format!("alias '{}' already exists", dto.alias),
                ));
            }
        }
        if dto.parent_ids.contains(&player_id) {
            return Err(DomainError::validation(format!(
                "player {player_id} cannot be its own parent"
            )));
        }
        dto.parent_ids = self.existing_parents(dto.parent_ids, Some(player_id)).await?;
        self.players.update(player_id, dto).await
    }

    /// Delete a player. Refused while any ledger row references them; the
    /// store enforces the same guard.
    pub async fn delete_player(&self, player_id: i64) -> Result<(), DomainError> {
        require_player(&self.players, player_id).await?;
        if self.rounds.has_rows_for_player(player_id).await? {
            return Err(DomainError::conflict(
                ConflictKind::PlayerHasHistory,
                format!("player {player_id} has recorded rounds and cannot be deleted"),
            ));
        }
        self.players.delete(player_id).await?;
        info!(player_id, "player deleted");
        Ok(())
    }

    /// Parent and child edges of a player.
    pub async fn player_family(&self, player_id: i64) -> Result<PlayerFamily, DomainError> {
        let player = require_player(&self.players, player_id).await?;
        let all = self.players.list().await?;
        let child_ids = all
            .iter()
            .filter(|p| p.parent_ids.contains(&player_id))
            .map(|p| p.id)
            .collect();
        Ok(PlayerFamily {
            id: player.id,
            alias: player.alias,
            parent_ids: player.parent_ids,
            child_ids,
        })
    }

    /// Ancestry forest over all registered players; see
    /// [`build_forest`] for search and visibility semantics.
    pub async fn family_forest(
        &self,
        search_term: &str,
        visible_ids: Option<&HashSet<i64>>,
    ) -> Result<Vec<TreeNode>, DomainError> {
        let players = self.players.list().await?;
        Ok(build_forest(&players, search_term, visible_ids))
    }

    /// Ids of the most recently active players, for capping the default
    /// forest view.
    pub async fn recent_players(&self, limit: usize) -> Result<Vec<i64>, DomainError> {
        let players = self.players.list().await?;
        Ok(recent_player_ids(&players, limit))
    }

    /// Keep only parent ids that resolve to an existing player, and reject
    /// sets that would create a cycle through `child_id`.
    async fn existing_parents(
        &self,
        parent_ids: Vec<i64>,
        child_id: Option<i64>,
    ) -> Result<Vec<i64>, DomainError> {
        let all = self.players.list().await?;
        let known: HashSet<i64> = all.iter().map(|p| p.id).collect();

        let mut kept: Vec<i64> = Vec::new();
        for id in parent_ids {
            if known.contains(&id) && !kept.contains(&id) {
                kept.push(id);
            }
        }

        if let Some(child_id) = child_id {
            let descendants = descendants_of(child_id, &all);
            if let Some(bad) = kept.iter().find(|id| descendants.contains(id)) {
                return Err(DomainError::validation(format!(
                    "player {bad} is a descendant of {child_id}; linking it as a parent would create a cycle"
                )));
            }
        }
        Ok(kept)
    }
}

/// All descendants of `root` over the current parent graph.
fn descendants_of(root: i64, players: &[Player]) -> HashSet<i64> {
    let mut out = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        for child in players.iter().filter(|p| p.parent_ids.contains(&id)) {
            if out.insert(child.id) {
                stack.push(child.id);
            }
        }
    }
    out
}
