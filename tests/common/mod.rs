//! Shared setup for the integration suite: one memory store wired into all
//! four services, plus fixture helpers.

use parvis_core::adapters::memory::MemoryStore;
use parvis_core::errors::domain::DomainError;
use parvis_core::repos::games::GameCreate;
use parvis_core::repos::players::PlayerCreate;
use parvis_core::services::games::GameService;
use parvis_core::services::players::PlayerService;
use parvis_core::services::rounds::RoundService;
use parvis_core::services::stats::StatsService;

#[ctor::ctor]
fn init_test_logging() {
    parvis_core::test_support::logging::init();
}

pub struct TestApp {
    pub store: MemoryStore,
    pub games: GameService<MemoryStore, MemoryStore, MemoryStore>,
    pub rounds: RoundService<MemoryStore, MemoryStore>,
    pub players: PlayerService<MemoryStore, MemoryStore>,
    pub stats: StatsService<MemoryStore, MemoryStore, MemoryStore>,
}

pub fn test_app() -> TestApp {
    let store = MemoryStore::new();
    TestApp {
        games: GameService::new(store.clone(), store.clone(), store.clone()),
        rounds: RoundService::new(store.clone(), store.clone()),
        players: PlayerService::new(store.clone(), store.clone()),
        stats: StatsService::new(store.clone(), store.clone(), store.clone()),
        store,
    }
}

/// Register one player per alias and return their ids in order.
pub async fn register_players(
    app: &TestApp,
    aliases: &[&str],
) -> Result<Vec<i64>, DomainError> {
    let mut ids = Vec::with_capacity(aliases.len());
    for alias in aliases {
        let player = app
            .players
            .create_player(PlayerCreate {
                alias: alias.to_string(),
                ..Default::default()
            })
            .await?;
        ids.push(player.id);
    }
    Ok(ids)
}

pub fn game_dto(player_ids: &[i64], total_rounds: u32) -> GameCreate {
    GameCreate {
        player_ids: player_ids.to_vec(),
        total_rounds,
        notes: None,
        location: None,
    }
}
