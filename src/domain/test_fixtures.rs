//! Fixture constructors for domain unit tests.

use time::macros::datetime;
use time::{Date, OffsetDateTime};

use crate::domain::models::{Game, Player, Round};
use crate::domain::scoring::calculate_score;

pub fn registered_at() -> OffsetDateTime {
    datetime!(2024-01-01 00:00 UTC)
}

pub fn player(id: i64, alias: &str) -> Player {
    Player {
        id,
        alias: alias.to_string(),
        first_name: None,
        middle_name: None,
        last_name: None,
        birthdate: None,
        registration_date: registered_at(),
        last_game_date: None,
        parent_ids: Vec::new(),
    }
}

pub fn player_born(id: i64, alias: &str, birthdate: Date) -> Player {
    Player {
        birthdate: Some(birthdate),
        ..player(id, alias)
    }
}

pub fn child_of(id: i64, alias: &str, parents: &[i64]) -> Player {
    Player {
        parent_ids: parents.to_vec(),
        ..player(id, alias)
    }
}

pub fn game(id: i64, player_ids: &[i64], total_rounds: u32, current_round: u32) -> Game {
    Game {
        id,
        player_ids: player_ids.to_vec(),
        total_rounds,
        current_round,
        is_active: true,
        is_valid: false,
        notes: None,
        location: None,
        date: registered_at(),
    }
}

/// A resolved ledger row with the score the reconciler would derive.
pub fn row(game_id: i64, round_number: u32, player_id: i64, bet: u32, success: bool) -> Round {
    Round {
        id: 0,
        game_id,
        round_number,
        player_id,
        bet,
        success,
        score: Some(calculate_score(bet, success)),
    }
}

/// A freshly seeded row: no bet recorded, no result.
pub fn seeded(game_id: i64, round_number: u32, player_id: i64) -> Round {
    Round {
        id: 0,
        game_id,
        round_number,
        player_id,
        bet: 0,
        success: false,
        score: None,
    }
}
