//! Structural rules and validation bounds for the Parvis betting game.

use crate::errors::domain::DomainError;

/// Base score awarded for a successful bet, before adding the bet amount.
pub const BASE_SCORE: i64 = 10;

/// Minimum allowed bet value.
pub const MIN_BET: u32 = 0;

/// A game needs at least two roster players.
pub const MIN_ROSTER: usize = 2;

/// A game has at least one round.
pub const MIN_TOTAL_ROUNDS: u32 = 1;

/// A bet is bounded by the round being edited: you cannot bet more tricks
/// than the round number allows.
pub fn validate_bet(bet: u32, round_number: u32) -> Result<(), DomainError> {
    if bet > round_number {
        return Err(DomainError::validation(format!(
            "bet must be between {MIN_BET} and {round_number}, got {bet}"
        )));
    }
    Ok(())
}

pub fn validate_total_rounds(total_rounds: u32) -> Result<(), DomainError> {
    if total_rounds < MIN_TOTAL_ROUNDS {
        return Err(DomainError::validation(format!(
            "total rounds must be at least {MIN_TOTAL_ROUNDS}, got {total_rounds}"
        )));
    }
    Ok(())
}

/// A roster needs at least [`MIN_ROSTER`] distinct players.
pub fn validate_roster(player_ids: &[i64]) -> Result<(), DomainError> {
    if player_ids.len() < MIN_ROSTER {
        return Err(DomainError::validation(format!(
            "a game needs at least {MIN_ROSTER} players, got {}",
            player_ids.len()
        )));
    }
    let mut seen = std::collections::HashSet::new();
    for id in player_ids {
        if !seen.insert(*id) {
            return Err(DomainError::validation(format!(
                "player {id} appears more than once in the roster"
            )));
        }
    }
    Ok(())
}

/// A round number addresses the matrix range `[1, total_rounds]`.
pub fn validate_round_number(round_number: u32, total_rounds: u32) -> Result<(), DomainError> {
    if round_number < 1 || round_number > total_rounds {
        return Err(DomainError::validation(format!(
            "round number must be between 1 and {total_rounds}, got {round_number}"
        )));
    }
    Ok(())
}
