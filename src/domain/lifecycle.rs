//! Game lifecycle transition checks.
//!
//! Pure precondition predicates for the game state machine. Services call
//! these before any mutation so that a rejected transition never touches the
//! store.

use crate::domain::models::Game;
use crate::errors::domain::{ConflictKind, DomainError};

/// The operation requires the game to be open for editing.
pub fn ensure_active(game: &Game) -> Result<(), DomainError> {
    if !game.is_active {
        return Err(DomainError::conflict(
            ConflictKind::GameNotActive,
            format!("game {} is not active", game.id),
        ));
    }
    Ok(())
}

/// Finishing is only legal once every round has been opened.
pub fn ensure_can_finish(game: &Game) -> Result<(), DomainError> {
    ensure_active(game)?;
    if game.current_round != game.total_rounds {
        return Err(DomainError::conflict(
            ConflictKind::UnfinishedRounds,
            format!(
                "cannot finish at round {} of {}; all rounds must be played",
                game.current_round, game.total_rounds
            ),
        ));
    }
    Ok(())
}

/// Advancing is only legal while rounds remain.
pub fn ensure_can_advance(game: &Game) -> Result<(), DomainError> {
    ensure_active(game)?;
    if game.current_round >= game.total_rounds {
        return Err(DomainError::conflict(
            ConflictKind::UnfinishedRounds,
            format!(
                "already at the last round ({} of {})",
                game.current_round, game.total_rounds
            ),
        ));
    }
    Ok(())
}

/// A cell may only be edited once its round has been opened: within
/// `[1, total_rounds]` and not beyond `current_round`.
pub fn ensure_editable_round(game: &Game, round_number: u32) -> Result<(), DomainError> {
    crate::domain::rules::validate_round_number(round_number, game.total_rounds)?;
    if round_number > game.current_round {
        return Err(DomainError::conflict(
            ConflictKind::RoundNotOpen,
            format!(
                "round {} has not been opened yet (current round is {})",
                round_number, game.current_round
            ),
        ));
    }
    Ok(())
}

/// Reactivation must not break the single-active-game invariant.
///
/// `active` is the currently active game, if any, as loaded from the store
/// immediately before the transition.
pub fn ensure_can_reactivate(game: &Game, active: Option<&Game>) -> Result<(), DomainError> {
    if let Some(other) = active {
        if other.id != game.id {
            return Err(DomainError::conflict(
                ConflictKind::ActiveGameExists,
                format!(
                    "game {} is already active; deactivate it before reactivating game {}",
                    other.id, game.id
                ),
            ));
        }
    }
    Ok(())
}
