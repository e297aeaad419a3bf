//! Domain-level error type used across services and adapters.
//!
//! This error type is transport- and store-agnostic. Every operation in the
//! crate returns `Result<T, DomainError>`; an embedding application maps these
//! onto whatever surface it exposes. No variant is fatal to the process: all
//! of them describe a rejected or failed user action that can be retried or
//! corrected.

use thiserror::Error;

/// Infra error kinds to distinguish operational failures in the external store
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    StoreUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Game,
    Round,
    Other(String),
}

/// Domain-level conflict kinds: a precondition on the current state failed
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Another game already holds the single Active slot.
    ActiveGameExists,
    /// The operation requires an Active game.
    GameNotActive,
    /// Finishing was attempted before the last round.
    UnfinishedRounds,
    /// The round being edited has not been opened yet.
    RoundNotOpen,
    /// The player still has ledger rows and cannot be deleted.
    PlayerHasHistory,
    /// The alias is already taken by another player.
    AliasTaken,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Input/user validation or business rule violation, rejected before any
    /// mutation is attempted.
    #[error("validation error: {0}")]
    Validation(String),
    /// Semantic conflict with the current state.
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms.
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// One write of a multi-row batch (round seeding) failed. The ledger is
    /// left idempotent-retriable: re-running the same operation completes the
    /// remaining rows without duplicating the ones already written.
    #[error("batch write failed at round {round_number}, player {player_id}: {source}")]
    PartialBatch {
        round_number: u32,
        player_id: i64,
        #[source]
        source: Box<DomainError>,
    },
    /// Infrastructure/operational failures in the external store.
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
    pub fn partial_batch(round_number: u32, player_id: i64, source: DomainError) -> Self {
        Self::PartialBatch {
            round_number,
            player_id,
            source: Box::new(source),
        }
    }
}
