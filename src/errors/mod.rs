//! Error handling for the Parvis core.

pub mod domain;

pub use domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
