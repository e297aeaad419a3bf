//! Repository traits: the seam to the external data service.
//!
//! The core never talks to a database or an HTTP client directly; it sees
//! the REST-shaped collaborator through these traits. `adapters::memory`
//! provides the in-process reference implementation.

pub mod games;
pub mod players;
pub mod rounds;

pub use games::{GameCreate, GameRepo};
pub use players::{PlayerCreate, PlayerRepo, PlayerUpdate};
pub use rounds::{RoundRepo, RoundUpsert};
