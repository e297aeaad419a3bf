//! Adapters for external dependencies.

pub mod memory;

pub use memory::MemoryStore;
