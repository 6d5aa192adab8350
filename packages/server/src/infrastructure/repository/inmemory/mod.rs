//! In-memory repository implementations.

pub mod roster;

pub use roster::InMemoryRosterRepository;
