//! Domain layer: entities, value objects and the traits the outer layers implement.

pub mod error;
pub mod model;
pub mod registry;
pub mod roster;

pub use error::{DeliveryError, DomainError};
pub use model::{
    OutboundMessage, RoomEvent, RosterEntry, Session, SessionChannel, SessionId, Username,
};
pub use registry::SessionRegistry;
pub use roster::RosterRepository;

#[cfg(test)]
pub use roster::MockRosterRepository;
