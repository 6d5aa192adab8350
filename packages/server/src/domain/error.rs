//! Domain errors.

use thiserror::Error;

use super::model::SessionId;

/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username is too long ({length} > {max} characters)")]
    UsernameTooLong { length: usize, max: usize },
}

/// Failure to hand a message to one session's outbound queue
///
/// Either variant means the session can no longer be served and must be
/// removed from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The writer side of the session is gone (socket closed or write timed out)
    #[error("session {0} is closed")]
    Closed(SessionId),

    /// The client is not draining its queue fast enough
    #[error("outbound queue of session {0} is full")]
    Backpressure(SessionId),
}
