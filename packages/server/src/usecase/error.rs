//! UseCase errors.

use thiserror::Error;

use crate::domain::DomainError;

/// Admission failure
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] DomainError),
}

/// Departure failure
#[derive(Debug, Error)]
pub enum DisconnectError {
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] DomainError),
}
