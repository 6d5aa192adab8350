//! Errors local to one chat connection.
//!
//! None of these are fatal to the server: the affected session is torn down
//! and every other session keeps running.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read from chat stream: {0}")]
    Read(#[source] axum::Error),

    #[error("failed to write to chat stream: {0}")]
    Write(#[source] axum::Error),

    #[error("write to chat stream timed out after {0:?}")]
    WriteTimeout(Duration),

    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}
