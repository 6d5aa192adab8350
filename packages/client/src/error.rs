//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the Connect or Disconnect request
    #[error("Server refused request: {0}")]
    Admission(String),

    /// HTTP or WebSocket transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// A frame could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input longer than the per-message limit; recovered locally
    #[error("Message is {length} characters long, the limit is {max}")]
    MessageTooLong { length: usize, max: usize },

    /// The server closed the chat stream unexpectedly
    #[error("Connection lost")]
    ConnectionLost,
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ClientError::Admission(status.to_string()),
            None => ClientError::Transport(e.to_string()),
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}
