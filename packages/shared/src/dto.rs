//! Wire messages exchanged between client and server.
//!
//! Admission and departure are single request / single reply exchanges
//! (`POST /connect`, `POST /disconnect`); chat traffic flows as JSON text frames
//! over the `/chat` WebSocket. Every message carries the sender's Lamport
//! timestamp.

use serde::{Deserialize, Serialize};

/// Admission request sent to `POST /connect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectRequest {
    pub username: String,
    pub timestamp: u64,
}

/// Single reply to a [`ConnectRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectResponse {
    pub message: String,
    pub timestamp: u64,
}

/// Graceful departure request sent to `POST /disconnect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisconnectRequest {
    pub username: String,
    pub timestamp: u64,
}

/// Single reply to a [`DisconnectRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisconnectResponse {
    pub message: String,
    pub timestamp: u64,
}

/// Client-to-server frame on the chat stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub username: String,
    pub text: String,
    pub timestamp: u64,
}

/// Server-to-client frame on the chat stream.
///
/// `message` is already rendered, including the sender's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub timestamp: u64,
}
