//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// A roster entry as exposed by `GET /api/state`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDto {
    pub username: String,
    /// RFC 3339, UTC
    pub connected_at: String,
    /// Server Lamport time at admission
    pub timestamp: u64,
}

/// Response of `GET /api/state`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStateDto {
    /// Current server Lamport time
    pub timestamp: u64,
    /// Number of registered chat streams
    pub sessions: usize,
    pub clients: Vec<ClientDto>,
}
