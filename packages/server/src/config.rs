//! Server tuning knobs.

use std::time::Duration;

/// Per-session limits applied to every chat stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Frames a session may have queued before it is treated as stalled
    pub outbound_capacity: usize,
    /// Upper bound for writing one frame to a client socket
    pub send_timeout: Duration,
}

impl ServerConfig {
    pub const DEFAULT_OUTBOUND_CAPACITY: usize = 64;
    pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            outbound_capacity: Self::DEFAULT_OUTBOUND_CAPACITY,
            send_timeout: Self::DEFAULT_SEND_TIMEOUT,
        }
    }
}
