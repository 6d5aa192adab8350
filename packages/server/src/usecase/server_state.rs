//! UseCase: サーバー状態の取得
//!
//! オペレーターコンソール（`/timestamp`, `/clients`）と `GET /api/state` から使われます。
//! 読み取りのみで、クロックは進めません。

use std::sync::Arc;

use tokei_shared::clock::LamportClock;

use crate::domain::{RosterEntry, RosterRepository, SessionRegistry};

/// Point-in-time view of the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerState {
    pub timestamp: u64,
    pub sessions: usize,
    pub roster: Vec<RosterEntry>,
}

/// サーバー状態取得のユースケース
pub struct GetServerStateUseCase {
    clock: Arc<LamportClock>,
    roster: Arc<dyn RosterRepository>,
    registry: Arc<dyn SessionRegistry>,
}

impl GetServerStateUseCase {
    pub fn new(
        clock: Arc<LamportClock>,
        roster: Arc<dyn RosterRepository>,
        registry: Arc<dyn SessionRegistry>,
    ) -> Self {
        Self {
            clock,
            roster,
            registry,
        }
    }

    /// Current server Lamport time.
    pub fn timestamp(&self) -> u64 {
        self.clock.now()
    }

    /// Connected usernames in admission order.
    pub async fn roster(&self) -> Vec<RosterEntry> {
        self.roster.list().await
    }

    pub async fn execute(&self) -> ServerState {
        ServerState {
            timestamp: self.timestamp(),
            sessions: self.registry.len().await,
            roster: self.roster().await,
        }
    }
}
