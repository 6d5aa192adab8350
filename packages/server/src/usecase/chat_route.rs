//! UseCase: チャットストリーム（ChatRoute）処理
//!
//! 1 本の双方向ストリームの一生を扱います。
//!
//! - `open`: ストリームをレジストリに登録
//! - `receive`: 受信フレームの時刻を取り込み、ログに残し、ブロードキャスト
//! - `close`: ストリーム終了時の後始末。退出台帳に記録がなければ Roster からも外す

use std::sync::Arc;

use tokei_shared::clock::LamportClock;

use crate::domain::{
    RoomEvent, RosterRepository, SessionChannel, SessionId, SessionRegistry, Username,
};

use super::{BroadcastReport, BroadcastRouter, DepartureLedger};

/// How a chat stream ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// A Disconnect request was accepted before the stream closed
    Graceful,
    /// The stream ended without a Disconnect, or was dropped by a failed delivery
    Abrupt,
}

/// チャットストリームのユースケース
pub struct ChatRouteUseCase {
    clock: Arc<LamportClock>,
    roster: Arc<dyn RosterRepository>,
    registry: Arc<dyn SessionRegistry>,
    router: Arc<BroadcastRouter>,
    departures: Arc<DepartureLedger>,
}

impl ChatRouteUseCase {
    pub fn new(
        clock: Arc<LamportClock>,
        roster: Arc<dyn RosterRepository>,
        registry: Arc<dyn SessionRegistry>,
        router: Arc<BroadcastRouter>,
        departures: Arc<DepartureLedger>,
    ) -> Self {
        Self {
            clock,
            roster,
            registry,
            router,
            departures,
        }
    }

    /// Register a freshly opened chat stream.
    pub async fn open(&self, username: Username, outbound: SessionChannel) -> SessionId {
        let id = self.registry.add(username.clone(), outbound).await;
        tracing::info!("User: {} opened chat stream {}", username, id);
        id
    }

    /// Handle one inbound frame.
    ///
    /// Returns the broadcast report, or `None` if the text was empty.
    pub async fn receive(
        &self,
        from: Username,
        text: String,
        timestamp: u64,
    ) -> Option<BroadcastReport> {
        let now = self.clock.observe(timestamp);
        tracing::info!("User: {} said: {} at time: {}", from, text, timestamp);
        tracing::debug!("Server time after receive: {}", now);

        self.router.broadcast(RoomEvent::Chat { from, text }).await
    }

    /// Tear down a chat stream whose reader or writer has finished.
    ///
    /// The session may already be gone from the registry if a broadcast
    /// dropped it; the roster entry is still released unless a Disconnect
    /// was recorded for this user.
    pub async fn close(&self, id: SessionId, username: &Username) -> Departure {
        if self.registry.remove(id).await.is_none() {
            tracing::debug!("Chat stream {} was already unregistered", id);
        }

        if self.departures.take(username).await {
            tracing::info!("User: {} closed chat stream {}", username, id);
            return Departure::Graceful;
        }

        if !self.roster.remove(username).await {
            tracing::debug!("User '{}' was not on the roster", username);
        }
        tracing::warn!(
            "User: {} dropped chat stream {} without disconnecting",
            username,
            id
        );
        Departure::Abrupt
    }
}
