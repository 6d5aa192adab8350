//! ブロードキャストルーター
//!
//! ## 責務
//!
//! - ルームイベントにサーバーの Lamport 時刻を 1 つだけ割り当てる
//! - 登録中の全セッション（送信者自身を含む）へ配信する
//! - 配信に失敗したセッションをレジストリから除去する
//!
//! 1 つのイベントは受信者数に関係なく 1 tick だけ消費します。

use std::sync::Arc;

use tokei_shared::clock::LamportClock;

use crate::domain::{
    DeliveryError, OutboundMessage, RoomEvent, Session, SessionId, SessionRegistry,
};

/// Outcome of one broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Lamport time shared by every delivered copy
    pub timestamp: u64,
    /// Number of sessions the message was queued for
    pub delivered: usize,
    /// Sessions removed because delivery failed
    pub dropped: Vec<SessionId>,
}

/// Fans room events out to every registered session
pub struct BroadcastRouter {
    clock: Arc<LamportClock>,
    registry: Arc<dyn SessionRegistry>,
}

impl BroadcastRouter {
    pub fn new(clock: Arc<LamportClock>, registry: Arc<dyn SessionRegistry>) -> Self {
        Self { clock, registry }
    }

    /// Deliver `event` to every live session.
    ///
    /// Returns `None` without touching the clock when the event is a chat
    /// message with empty text.
    pub async fn broadcast(&self, event: RoomEvent) -> Option<BroadcastReport> {
        if event.is_empty() {
            tracing::debug!("Skipping broadcast of empty message");
            return None;
        }

        let outbound = OutboundMessage {
            message: event.render(),
            timestamp: self.clock.tick(),
        };

        let mut delivered = 0;
        let dropped = self
            .registry
            .for_each(&mut |session: &Session| -> Result<(), DeliveryError> {
                session.deliver(outbound.clone())?;
                delivered += 1;
                Ok(())
            })
            .await;

        tracing::debug!(
            "Broadcasted '{}' at time {} to {} session(s), dropped {}",
            outbound.message,
            outbound.timestamp,
            delivered,
            dropped.len()
        );

        Some(BroadcastReport {
            timestamp: outbound.timestamp,
            delivered,
            dropped: dropped.into_iter().map(|session| session.id).collect(),
        })
    }
}
