//! UseCase: 退出（グレースフル）処理
//!
//! Roster から外し、退出通知をブロードキャストした後、退出を台帳に記録します。
//! チャットストリームはレジストリに残し、クライアントが自分のストリームを
//! 閉じた時点で外れます。台帳があるので、その終了は退出済みとして扱われます。

use std::sync::Arc;

use tokei_shared::clock::LamportClock;

use crate::domain::{RoomEvent, RosterRepository, SessionRegistry, Username};

use super::{BroadcastRouter, DepartureLedger, Reply, error::DisconnectError};

/// 退出のユースケース
pub struct DisconnectUseCase {
    clock: Arc<LamportClock>,
    roster: Arc<dyn RosterRepository>,
    registry: Arc<dyn SessionRegistry>,
    router: Arc<BroadcastRouter>,
    departures: Arc<DepartureLedger>,
}

impl DisconnectUseCase {
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

    /// 退出を実行
    ///
    /// # Arguments
    ///
    /// * `username` - 退出するユーザー名
    /// * `timestamp` - クライアントが退出要求に付けた Lamport 時刻
    pub async fn execute(
        &self,
        username: String,
        timestamp: u64,
    ) -> Result<Reply, DisconnectError> {
        let username = Username::new(username)?;

        let now = self.clock.observe(timestamp);
        tracing::info!("User: {} disconnected at time: {}", username, now);

        if !self.roster.remove(&username).await {
            tracing::warn!("User '{}' was not on the roster", username);
        }

        self.router
            .broadcast(RoomEvent::Left(username.clone()))
            .await;

        let live_streams = self
            .registry
            .sessions()
            .await
            .iter()
            .filter(|session| session.username == username)
            .count();
        if !self.departures.record(&username, live_streams).await {
            tracing::debug!("User '{}' had no chat stream left to close", username);
        }

        Ok(Reply {
            message: format!("Goodbye {}!", username),
            timestamp: self.clock.tick(),
        })
    }
}
