//! UseCase: 参加（アドミッション）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectUseCase::execute() メソッド
//! - クライアントのタイムスタンプ取り込み、Roster への追加、参加通知のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 返信のタイムスタンプがリクエストと参加通知の両方より後であることを保証
//! - 不正なユーザー名では状態が一切変わらないことを確認

use std::sync::Arc;

use tokei_shared::{clock::LamportClock, time::WallClock};

use crate::domain::{RoomEvent, RosterEntry, RosterRepository, Username};

use super::{BroadcastRouter, Reply, error::ConnectError};

/// 参加のユースケース
pub struct ConnectUseCase {
    clock: Arc<LamportClock>,
    roster: Arc<dyn RosterRepository>,
    router: Arc<BroadcastRouter>,
    wall_clock: Arc<dyn WallClock>,
}

impl ConnectUseCase {
    pub fn new(
        clock: Arc<LamportClock>,
        roster: Arc<dyn RosterRepository>,
        router: Arc<BroadcastRouter>,
        wall_clock: Arc<dyn WallClock>,
    ) -> Self {
        Self {
            clock,
            roster,
            router,
            wall_clock,
        }
    }

    /// 参加を実行
    ///
    /// # Arguments
    ///
    /// * `username` - 参加するユーザー名
    /// * `timestamp` - クライアントが参加要求に付けた Lamport 時刻
    ///
    /// # Returns
    ///
    /// * `Ok(Reply)` - ウェルカムメッセージと返信時の Lamport 時刻
    /// * `Err(ConnectError)` - ユーザー名が不正
    pub async fn execute(&self, username: String, timestamp: u64) -> Result<Reply, ConnectError> {
        let username = Username::new(username)?;

        let now = self.clock.observe(timestamp);
        tracing::info!("User: {} connected at time: {}", username, now);

        self.roster
            .add(RosterEntry {
                username: username.clone(),
                connected_at: self.wall_clock.now_millis(),
                timestamp: now,
            })
            .await;

        self.router
            .broadcast(RoomEvent::Joined(username.clone()))
            .await;

        Ok(Reply {
            message: format!("Welcome to the chat {}!", username),
            timestamp: self.clock.tick(),
        })
    }
}
