//! インメモリ SessionRegistry 実装
//!
//! ## 責務
//!
//! - 接続中セッションの送信キュー（`SessionChannel`）を保持
//! - `SessionId` の払い出し
//! - ブロードキャスト時の走査と、配信に失敗したセッションの除去
//!
//! ## 設計ノート
//!
//! `SessionId` は単調増加なので、`BTreeMap` の順序がそのまま接続順になります。
//! `for_each` はロック中にスナップショットを取ってすぐ解放し、配信はロック外で行います。
//! 配信に失敗したセッションは走査後にまとめて除去します。

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Session, SessionChannel, SessionId, SessionRegistry, Username, registry::SessionVisitor,
};

/// インメモリ SessionRegistry 実装
pub struct InMemorySessionRegistry {
    /// 接続中のセッション（Key: SessionId）
    sessions: Mutex<BTreeMap<SessionId, Session>>,
    /// 次に払い出す SessionId
    next_id: AtomicU64,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn add(&self, username: Username, outbound: SessionChannel) -> SessionId {
        let mut sessions = self.sessions.lock().await;
        // allocated under the lock so that id order equals insertion order
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        sessions.insert(id, Session::new(id, username, outbound));
        tracing::debug!("Session {} registered ({} live)", id, sessions.len());
        id
    }

    async fn remove(&self, id: SessionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(&id);
        if removed.is_some() {
            tracing::debug!("Session {} unregistered ({} live)", id, sessions.len());
        }
        removed
    }

    async fn for_each(&self, visit: &mut SessionVisitor<'_>) -> Vec<Session> {
        let snapshot: Vec<Session> = self.sessions.lock().await.values().cloned().collect();

        let failed: Vec<SessionId> = snapshot
            .iter()
            .filter_map(|session| match visit(session) {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!(
                        "Dropping session {} of '{}': {}",
                        session.id,
                        session.username,
                        e
                    );
                    Some(session.id)
                }
            })
            .collect();

        if failed.is_empty() {
            return Vec::new();
        }

        let mut sessions = self.sessions.lock().await;
        failed
            .into_iter()
            .filter_map(|id| sessions.remove(&id))
            .collect()
    }

    async fn sessions(&self) -> Vec<Session> {
        self.sessions.lock().await.values().cloned().collect()
    }

    async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeliveryError, OutboundMessage};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - add / remove の基本動作
    // - for_each の走査順序と失敗セッションの除去
    //
    // 【なぜこのテストが必要か】
    // - ブロードキャストは for_each に依存しており、順序と除去の保証が中核
    // - remove の冪等性は切断処理の二重実行を安全にする
    // ========================================

    fn username(value: &str) -> Username {
        Username::new(value.to_string()).unwrap()
    }

    fn message(text: &str) -> OutboundMessage {
        OutboundMessage {
            message: text.to_string(),
            timestamp: 1,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_increasing_ids_in_insertion_order() {
        // テスト項目: add は単調増加する SessionId を払い出し、接続順で列挙される
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let (tx, _rx) = mpsc::channel(4);

        // when (操作):
        let a = registry.add(username("alice"), tx.clone()).await;
        let b = registry.add(username("bob"), tx.clone()).await;
        let c = registry.add(username("alice"), tx).await;

        // then (期待する結果):
        assert!(a < b && b < c);
        let names: Vec<String> = registry
            .sessions()
            .await
            .into_iter()
            .map(|s| s.username.into_string())
            .collect();
        assert_eq!(names, vec!["alice", "bob", "alice"]);
    }

    #[tokio::test]
    async fn test_remove_preserves_order_of_remaining() {
        // テスト項目: 途中のセッションを削除しても残りの順序は保たれる
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let (tx, _rx) = mpsc::channel(4);
        let a = registry.add(username("a"), tx.clone()).await;
        let b = registry.add(username("b"), tx.clone()).await;
        let c = registry.add(username("c"), tx).await;

        // when (操作):
        let removed = registry.remove(b).await;

        // then (期待する結果):
        assert_eq!(removed.map(|s| s.id), Some(b));
        let ids: Vec<SessionId> = registry.sessions().await.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[tokio::test]
    async fn test_remove_absent_session_is_noop() {
        // テスト項目: 存在しないセッションの削除は何もせずエラーにもならない
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let (tx, _rx) = mpsc::channel(4);
        let a = registry.add(username("a"), tx).await;
        registry.remove(a).await;

        // when (操作):
        let again = registry.remove(a).await;
        let never = registry.remove(SessionId::new(999)).await;

        // then (期待する結果):
        assert!(again.is_none());
        assert!(never.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_for_each_visits_in_order_and_drops_failures() {
        // テスト項目: for_each は接続順に走査し、失敗したセッションだけを除去する
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, rx_b) = mpsc::channel(4);
        let (tx_c, mut rx_c) = mpsc::channel(4);
        let a = registry.add(username("a"), tx_a).await;
        let b = registry.add(username("b"), tx_b).await;
        let c = registry.add(username("c"), tx_c).await;
        drop(rx_b);

        // when (操作):
        let mut visited = Vec::new();
        let removed = registry
            .for_each(&mut |session: &Session| -> Result<(), DeliveryError> {
                visited.push(session.id);
                session.deliver(message("hello"))
            })
            .await;

        // then (期待する結果):
        assert_eq!(visited, vec![a, b, c]);
        assert_eq!(removed.iter().map(|s| s.id).collect::<Vec<_>>(), vec![b]);
        assert_eq!(rx_a.recv().await, Some(message("hello")));
        assert_eq!(rx_c.recv().await, Some(message("hello")));
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_for_each_failed_session_is_removed_once() {
        // テスト項目: 配信に失敗したセッションは走査後に一度だけ除去される
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let (tx, _rx) = mpsc::channel(4);
        let a = registry.add(username("a"), tx).await;

        // when (操作):
        let removed = registry
            .for_each(&mut |session: &Session| -> Result<(), DeliveryError> {
                Err(DeliveryError::Closed(session.id))
            })
            .await;
        let removed_again = registry.remove(a).await;

        // then (期待する結果):
        assert_eq!(removed.len(), 1);
        assert!(removed_again.is_none());
    }
}
