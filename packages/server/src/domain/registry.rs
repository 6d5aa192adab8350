//! SessionRegistry trait 定義
//!
//! 接続中のチャットストリームを管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{DeliveryError, Session, SessionChannel, SessionId, Username};

/// Callback applied to every live session by [`SessionRegistry::for_each`]
pub type SessionVisitor<'a> = dyn FnMut(&Session) -> Result<(), DeliveryError> + Send + 'a;

/// Collection of live chat sessions, in admission order.
///
/// Membership changes are atomic with respect to [`SessionRegistry::for_each`]:
/// a traversal never sees a half-added or half-removed session.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Register a new session and return its identifier.
    async fn add(&self, username: Username, outbound: SessionChannel) -> SessionId;

    /// Remove a session by identity. Removing an absent session is a no-op.
    async fn remove(&self, id: SessionId) -> Option<Session>;

    /// Apply `visit` to every live session in admission order.
    ///
    /// Sessions for which `visit` fails are removed after the traversal and
    /// returned.
    async fn for_each(&self, visit: &mut SessionVisitor<'_>) -> Vec<Session>;

    /// Snapshot of the live sessions in admission order.
    async fn sessions(&self) -> Vec<Session>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
