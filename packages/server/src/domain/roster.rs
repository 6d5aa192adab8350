//! RosterRepository trait 定義
//!
//! 接続中ユーザー名の一覧（オペレーターの `/clients` 用）へのインターフェース。
//! 因果順序には関与しません。

use async_trait::async_trait;

use super::{RosterEntry, Username};

/// Ordered list of connected usernames
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Append an entry at the end of the roster.
    async fn add(&self, entry: RosterEntry);

    /// Remove the first entry with the given username.
    ///
    /// Returns `false` if no entry matched.
    async fn remove(&self, username: &Username) -> bool;

    /// All entries in admission order.
    async fn list(&self) -> Vec<RosterEntry>;
}
