//! InMemory Roster Repository 実装
//!
//! ドメイン層が定義する RosterRepository trait の具体的な実装。
//! `Vec` を接続順のインメモリ DB として使用します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RosterEntry, RosterRepository, Username};

/// インメモリ Roster Repository 実装
pub struct InMemoryRosterRepository {
    /// 接続順のエントリ
    entries: Mutex<Vec<RosterEntry>>,
}

impl InMemoryRosterRepository {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryRosterRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn add(&self, entry: RosterEntry) {
        self.entries.lock().await.push(entry);
    }

    async fn remove(&self, username: &Username) -> bool {
        let mut entries = self.entries.lock().await;
        match entries.iter().position(|entry| &entry.username == username) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    async fn list(&self) -> Vec<RosterEntry> {
        self.entries.lock().await.clone()
    }
}
