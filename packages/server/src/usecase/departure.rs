//! 退出台帳
//!
//! 退出要求（Disconnect）を受け付けたユーザー名を、そのユーザーのストリームが
//! 閉じるまで覚えておきます。ストリームの終了時に台帳を引くことで、
//! 退出要求を経た終了か、要求なしで切れたのかを判定します。
//!
//! 同名のユーザーが複数いる場合は、ユーザー名ごとの件数で管理します。

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::Username;

/// Disconnects whose chat streams have not closed yet
#[derive(Debug, Default)]
pub struct DepartureLedger {
    pending: Mutex<HashMap<Username, usize>>,
}

impl DepartureLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a Disconnect for `username`.
    ///
    /// At most `live_streams` departures are kept pending per username.
    /// Returns `false` when every live stream already has one.
    pub async fn record(&self, username: &Username, live_streams: usize) -> bool {
        let mut pending = self.pending.lock().await;
        let count = pending.entry(username.clone()).or_insert(0);
        if *count >= live_streams {
            if *count == 0 {
                pending.remove(username);
            }
            return false;
        }
        *count += 1;
        true
    }

    /// Consume one pending departure for `username`, if any.
    pub async fn take(&self, username: &Username) -> bool {
        let mut pending = self.pending.lock().await;
        match pending.get_mut(username) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                pending.remove(username);
                true
            }
            None => false,
        }
    }

    pub async fn pending(&self, username: &Username) -> usize {
        self.pending.lock().await.get(username).copied().unwrap_or(0)
    }
}
