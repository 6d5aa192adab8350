//! Entities and value objects of the chat room.

use std::fmt;

use tokio::sync::mpsc::{self, error::TrySendError};

use super::error::{DeliveryError, DomainError};

/// Stable identifier assigned to a session when it is registered.
///
/// Identifiers are handed out in increasing order, so ordering by id is
/// ordering by admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display name chosen by a client.
///
/// Usernames are labels, not identifiers: two sessions may share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub const MAX_LENGTH: usize = 64;

    /// Trims surrounding whitespace and validates the result.
    pub fn new(value: String) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DomainError::UsernameTooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rendered, timestamped message on its way to one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub message: String,
    pub timestamp: u64,
}

/// Write capability for one client's chat stream
pub type SessionChannel = mpsc::Sender<OutboundMessage>;

/// One connected chat stream.
///
/// The session does not own the network connection, only a bounded queue that
/// the connection's writer task drains.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub username: Username,
    outbound: SessionChannel,
}

impl Session {
    pub fn new(id: SessionId, username: Username, outbound: SessionChannel) -> Self {
        Self {
            id,
            username,
            outbound,
        }
    }

    /// Queue a message for this client without waiting.
    pub fn deliver(&self, message: OutboundMessage) -> Result<(), DeliveryError> {
        self.outbound.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::Backpressure(self.id),
            TrySendError::Closed(_) => DeliveryError::Closed(self.id),
        })
    }
}

/// A connected user as listed by the operator's `/clients` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub username: Username,
    /// Wall-clock admission time, Unix milliseconds (UTC)
    pub connected_at: i64,
    /// Server Lamport time at admission
    pub timestamp: u64,
}

/// Something that happened in the room and is announced to everyone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    Joined(Username),
    Left(Username),
    Chat { from: Username, text: String },
}

impl RoomEvent {
    /// Chat events without text are never broadcast.
    pub fn is_empty(&self) -> bool {
        matches!(self, RoomEvent::Chat { text, .. } if text.is_empty())
    }

    /// The line every client sees.
    pub fn render(&self) -> String {
        match self {
            RoomEvent::Joined(username) => format!("{} has connected", username),
            RoomEvent::Left(username) => format!("{} has disconnected", username),
            RoomEvent::Chat { from, text } => format!("{}: {}", from, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn username(value: &str) -> Username {
        Username::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_username_is_trimmed() {
        // テスト項目: ユーザー名の前後の空白が取り除かれる
        // given (前提条件):
        let raw = "  alice \n".to_string();

        // when (操作):
        let result = Username::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_username_rejects_blank() {
        // テスト項目: 空白のみのユーザー名は拒否される
        // given (前提条件):
        let raw = "   ".to_string();

        // when (操作):
        let result = Username::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::EmptyUsername));
    }

    #[test]
    fn test_username_rejects_too_long() {
        // テスト項目: 65 文字のユーザー名は拒否され、64 文字は受け入れられる
        // given (前提条件):
        let max = "a".repeat(Username::MAX_LENGTH);
        let over = "a".repeat(Username::MAX_LENGTH + 1);

        // when (操作):
        let ok = Username::new(max);
        let err = Username::new(over);

        // then (期待する結果):
        assert!(ok.is_ok());
        assert_eq!(
            err,
            Err(DomainError::UsernameTooLong {
                length: 65,
                max: 64
            })
        );
    }

    #[test]
    fn test_room_event_render() {
        // テスト項目: 各イベントがクライアント向けの文字列に整形される
        // given (前提条件):
        let alice = username("alice");

        // when (操作):
        let joined = RoomEvent::Joined(alice.clone()).render();
        let left = RoomEvent::Left(alice.clone()).render();
        let chat = RoomEvent::Chat {
            from: alice,
            text: "hi".to_string(),
        }
        .render();

        // then (期待する結果):
        assert_eq!(joined, "alice has connected");
        assert_eq!(left, "alice has disconnected");
        assert_eq!(chat, "alice: hi");
    }

    #[test]
    fn test_only_chat_without_text_is_empty() {
        // テスト項目: テキストが空のチャットイベントだけが空とみなされる
        // given (前提条件):
        let alice = username("alice");

        // when (操作):
        let empty_chat = RoomEvent::Chat {
            from: alice.clone(),
            text: String::new(),
        };
        let joined = RoomEvent::Joined(alice);

        // then (期待する結果):
        assert!(empty_chat.is_empty());
        assert!(!joined.is_empty());
    }

    #[tokio::test]
    async fn test_deliver_reports_full_and_closed_queues() {
        // テスト項目: キューが満杯なら Backpressure、受信側が閉じていれば Closed を返す
        // given (前提条件):
        let (tx, rx) = mpsc::channel(1);
        let session = Session::new(SessionId::new(7), username("alice"), tx);
        let message = OutboundMessage {
            message: "x".to_string(),
            timestamp: 1,
        };

        // when (操作):
        let first = session.deliver(message.clone());
        let second = session.deliver(message.clone());
        drop(rx);
        let third = session.deliver(message);

        // then (期待する結果):
        assert!(first.is_ok());
        assert_eq!(second, Err(DeliveryError::Backpressure(SessionId::new(7))));
        assert_eq!(third, Err(DeliveryError::Closed(SessionId::new(7))));
    }
}
