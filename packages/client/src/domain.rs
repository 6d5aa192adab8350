//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use tokei_shared::{clock::LamportClock, dto::ChatRequest};

use crate::error::ClientError;

/// Longest message text the client will send, in characters
pub const MAX_MESSAGE_LENGTH: usize = 128;

/// What a line typed by the user asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// `/quit`: leave the chat gracefully
    Quit,
    /// Anything else is chat text
    Send(String),
}

impl ClientCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/quit" => ClientCommand::Quit,
            _ => ClientCommand::Send(line.to_string()),
        }
    }
}

/// Check `text` against [`MAX_MESSAGE_LENGTH`].
///
/// Length is counted in characters, not bytes, so multi-byte input is not
/// penalized.
pub fn validate_text(text: &str) -> Result<(), ClientError> {
    let length = text.chars().count();
    if length > MAX_MESSAGE_LENGTH {
        return Err(ClientError::MessageTooLong {
            length,
            max: MAX_MESSAGE_LENGTH,
        });
    }
    Ok(())
}

/// Build the next chat frame, ticking the clock only if the text is accepted.
pub fn compose_message(
    clock: &LamportClock,
    username: &str,
    text: String,
) -> Result<ChatRequest, ClientError> {
    validate_text(&text)?;
    Ok(ChatRequest {
        username: username.to_string(),
        text,
        timestamp: clock.tick(),
    })
}
