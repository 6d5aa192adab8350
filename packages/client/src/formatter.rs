//! Message formatting utilities for client display.

use tokei_shared::dto::ChatResponse;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the reply to Connect or Disconnect
    ///
    /// # Arguments
    ///
    /// * `message` - The server's reply text (e.g. "Welcome to the chat alice!")
    /// * `timestamp` - Lamport time the server stamped the reply with
    pub fn format_reply(message: &str, timestamp: u64) -> String {
        format!("\n{} (t={})\n", message, timestamp)
    }

    /// Format a broadcast received on the chat stream
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame as received from the server
    /// * `local_time` - The client's Lamport time after observing the frame
    pub fn format_broadcast(frame: &ChatResponse, local_time: u64) -> String {
        format!(
            "\n[t={} | local {}] {}\n",
            frame.timestamp, local_time, frame.message
        )
    }

    /// Format a confirmation message after sending
    pub fn format_sent_confirmation(timestamp: u64) -> String {
        format!("sent at t={}\n", timestamp)
    }

    /// Format the notice shown when input exceeds the length limit
    pub fn format_too_long(length: usize, max: usize) -> String {
        format!(
            "Message not sent: {} characters, at most {} allowed. Please try again.\n",
            length, max
        )
    }

    /// Format a raw text frame (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
