//! Broadcast chat server whose every event is stamped with a Lamport clock.
//!
//! The server keeps one registry of live chat sessions and fans every message
//! out to all of them, while a single process-wide logical clock orders
//! connects, messages and disconnects causally.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
