//! Code shared by the Tokei server and client.
//!
//! - `clock`: Lamport logical clock, one per process
//! - `dto`: wire messages exchanged between client and server
//! - `logger`: tracing subscriber setup
//! - `time`: wall-clock helpers for human-facing output

pub mod clock;
pub mod dto;
pub mod logger;
pub mod time;
