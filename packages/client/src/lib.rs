//! Command-line chat client for the Tokei broadcast chat.

pub mod api;
pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
