//! UI layer: HTTP / WebSocket transport and the operator console.

pub mod console;
pub mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use signal::shutdown_signal;
