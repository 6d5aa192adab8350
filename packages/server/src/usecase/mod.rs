//! UseCase layer: the session lifecycle and the broadcast router.
//!
//! Every operation here is also a Lamport clock event on the server's clock.

pub mod broadcast;
pub mod chat_route;
pub mod connect;
pub mod departure;
pub mod disconnect;
pub mod error;
pub mod server_state;

pub use broadcast::{BroadcastReport, BroadcastRouter};
pub use chat_route::{ChatRouteUseCase, Departure};
pub use connect::ConnectUseCase;
pub use departure::DepartureLedger;
pub use disconnect::DisconnectUseCase;
pub use error::{ConnectError, DisconnectError};
pub use server_state::{GetServerStateUseCase, ServerState};

/// The single reply to an admission or departure request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub timestamp: u64,
}
