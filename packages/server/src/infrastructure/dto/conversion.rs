//! Conversion logic between DTOs and domain entities.

use tokei_shared::{
    dto::{ChatResponse, ConnectResponse, DisconnectResponse},
    time::millis_to_rfc3339,
};

use crate::{
    domain::{OutboundMessage, RosterEntry},
    usecase::{Reply, ServerState},
};

use super::http::{ClientDto, ServerStateDto};

// ========================================
// Domain → DTO
// ========================================

impl From<OutboundMessage> for ChatResponse {
    fn from(model: OutboundMessage) -> Self {
        Self {
            message: model.message,
            timestamp: model.timestamp,
        }
    }
}

impl From<RosterEntry> for ClientDto {
    fn from(model: RosterEntry) -> Self {
        Self {
            username: model.username.into_string(),
            connected_at: millis_to_rfc3339(model.connected_at),
            timestamp: model.timestamp,
        }
    }
}

impl From<ServerState> for ServerStateDto {
    fn from(model: ServerState) -> Self {
        Self {
            timestamp: model.timestamp,
            sessions: model.sessions,
            clients: model.roster.into_iter().map(ClientDto::from).collect(),
        }
    }
}

impl From<Reply> for ConnectResponse {
    fn from(reply: Reply) -> Self {
        Self {
            message: reply.message,
            timestamp: reply.timestamp,
        }
    }
}

impl From<Reply> for DisconnectResponse {
    fn from(reply: Reply) -> Self {
        Self {
            message: reply.message,
            timestamp: reply.timestamp,
        }
    }
}
