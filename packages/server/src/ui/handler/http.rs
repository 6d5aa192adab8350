//! HTTP endpoint handlers.
//!
//! `POST /connect` and `POST /disconnect` are single request / single reply
//! exchanges; the rest is read-only inspection.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use tokei_shared::dto::{ConnectRequest, ConnectResponse, DisconnectRequest, DisconnectResponse};

use crate::{infrastructure::dto::http::ServerStateDto, ui::state::AppState};

/// Admission handshake
pub async fn connect(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConnectRequest>,
) -> Result<Json<ConnectResponse>, StatusCode> {
    match state
        .connect_usecase
        .execute(request.username, request.timestamp)
        .await
    {
        Ok(reply) => Ok(Json(reply.into())),
        Err(e) => {
            tracing::warn!("Rejecting connect request: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// Graceful departure
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DisconnectRequest>,
) -> Result<Json<DisconnectResponse>, StatusCode> {
    match state
        .disconnect_usecase
        .execute(request.username, request.timestamp)
        .await
    {
        Ok(reply) => Ok(Json(reply.into())),
        Err(e) => {
            tracing::warn!("Rejecting disconnect request: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current clock, session count and roster
pub async fn server_state(State(state): State<Arc<AppState>>) -> Json<ServerStateDto> {
    Json(state.get_server_state_usecase.execute().await.into())
}
