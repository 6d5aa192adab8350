//! WebSocket chat stream handler.
//!
//! Each connection runs two tasks:
//!
//! - writer: drains the session's outbound queue into the socket, each write
//!   bounded by `send_timeout`. When the queue closes it sends a Close frame.
//! - reader: parses inbound `ChatRequest` frames and hands them to the
//!   ChatRoute usecase.
//!
//! Whichever finishes first aborts the other, then the session is closed.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use serde::Deserialize;
use tokei_shared::dto::{ChatRequest, ChatResponse};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{OutboundMessage, Username},
    ui::{error::SessionError, state::AppState},
    usecase::{ChatRouteUseCase, Departure},
};

/// Query parameters for the chat stream
#[derive(Debug, Deserialize)]
pub struct ChatRouteQuery {
    pub username: String,
}

pub async fn chat_route_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChatRouteQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let username = match Username::new(query.username) {
        Ok(username) => username,
        Err(e) => {
            tracing::warn!("Rejecting chat stream: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, username)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, username: Username) {
    let (sender, receiver) = socket.split();
    let (tx, rx) = mpsc::channel(state.config.outbound_capacity);

    let usecase = state.chat_route_usecase.clone();
    let id = usecase.open(username.clone(), tx).await;

    let mut send_task = spawn_writer(sender, rx, state.config.send_timeout);
    let mut recv_task = spawn_reader(receiver, usecase.clone(), username.clone());

    // If any one of the tasks completes, abort the other
    let outcome = tokio::select! {
        result = &mut send_task => {
            recv_task.abort();
            result
        }
        result = &mut recv_task => {
            send_task.abort();
            result
        }
    };

    match outcome {
        Ok(Ok(())) => tracing::debug!("Chat stream {} of '{}' finished", id, username),
        Ok(Err(e)) => tracing::warn!("Chat stream {} of '{}' failed: {}", id, username, e),
        Err(e) => tracing::error!("Chat stream {} of '{}' task panicked: {}", id, username, e),
    }

    if usecase.close(id, &username).await == Departure::Abrupt {
        tracing::info!("User: {} left without saying goodbye", username);
    }
}

fn spawn_writer(
    mut sender: SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<OutboundMessage>,
    send_timeout: Duration,
) -> JoinHandle<Result<(), SessionError>> {
    tokio::spawn(async move {
        while let Some(outbound) = rx.recv().await {
            let frame = serde_json::to_string(&ChatResponse::from(outbound))?;
            match tokio::time::timeout(send_timeout, sender.send(Message::Text(frame.into())))
                .await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(SessionError::Write(e)),
                Err(_) => return Err(SessionError::WriteTimeout(send_timeout)),
            }
        }

        // 送信キューが閉じた（レジストリから外れた）ので、ソケットを閉じる
        if let Err(e) = sender.send(Message::Close(None)).await {
            tracing::debug!("Failed to send close frame: {}", e);
        }
        Ok(())
    })
}

fn spawn_reader(
    mut receiver: SplitStream<WebSocket>,
    usecase: Arc<ChatRouteUseCase>,
    username: Username,
) -> JoinHandle<Result<(), SessionError>> {
    tokio::spawn(async move {
        while let Some(message) = receiver.next().await {
            match message.map_err(SessionError::Read)? {
                Message::Text(text) => {
                    let request = match serde_json::from_str::<ChatRequest>(text.as_str()) {
                        Ok(request) => request,
                        Err(e) => {
                            tracing::warn!(
                                "Skipping unparseable frame from '{}': {}",
                                username,
                                e
                            );
                            continue;
                        }
                    };
                    let from =
                        Username::new(request.username).unwrap_or_else(|_| username.clone());
                    usecase.receive(from, request.text, request.timestamp).await;
                }
                Message::Close(_) => {
                    tracing::info!("User '{}' closed the chat stream", username);
                    break;
                }
                _ => {}
            }
        }
        Ok(())
    })
}
