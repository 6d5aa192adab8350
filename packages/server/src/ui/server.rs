//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        http::{connect, disconnect, health_check, server_state},
        websocket::chat_route_handler,
    },
    state::AppState,
};

/// Broadcast chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(AppState::in_memory(ServerConfig::default()));
/// server.run("0.0.0.0".to_string(), 10000, shutdown_signal(kill_rx)).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Shared state handed to every handler.
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Build the HTTP router.
    pub fn router(&self) -> Router {
        Router::new()
            // 単発の要求・応答
            .route("/connect", post(connect))
            .route("/disconnect", post(disconnect))
            // WebSocket エンドポイント
            .route("/chat", get(chat_route_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/state", get(server_state))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until `shutdown` resolves
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run<F>(
        self,
        host: String,
        port: u16,
        shutdown: F,
    ) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        tracing::info!("Chat server listening on {}", local_addr);
        tracing::info!("Chat stream: ws://{}/chat?username=<name>", local_addr);
        tracing::info!("Press Ctrl+C or type /kill to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
