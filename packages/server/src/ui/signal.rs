//! Shutdown signal handling.

use tokio::{signal, sync::oneshot};

/// Resolves when the server should stop accepting connections.
///
/// Triggers on Ctrl+C, SIGTERM (unix), or the operator console's `/kill`.
/// A dropped console sender does not count as a shutdown request.
pub async fn shutdown_signal(kill: oneshot::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let killed = async {
        if kill.await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
        _ = killed => tracing::info!("Received /kill, shutting down"),
    }
}
