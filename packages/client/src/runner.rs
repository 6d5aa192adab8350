//! Client execution logic.
//!
//! There is no reconnection: any failure other than an over-long message ends
//! the client.

use super::{error::ClientError, session::run_client_session};

/// Run the chat client once
pub async fn run_client(server_address: String, username: String) -> Result<(), ClientError> {
    tracing::info!("Connecting to {} as '{}'", server_address, username);

    match run_client_session(&server_address, &username).await {
        Ok(()) => {
            tracing::info!("Client session ended normally");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Client session failed: {}", e);
            Err(e)
        }
    }
}
