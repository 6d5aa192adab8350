//! Single-reply requests to the server: Connect and Disconnect.
//!
//! Both are Lamport events on the client: the clock ticks before the request
//! is sent and observes the timestamp of the reply.

use std::sync::Arc;

use tokei_shared::{
    clock::LamportClock,
    dto::{ConnectRequest, ConnectResponse, DisconnectRequest, DisconnectResponse},
};

use crate::error::ClientError;

pub struct AdmissionClient {
    http: reqwest::Client,
    base_url: String,
    clock: Arc<LamportClock>,
}

impl AdmissionClient {
    /// # Arguments
    ///
    /// * `server_address` - `host:port` of the chat server
    /// * `clock` - The client's Lamport clock, shared with the chat session
    pub fn new(server_address: &str, clock: Arc<LamportClock>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("http://{}", server_address),
            clock,
        }
    }

    pub async fn connect(&self, username: &str) -> Result<ConnectResponse, ClientError> {
        let request = ConnectRequest {
            username: username.to_string(),
            timestamp: self.clock.tick(),
        };
        let response: ConnectResponse = self
            .http
            .post(format!("{}/connect", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let now = self.clock.observe(response.timestamp);
        tracing::debug!("Admitted at server time {}, local time {}", response.timestamp, now);
        Ok(response)
    }

    pub async fn disconnect(&self, username: &str) -> Result<DisconnectResponse, ClientError> {
        let request = DisconnectRequest {
            username: username.to_string(),
            timestamp: self.clock.tick(),
        };
        let response: DisconnectResponse = self
            .http
            .post(format!("{}/disconnect", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let now = self.clock.observe(response.timestamp);
        tracing::debug!("Left at server time {}, local time {}", response.timestamp, now);
        Ok(response)
    }
}
