//! Operator console read from the server's stdin.
//!
//! | command      | effect                                  |
//! |--------------|-----------------------------------------|
//! | `/kill`      | graceful shutdown                       |
//! | `/timestamp` | log the current Lamport time            |
//! | `/clients`   | log the roster in admission order       |
//! | `/help`      | log the command list                    |

use std::sync::Arc;

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::oneshot,
};

use crate::usecase::GetServerStateUseCase;

const HELP: &str = "Commands:\n\
    /kill - shuts the server down\n\
    /timestamp - prints the current timestamp\n\
    /clients - prints the clients connected to the server\n\
    /help - prints the commands";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Kill,
    Timestamp,
    Clients,
    Help,
    Invalid(String),
}

impl ConsoleCommand {
    /// Parse one console line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let command = match line.trim() {
            "" => return None,
            "/kill" => Self::Kill,
            "/timestamp" => Self::Timestamp,
            "/clients" => Self::Clients,
            "/help" => Self::Help,
            other => Self::Invalid(other.to_string()),
        };
        Some(command)
    }
}

/// Answers console commands from the current server state
pub struct Console {
    server_state: Arc<GetServerStateUseCase>,
}

impl Console {
    pub fn new(server_state: Arc<GetServerStateUseCase>) -> Self {
        Self { server_state }
    }

    /// Lines to log in response to `command`.
    pub async fn respond(&self, command: &ConsoleCommand) -> Vec<String> {
        match command {
            ConsoleCommand::Kill => vec!["Server shutting down ...".to_string()],
            ConsoleCommand::Timestamp => {
                vec![format!("Current timestamp: {}", self.server_state.timestamp())]
            }
            ConsoleCommand::Clients => self
                .server_state
                .roster()
                .await
                .into_iter()
                .map(|entry| format!("Client: {}", entry.username))
                .collect(),
            ConsoleCommand::Help => vec![HELP.to_string()],
            ConsoleCommand::Invalid(line) => vec![format!("Invalid command: {}", line)],
        }
    }
}

/// Read commands from `input` until `/kill` or end of input.
///
/// `/kill` fires `kill`; end of input just stops the console and leaves the
/// server running.
pub async fn run_console<R>(input: R, console: Console, kill: oneshot::Sender<()>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::debug!("Console input closed");
                return;
            }
            Err(e) => {
                tracing::warn!("Failed to read console input: {}", e);
                return;
            }
        };

        let Some(command) = ConsoleCommand::parse(&line) else {
            continue;
        };

        for response in console.respond(&command).await {
            match command {
                ConsoleCommand::Invalid(_) => tracing::warn!("{}", response),
                _ => tracing::info!("{}", response),
            }
        }

        if command == ConsoleCommand::Kill {
            if kill.send(()).is_err() {
                tracing::warn!("Server already stopped");
            }
            return;
        }
    }
}
