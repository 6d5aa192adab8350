//! One chat session: admission, duplex chat stream, departure.

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt, stream::SplitStream};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokei_shared::{clock::LamportClock, dto::ChatResponse};
use tokio::{net::TcpStream, sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{
    api::AdmissionClient,
    domain::{ClientCommand, compose_message},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// How long to wait for the server to acknowledge our close of the chat stream
const CLOSE_GRACE: Duration = Duration::from_secs(2);

type ChatStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Run the chat session until the user quits or the connection is lost
pub async fn run_client_session(server_address: &str, username: &str) -> Result<(), ClientError> {
    let clock = Arc::new(LamportClock::new());
    let admission = AdmissionClient::new(server_address, clock.clone());

    // 1. Connect: the single welcome reply
    let welcome = admission.connect(username).await?;
    print!(
        "{}",
        MessageFormatter::format_reply(&welcome.message, welcome.timestamp)
    );

    // 2. ChatRoute: the duplex stream
    let mut url = reqwest::Url::parse(&format!("ws://{}/chat", server_address))
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    url.query_pairs_mut().append_pair("username", username);
    let (ws_stream, _) = connect_async(url.as_str()).await?;
    tracing::info!("Chat stream open to {}", server_address);
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Type /quit to leave.\n",
        username
    );

    let (mut write, read) = ws_stream.split();
    let mut read_task = spawn_reader(read, clock.clone(), username.to_string());
    let mut input_rx = spawn_line_editor(username.to_string());

    loop {
        let line = tokio::select! {
            line = input_rx.recv() => line,
            result = &mut read_task => {
                return match result {
                    Ok(outcome) => outcome,
                    Err(e) => Err(ClientError::Transport(e.to_string())),
                };
            }
        };

        // 入力が終わった（Ctrl+C / Ctrl+D）場合も退出として扱う
        let command = line.map_or(ClientCommand::Quit, |line| ClientCommand::parse(&line));

        match command {
            ClientCommand::Quit => break,
            ClientCommand::Send(text) => match compose_message(&clock, username, text) {
                Ok(request) => {
                    let frame = serde_json::to_string(&request)?;
                    write.send(Message::Text(frame.into())).await?;
                    print!(
                        "{}",
                        MessageFormatter::format_sent_confirmation(request.timestamp)
                    );
                    redisplay_prompt(username);
                }
                Err(ClientError::MessageTooLong { length, max }) => {
                    print!("{}", MessageFormatter::format_too_long(length, max));
                    redisplay_prompt(username);
                }
                Err(e) => return Err(e),
            },
        }
    }

    // 3. Disconnect: the single goodbye reply
    let goodbye = admission.disconnect(username).await?;
    print!(
        "{}",
        MessageFormatter::format_reply(&goodbye.message, goodbye.timestamp)
    );

    // 退出後は自分でストリームを閉じる。サーバーは台帳を見て退出済みと判断する
    if let Err(e) = write.close().await {
        tracing::debug!("Failed to close chat stream: {}", e);
    }
    if tokio::time::timeout(CLOSE_GRACE, &mut read_task).await.is_err() {
        tracing::debug!("Server did not acknowledge the close in time");
        read_task.abort();
    }

    Ok(())
}

/// Print every broadcast, observing its timestamp first.
///
/// Ends with `ConnectionLost` when the server closes the stream or the
/// transport fails.
fn spawn_reader(
    mut read: SplitStream<ChatStream>,
    clock: Arc<LamportClock>,
    username: String,
) -> JoinHandle<Result<(), ClientError>> {
    tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ChatResponse>(text.as_str()) {
                        Ok(frame) => {
                            let local_time = clock.observe(frame.timestamp);
                            print!("{}", MessageFormatter::format_broadcast(&frame, local_time));
                        }
                        Err(e) => {
                            tracing::warn!("Unexpected frame from server: {}", e);
                            print!("{}", MessageFormatter::format_raw_message(text.as_str()));
                        }
                    }
                    redisplay_prompt(&username);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the chat stream");
                    break;
                }
                Err(e) => {
                    tracing::warn!("Chat stream read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
        Err(ClientError::ConnectionLost)
    })
}

/// Read lines on a blocking thread; rustyline is synchronous.
fn spawn_line_editor(username: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", username);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str()).ok();
                    if input_tx.send(line).is_err() {
                        // Session ended, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
