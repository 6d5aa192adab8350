//! Broadcast chat server stamping every event with a Lamport clock.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tokei-server
//! cargo run --bin tokei-server -- --host 127.0.0.1 --port 10000 --log-file server.log
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use tokei_server::{
    config::ServerConfig,
    ui::{
        Server,
        console::{Console, run_console},
        shutdown_signal,
        state::AppState,
    },
};
use tokei_shared::logger::setup_logger;
use tokio::{io::BufReader, sync::oneshot};

#[derive(Parser, Debug)]
#[command(name = "tokei-server")]
#[command(about = "Broadcast chat server with Lamport timestamps", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "10000")]
    port: u16,

    /// Also append log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Frames a session may have queued before it is dropped as stalled
    #[arg(long, default_value_t = ServerConfig::DEFAULT_OUTBOUND_CAPACITY)]
    outbound_capacity: usize,

    /// Upper bound in milliseconds for writing one frame to a client
    #[arg(long, default_value = "5000")]
    send_timeout_ms: u64,

    /// Do not read operator commands from stdin
    #[arg(long)]
    no_console: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    if let Err(e) = setup_logger(env!("CARGO_BIN_NAME"), "debug", args.log_file.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    let config = ServerConfig {
        outbound_capacity: args.outbound_capacity.max(1),
        send_timeout: Duration::from_millis(args.send_timeout_ms),
    };
    let state = AppState::in_memory(config);

    let (kill_tx, kill_rx) = oneshot::channel();
    if args.no_console {
        // /kill は来ないので、シグナルだけで停止する
        drop(kill_tx);
    } else {
        let console = Console::new(Arc::clone(&state.get_server_state_usecase));
        tokio::spawn(run_console(
            BufReader::new(tokio::io::stdin()),
            console,
            kill_tx,
        ));
    }

    let server = Server::new(state);
    if let Err(e) = server
        .run(args.host, args.port, shutdown_signal(kill_rx))
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
