//! Chat client that keeps a Lamport clock in step with the server.
//!
//! Type messages and press Enter to broadcast them; `/quit` leaves the chat.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tokei-client -- --username alice
//! cargo run --bin tokei-client -- -s 127.0.0.1:10000 -u bob --log-file bob.log
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokei_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tokei-client")]
#[command(about = "Broadcast chat client with Lamport timestamps", long_about = None)]
struct Args {
    /// Server address in the format host:port
    #[arg(short = 's', long, default_value = "127.0.0.1:10000")]
    server_address: String,

    /// Name shown to the other participants
    #[arg(short = 'u', long)]
    username: String,

    /// Also append log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    if let Err(e) = setup_logger(env!("CARGO_BIN_NAME"), "info", args.log_file.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    // Run the client
    if let Err(e) = tokei_client::run_client(args.server_address, args.username).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
