//! Logging setup shared by the server and client binaries.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose log records are enabled by the default filter.
const CRATES: [&str; 3] = ["tokei_shared", "tokei_server", "tokei_client"];

/// Initialize the tracing subscriber with the specified default log level.
///
/// Records go to the console and, when `log_file` is given, are also appended
/// to that file without ANSI colors. The level can be overridden using the
/// `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "tokei_server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
/// * `log_file` - Optional path of a file to append log records to
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Examples
///
/// ```no_run
/// use tokei_shared::logger::setup_logger;
///
/// setup_logger("tokei_server", "debug", None).unwrap();
/// ```
pub fn setup_logger(
    binary_name: &str,
    default_log_level: &str,
    log_file: Option<&Path>,
) -> std::io::Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if let Some(path) = log_file {
        tracing::debug!("Appending log records to {}", path.display());
    }

    Ok(())
}

fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    CRATES
        .iter()
        .copied()
        .chain(std::iter::once(binary_name))
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}
