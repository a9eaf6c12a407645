use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "spottransfer=info,tower_http=info";

/// Installs the global `tracing` subscriber.
///
/// Events are appended, without ANSI colors, to `log_file` for external
/// tailing, and mirrored to stdout when `console` is set. The interactive CLI
/// turns the console layer off because its progress bar owns the terminal.
/// `RUST_LOG` overrides the default filter.
pub fn init(log_file: &Path, console: bool) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(console.then(|| fmt::layer()))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();

    Ok(())
}
