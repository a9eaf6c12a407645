//! Spotify to YouTube Music playlist transfer library
//!
//! This library reads a public Spotify playlist, looks up every track on
//! YouTube Music and creates a private playlist there from the matches,
//! reporting the tracks it could not find.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the transfer server
//! - `catalog` - Traits the pipeline uses to talk to both catalogs
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types
//! - `logging` - `tracing` subscriber setup
//! - `server` - Router and HTTP server
//! - `spotify` - Spotify Web API client (source catalog)
//! - `transfer` - The matching and playlist-assembly pipeline
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `ytmusic` - YouTube Music client (destination catalog)
//!
//! # Example
//!
//! ```
//! use spottransfer::{config::Config, transfer, types::AuthMaterial};
//!
//! #[tokio::main]
//! async fn main() -> spottransfer::Res<()> {
//!     spottransfer::config::load_env().await?;
//!     let config = Config::from_env()?;
//!     let headers = AuthMaterial::from_text(&std::fs::read_to_string("headers.txt")?)?;
//!     let outcome = transfer::transfer_playlist(
//!         &config,
//!         "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M",
//!         headers,
//!         &transfer::LogObserver,
//!     )
//!     .await?;
//!     println!("missed {} tracks", outcome.report.missed_count);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod spotify;
pub mod transfer;
pub mod types;
pub mod utils;
pub mod ytmusic;

/// Result type used by the binary and the library example.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Transferring {}", playlist_link);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line prefixed with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a yellow warning line. Execution continues.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red error line to stderr and exits with status 1.
///
/// Only for the CLI surface; library code returns
/// [`TransferError`](crate::error::TransferError) instead. Usable in
/// expression position since it never returns:
///
/// ```
/// let contents = match async_fs::read_to_string(&path).await {
///     Ok(contents) => contents,
///     Err(e) => error!("Cannot read {}. Err: {}", path.display(), e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}
