//! # CLI Module
//!
//! Command implementations behind the `spottransfer` binary.
//!
//! - [`serve`] - Runs the HTTP server that the web frontend talks to
//! - [`transfer`] - Transfers one playlist straight from the terminal
//!
//! ## Usage Patterns
//!
//! ```bash
//! spottransfer serve
//! spottransfer transfer https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M \
//!     --headers ~/ytm-headers.txt --open
//! ```
//!
//! The headers file holds the request headers of a logged-in
//! music.youtube.com tab, either as a JSON object or as raw `key: value`
//! lines copied from the browser's network inspector.
//!
//! Fatal errors are reported with the [`error!`](crate::error!) macro, which
//! exits the process.

mod serve;
mod transfer;

pub use serve::serve;
pub use transfer::transfer;
