//! # Spotify Integration Module
//!
//! Read-only access to public Spotify playlists, used as the source side of a
//! transfer. Authentication uses the OAuth 2.0 client-credentials flow, which
//! needs no user interaction and grants access to public catalog data only.
//!
//! ## Architecture
//!
//! ```text
//! Transfer Pipeline
//!          ↓
//! SpotifyClient (SourceCatalog)
//!     ├── Authentication (client credentials, cached per client)
//!     └── Playlist Operations (track listing, metadata)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Client-credentials token exchange
//! - `GET /playlists/{id}/tracks` - Playlist tracks, followed page by page via `next`
//! - `GET /playlists/{id}` - Playlist metadata (display name)
//!
//! ## Error Handling
//!
//! Every non-success response is reported as
//! [`TransferError::Upstream`](crate::error::TransferError::Upstream); missing
//! or rejected client credentials as
//! [`TransferError::Auth`](crate::error::TransferError::Auth). Nothing is
//! retried. Requests time out after the configured HTTP timeout.

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    catalog::SourceCatalog,
    config::Config,
    error::TransferError,
    types::Track,
};

pub mod auth;
pub mod playlist;

/// Spotify Web API client scoped to a single transfer.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    token: Mutex<Option<String>>,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Result<Self, TransferError> {
        let http = Client::builder().timeout(config.http_timeout).build()?;

        Ok(SpotifyClient {
            http,
            api_url: config.spotify_api_url.clone(),
            token_url: config.spotify_token_url.clone(),
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
            token: Mutex::new(None),
        })
    }
}

#[async_trait]
impl SourceCatalog for SpotifyClient {
    async fn fetch_all_tracks(
        &self,
        playlist_url: &str,
        market: &str,
    ) -> Result<Vec<Track>, TransferError> {
        self.get_all_tracks(playlist_url, market).await
    }

    async fn fetch_playlist_name(&self, playlist_url: &str) -> Result<String, TransferError> {
        self.get_playlist_name(playlist_url).await
    }
}
