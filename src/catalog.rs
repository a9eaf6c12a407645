//! Seams between the transfer pipeline and the two music catalogs.
//!
//! The production implementations are [`SpotifyClient`](crate::spotify::SpotifyClient)
//! and [`YtMusicSession`](crate::ytmusic::YtMusicSession); tests drive the
//! pipeline with in-memory stubs.

use async_trait::async_trait;

use crate::{
    error::TransferError,
    types::{Track, Visibility},
};

/// The catalog a playlist is read from.
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    /// All available tracks of the playlist, in playlist order.
    async fn fetch_all_tracks(
        &self,
        playlist_url: &str,
        market: &str,
    ) -> Result<Vec<Track>, TransferError>;

    async fn fetch_playlist_name(&self, playlist_url: &str) -> Result<String, TransferError>;
}

/// The catalog a playlist is created in.
#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    /// Identifier of the first song matching `query`, `None` when nothing matches.
    async fn search(&self, query: &str) -> Result<Option<String>, TransferError>;

    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        visibility: Visibility,
        track_ids: &[String],
    ) -> Result<String, TransferError>;
}
