use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::{
    error::TransferError,
    types::{PlaylistMetadata, PlaylistTracksPage, Track},
    utils,
};

use super::SpotifyClient;

/// Maximum page size accepted by the playlist tracks endpoint.
const PAGE_LIMIT: u32 = 100;

impl SpotifyClient {
    /// Retrieves every available track of a public playlist.
    ///
    /// The playlist id is taken from `playlist_url` before any request is
    /// made. Pages are fetched one at a time by following the `next` URL the
    /// API returns until it is `null`.
    ///
    /// Entries without a track payload, local files, tracks under a playback
    /// restriction and tracks without artists are skipped.
    ///
    /// # Errors
    ///
    /// - [`TransferError::InvalidInput`] for links without a `/playlist/<id>` segment
    /// - [`TransferError::Auth`] if no access token can be obtained
    /// - [`TransferError::Upstream`] for any non-success page response
    pub async fn get_all_tracks(
        &self,
        playlist_url: &str,
        market: &str,
    ) -> Result<Vec<Track>, TransferError> {
        let playlist_id = utils::extract_playlist_id(playlist_url)?;
        tracing::info!("fetching tracks of Spotify playlist {}", playlist_id);

        let token = self.authenticate().await?;

        let mut next_url = Some(format!(
            "{uri}/playlists/{id}/tracks?market={market}&limit={limit}",
            uri = self.api_url,
            id = playlist_id,
            market = market,
            limit = PAGE_LIMIT
        ));

        let mut all_tracks: Vec<Track> = Vec::new();
        let mut page_count = 0;

        while let Some(url) = next_url.take() {
            page_count += 1;
            tracing::debug!("fetching page {} from Spotify API", page_count);

            let page: PlaylistTracksPage = self.get_json(&url, &token).await?;
            let mut page_tracks = 0;

            for item in page.items {
                let Some(track) = item.track else {
                    tracing::debug!("skipping playlist entry without track payload");
                    continue;
                };

                if utils::is_unavailable(&track) || track.artists.is_empty() {
                    tracing::debug!("skipping track: {} (local/restricted)", track.name);
                    continue;
                }

                all_tracks.push(Track {
                    title: track.name,
                    artists: track.artists.into_iter().map(|a| a.name).collect(),
                    album: track.album.map(|a| a.name).unwrap_or_default(),
                });
                page_tracks += 1;
            }

            tracing::debug!("page {}: found {} valid tracks", page_count, page_tracks);
            next_url = page.next.filter(|next| next != "null" && !next.is_empty());
        }

        tracing::info!(
            "fetched {} tracks from {} pages",
            all_tracks.len(),
            page_count
        );
        Ok(all_tracks)
    }

    /// Retrieves the display name of a playlist.
    ///
    /// # Errors
    ///
    /// Same as [`SpotifyClient::get_all_tracks`].
    pub async fn get_playlist_name(&self, playlist_url: &str) -> Result<String, TransferError> {
        let playlist_id = utils::extract_playlist_id(playlist_url)?;
        let token = self.authenticate().await?;

        let url = format!(
            "{uri}/playlists/{id}?fields=name",
            uri = self.api_url,
            id = playlist_id
        );

        let metadata: PlaylistMetadata = self.get_json(&url, &token).await?;
        tracing::info!("playlist name retrieved: {}", metadata.name);
        Ok(metadata.name)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<T, TransferError> {
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

async fn ensure_success(response: Response) -> Result<Response, TransferError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    tracing::error!("Spotify API error: {} - {}", status, body);
    Err(TransferError::Upstream(format!(
        "Spotify API error: {} for {}",
        status, url
    )))
}
