use serde_json::json;

use crate::{error::TransferError, types::Visibility};

use super::YtMusicSession;

impl YtMusicSession {
    /// Creates a playlist containing `video_ids` in the given order and
    /// returns its id.
    ///
    /// # Errors
    ///
    /// [`TransferError::Upstream`] when the request is rejected or the
    /// response carries no `playlistId`.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        visibility: Visibility,
        video_ids: &[String],
    ) -> Result<String, TransferError> {
        tracing::info!(
            "creating YouTube Music playlist '{}' with {} tracks",
            name,
            video_ids.len()
        );

        let body = json!({
            "title": name,
            "description": description,
            "privacyStatus": visibility.as_privacy_status(),
            "videoIds": video_ids,
        });

        let response = self.send_request("playlist/create", body).await?;

        response["playlistId"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                TransferError::Upstream(
                    "YouTube Music did not return a playlist id".to_string(),
                )
            })
    }
}
