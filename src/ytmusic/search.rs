use serde_json::{Value, json};

use crate::error::TransferError;

use super::YtMusicSession;

/// Search params selecting the "Songs" filter.
pub const SONGS_FILTER_PARAMS: &str = "EgWKAQIIAWoMEA4QChADEAQQCRAF";

impl YtMusicSession {
    /// Searches songs and returns the video id of the top result.
    ///
    /// Only the first result is considered; an empty result set yields `None`.
    pub async fn search_song(&self, query: &str) -> Result<Option<String>, TransferError> {
        let body = json!({
            "query": query,
            "params": SONGS_FILTER_PARAMS,
        });

        let response = self.send_request("search", body).await?;
        Ok(first_video_id(&response))
    }
}

/// Extracts the video id of the first song in a search response.
///
/// Filtered searches come back as a tabbed result whose first tab holds a
/// section list; unfiltered or legacy responses put the section list directly
/// under `contents`. Sections other than music shelves ("did you mean"
/// messages and the like) are skipped. Only the top result is inspected: if
/// it carries no video id the search counts as empty.
pub fn first_video_id(response: &Value) -> Option<String> {
    let contents = &response["contents"];
    let section_list = match contents
        .pointer("/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer")
    {
        Some(list) => list,
        None => &contents["sectionListRenderer"],
    };

    section_list["contents"]
        .as_array()?
        .iter()
        .filter_map(|section| section["musicShelfRenderer"]["contents"].as_array())
        .flatten()
        .find_map(|item| item.get("musicResponsiveListItemRenderer"))
        .and_then(video_id_of)
}

fn video_id_of(renderer: &Value) -> Option<String> {
    renderer
        .pointer("/playlistItemData/videoId")
        .or_else(|| {
            renderer.pointer(
                "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchEndpoint/videoId",
            )
        })
        .and_then(Value::as_str)
        .map(str::to_string)
}
