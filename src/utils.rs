use crate::{error::TransferError, types::PlaylistTrack};

/// Number of leading and trailing tracks that always get a progress event.
pub const PROGRESS_EDGE: usize = 5;

/// Interval between progress events in the middle of a batch.
pub const PROGRESS_INTERVAL: usize = 50;

/// Extracts the playlist id from a Spotify playlist URL.
///
/// Accepts anything containing `/playlist/<id>`, optionally followed by a
/// query string or a trailing slash, e.g.
/// `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc`.
pub fn extract_playlist_id(playlist_url: &str) -> Result<String, TransferError> {
    let Some((_, rest)) = playlist_url.split_once("/playlist/") else {
        return Err(TransferError::InvalidInput(format!(
            "'{}' is not a playlist link (expected a /playlist/<id> segment)",
            playlist_url
        )));
    };

    let id = rest
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    if id.is_empty() || id.contains('/') {
        return Err(TransferError::InvalidInput(format!(
            "'{}' does not contain a playlist id",
            playlist_url
        )));
    }

    Ok(id.to_string())
}

/// Whether track `position` (1-indexed) of `total` should emit a progress event.
pub fn should_report_progress(position: usize, total: usize) -> bool {
    position % PROGRESS_INTERVAL == 0
        || position <= PROGRESS_EDGE
        || position > total.saturating_sub(PROGRESS_EDGE)
}

pub fn percentage(processed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    processed as f64 / total as f64 * 100.0
}

/// Tracks that cannot be played from the destination are skipped:
/// local files and tracks under a playback restriction.
pub fn is_unavailable(track: &PlaylistTrack) -> bool {
    if track.is_local {
        return true;
    }

    match &track.restrictions {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}
