use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A track read from the source playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
}

impl Track {
    pub fn new(title: impl Into<String>, artists: Vec<String>, album: impl Into<String>) -> Self {
        Track {
            title: title.into(),
            artists,
            album: album.into(),
        }
    }

    pub fn first_artist(&self) -> &str {
        self.artists.first().map(String::as_str).unwrap_or_default()
    }

    /// `"title first_artist"`, used both as the search query and as the
    /// label of a missed track.
    pub fn label(&self) -> String {
        format!("{} {}", self.title, self.first_artist())
    }
}

/// Why a track could not be matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissReason {
    NotFound,
    SearchFailed(String),
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissReason::NotFound => write!(f, "no search results"),
            MissReason::SearchFailed(e) => write!(f, "search failed: {}", e),
        }
    }
}

/// Outcome of resolving one source track in the destination catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Found(String),
    Missed(MissReason),
}

/// Tracks that could not be transferred.
///
/// Serialized as `{"count": n, "tracks": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReport {
    #[serde(rename = "count")]
    pub missed_count: usize,
    #[serde(rename = "tracks")]
    pub missed_tracks: Vec<String>,
}

impl TransferReport {
    pub fn record_miss(&mut self, label: String) {
        self.missed_count += 1;
        self.missed_tracks.push(label);
    }
}

/// Result of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub playlist_id: String,
    pub playlist_name: String,
    pub found: usize,
    pub report: TransferReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
    Unlisted,
}

impl Visibility {
    pub fn as_privacy_status(&self) -> &'static str {
        match self {
            Visibility::Private => "PRIVATE",
            Visibility::Public => "PUBLIC",
            Visibility::Unlisted => "UNLISTED",
        }
    }
}

/// Credential material for the destination catalog as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMaterial {
    /// Header name/value pairs, e.g. a JSON object copied from the browser.
    Headers(Vec<(String, String)>),
    /// Headers already serialized as `key: value` lines.
    Raw(String),
}

#[derive(Tabled)]
pub struct MissedTrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub track: String,
}

// Spotify Web API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCredentialsToken {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    pub album: Option<TrackAlbum>,
    #[serde(default)]
    pub is_local: bool,
    pub restrictions: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistMetadata {
    pub name: String,
}
