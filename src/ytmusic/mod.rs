//! # YouTube Music Integration Module
//!
//! Authenticated access to the YouTube Music internal API (`youtubei/v1`),
//! used as the destination side of a transfer.
//!
//! ## Authentication
//!
//! There is no public OAuth flow for creating playlists, so a session is built
//! from request headers copied out of a logged-in browser. The headers are
//! kept in memory for the lifetime of one [`YtMusicSession`]; nothing is
//! written to disk, so concurrent transfers with different accounts never
//! share credential state. Each request is signed with a fresh
//! `SAPISIDHASH` derived from the `__Secure-3PAPISID` cookie.
//!
//! ## API Coverage
//!
//! - `POST /search` - Text search restricted to songs
//! - `POST /playlist/create` - Create a playlist from a list of video ids

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::{Value, json};

use crate::{
    catalog::DestinationCatalog,
    config::Config,
    error::TransferError,
    types::{AuthMaterial, Visibility},
};

pub mod auth;
pub mod playlist;
pub mod search;

pub const YTM_ORIGIN: &str = "https://music.youtube.com";

/// Sent when the caller's headers carry no user agent of their own.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// An authenticated YouTube Music session scoped to a single transfer.
pub struct YtMusicSession {
    http: Client,
    base_url: String,
    headers: HeaderMap,
    sapisid: String,
}

impl YtMusicSession {
    /// Creates a session from caller supplied credential material.
    ///
    /// # Errors
    ///
    /// - [`TransferError::Auth`] if the material is empty, malformed, or lacks
    ///   the `__Secure-3PAPISID` cookie
    /// - [`TransferError::Upstream`] if the HTTP client cannot be built
    pub fn new(material: AuthMaterial, config: &Config) -> Result<Self, TransferError> {
        let raw = match material {
            AuthMaterial::Headers(pairs) => auth::flatten_headers(&pairs),
            AuthMaterial::Raw(raw) => raw,
        };

        let mut headers = auth::parse_raw_headers(&raw)?;
        if !headers.contains_key(USER_AGENT) {
            headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        }
        let sapisid = auth::sapisid_from_headers(&headers)?;
        let http = Client::builder().timeout(config.http_timeout).build()?;

        tracing::info!("YouTube Music session created with {} headers", headers.len());

        Ok(YtMusicSession {
            http,
            base_url: config.ytmusic_api_url.clone(),
            headers,
            sapisid,
        })
    }

    /// Sends an authenticated request to `endpoint` and returns the JSON response.
    ///
    /// The client context is merged into `body`.
    async fn send_request(&self, endpoint: &str, mut body: Value) -> Result<Value, TransferError> {
        if let Value::Object(map) = &mut body {
            map.insert("context".to_string(), client_context());
        }

        let url = format!(
            "{base}/{endpoint}?alt=json",
            base = self.base_url,
            endpoint = endpoint
        );
        let timestamp = Utc::now().timestamp();

        let response = self
            .http
            .post(&url)
            .headers(self.headers.clone())
            .header(reqwest::header::ORIGIN, YTM_ORIGIN)
            .header("x-origin", YTM_ORIGIN)
            .header(
                reqwest::header::AUTHORIZATION,
                auth::sapisid_hash(&self.sapisid, timestamp),
            )
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!("YouTube Music API error on {}: {} - {}", endpoint, status, text);
            return Err(TransferError::Upstream(format!(
                "YouTube Music API error on {}: {}",
                endpoint, status
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// The `WEB_REMIX` client context expected in every request body.
pub fn client_context() -> Value {
    json!({
        "client": {
            "clientName": "WEB_REMIX",
            "clientVersion": format!("1.{}.01.00", Utc::now().format("%Y%m%d")),
            "hl": "en"
        },
        "user": {}
    })
}

#[async_trait]
impl DestinationCatalog for YtMusicSession {
    async fn search(&self, query: &str) -> Result<Option<String>, TransferError> {
        self.search_song(query).await
    }

    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        visibility: Visibility,
        track_ids: &[String],
    ) -> Result<String, TransferError> {
        self.create(name, description, visibility, track_ids).await
    }
}
