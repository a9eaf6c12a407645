use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::header::AUTHORIZATION;

use crate::{error::TransferError, types::ClientCredentialsToken};

use super::SpotifyClient;

impl SpotifyClient {
    /// Returns a bearer token for the Spotify Web API.
    ///
    /// The first call performs the client-credentials exchange against the
    /// token endpoint; later calls on the same client reuse the token. Client
    /// credentials are sent as an HTTP Basic `Authorization` header.
    ///
    /// # Errors
    ///
    /// - [`TransferError::Auth`] if the client id or secret is not configured,
    ///   or the token endpoint rejects them
    /// - [`TransferError::Upstream`] on network failures or timeouts
    pub async fn authenticate(&self) -> Result<String, TransferError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let (Some(client_id), Some(client_secret)) = (&self.client_id, &self.client_secret) else {
            return Err(TransferError::Auth(
                "Spotify credentials not configured".to_string(),
            ));
        };

        tracing::debug!("requesting Spotify access token");
        let credentials = STANDARD.encode(format!("{}:{}", client_id, client_secret));
        let response = self
            .http
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {}", credentials))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("failed to get access token: {} - {}", status, body);
            return Err(TransferError::Auth(format!(
                "Failed to get Spotify access token: {}",
                status
            )));
        }

        let token = response.json::<ClientCredentialsToken>().await?;
        tracing::debug!("Spotify access token obtained");

        *cached = Some(token.access_token.clone());
        Ok(token.access_token)
    }
}
