use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    error::TransferError,
    transfer::{self, LogObserver},
    types::AuthMaterial,
};

use super::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub playlist_link: Option<String>,
    pub auth_headers: Option<Value>,
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreatePlaylistRequest>, JsonRejection>,
) -> Result<Json<Value>, TransferError> {
    tracing::info!("=== NEW PLAYLIST CREATION REQUEST ===");

    let Json(request) =
        payload.map_err(|e| TransferError::InvalidInput(format!("Invalid request body: {}", e)))?;

    let playlist_link = request
        .playlist_link
        .filter(|link| !link.trim().is_empty())
        .ok_or_else(|| TransferError::InvalidInput("Playlist link is required".to_string()))?;

    let auth_headers = request
        .auth_headers
        .ok_or_else(|| TransferError::InvalidInput("Auth headers are required".to_string()))?;

    tracing::info!("Playlist link: {}", playlist_link);
    let material = AuthMaterial::from_json(auth_headers)?;

    let outcome =
        transfer::transfer_playlist(&state.config, playlist_link.trim(), material, &LogObserver)
            .await?;

    tracing::info!(
        "Playlist created successfully! Missed tracks: {}",
        outcome.report.missed_count
    );

    Ok(Json(json!({
        "message": "Playlist created successfully!",
        "playlist_id": outcome.playlist_id,
        "missed_tracks": outcome.report,
    })))
}
