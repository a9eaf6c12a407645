//! # API Module
//!
//! HTTP endpoints of the transfer server.
//!
//! ## Endpoints
//!
//! - [`home`] - `GET /`, liveness probe answering `{"message": "Server Online"}`
//! - [`health`] - `GET /health`, status and version for monitoring
//! - [`create`] - `POST /create`, runs a full playlist transfer
//!
//! ## Error Responses
//!
//! Failures are answered with `{"message": ...}` holding the bare error text
//! (no kind prefix) and a status that depends on the kind of failure:
//!
//! | error | status |
//! |---|---|
//! | invalid input | 400 |
//! | authentication | 401 |
//! | upstream catalog error, no matches | 502 |
//! | empty source playlist | 422 |

use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{config::Config, error::TransferError};

mod create;
mod health;

pub use create::{CreatePlaylistRequest, create};
pub use health::{health, home};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }
}

pub fn status_for(err: &TransferError) -> StatusCode {
    match err {
        TransferError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        TransferError::Auth(_) => StatusCode::UNAUTHORIZED,
        TransferError::Upstream(_) | TransferError::NoMatches { .. } => StatusCode::BAD_GATEWAY,
        TransferError::EmptyPlaylist => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for TransferError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}
