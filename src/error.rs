use thiserror::Error;

/// Failures that can end a transfer.
///
/// A track that cannot be found in the destination catalog is not an error;
/// it ends up in the [`TransferReport`](crate::types::TransferReport) instead.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("No songs found on YouTube Music (searched {total} tracks)")]
    NoMatches { total: usize },

    #[error("Source playlist has no transferable tracks")]
    EmptyPlaylist,
}

impl TransferError {
    /// The message without the kind prefix, as shown to HTTP clients.
    pub fn message(&self) -> String {
        match self {
            TransferError::InvalidInput(msg)
            | TransferError::Auth(msg)
            | TransferError::Upstream(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for TransferError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            let target = err
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "upstream".to_string());
            return TransferError::Upstream(format!("request to {} timed out", target));
        }

        TransferError::Upstream(err.to_string())
    }
}

/// Invalid values found while building a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Cannot load environment file: {0}")]
    Env(String),
}
