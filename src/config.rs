//! Configuration management for spottransfer.
//!
//! Configuration is read once at process start and carried around as an
//! explicit [`Config`] value. Sources, highest priority first:
//! 1. Environment variables
//! 2. `.env` file in the local data directory (`spottransfer/.env`)
//! 3. `.env` file in the working directory
//! 4. Built-in defaults

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_YTMUSIC_API_URL: &str = "https://music.youtube.com/youtubei/v1";
pub const DEFAULT_MARKET: &str = "IN";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "spottransfer.log";

/// Runtime configuration shared by the server, the CLI and both catalog clients.
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub market: String,
    pub ytmusic_api_url: String,
    pub server_addr: SocketAddr,
    pub frontend_url: Option<String>,
    pub http_timeout: Duration,
    pub log_file: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset so that a blank line in a `.env`
    /// file falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_addr = match get("SERVER_ADDRESS") {
            Some(raw) => SocketAddr::from_str(&raw).map_err(|e| ConfigError::InvalidValue {
                key: "SERVER_ADDRESS",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => SocketAddr::from_str(DEFAULT_SERVER_ADDRESS).map_err(|e| {
                ConfigError::InvalidValue {
                    key: "SERVER_ADDRESS",
                    value: DEFAULT_SERVER_ADDRESS.to_string(),
                    reason: e.to_string(),
                }
            })?,
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidValue {
                        key: "HTTP_TIMEOUT_SECS",
                        value: raw,
                        reason: "timeout must be at least one second".to_string(),
                    });
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        key: "HTTP_TIMEOUT_SECS",
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Config {
            spotify_client_id: get("SPOTIFY_API_AUTH_CLIENT_ID"),
            spotify_client_secret: get("SPOTIFY_API_AUTH_CLIENT_SECRET"),
            spotify_api_url: trim_url(
                get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string()),
            ),
            spotify_token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string()),
            market: get("SPOTIFY_MARKET").unwrap_or_else(|| DEFAULT_MARKET.to_string()),
            ytmusic_api_url: trim_url(
                get("YTMUSIC_API_URL").unwrap_or_else(|| DEFAULT_YTMUSIC_API_URL.to_string()),
            ),
            server_addr,
            frontend_url: get("FRONTEND_URL"),
            http_timeout,
            log_file: PathBuf::from(
                get("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            ),
        })
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Loads environment variables from `.env` files.
///
/// The file in the platform local data directory
/// (`~/.local/share/spottransfer/.env` on Linux) is loaded first, then a
/// `.env` in the working directory. Variables that are already set are never
/// overwritten, and missing files are not an error.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::Env(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| ConfigError::Env(e.to_string()))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::Env(e.to_string())),
    }
}

/// Location of the user level `.env` file.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spottransfer/.env");
    path
}
