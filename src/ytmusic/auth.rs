use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use sha1::{Digest, Sha1};

use crate::{error::TransferError, types::AuthMaterial};

use super::YTM_ORIGIN;

const SAPISID_COOKIE: &str = "__Secure-3PAPISID";

/// Headers copied from the browser that must not be replayed.
const IGNORED_HEADERS: [&str; 3] = ["host", "content-length", "accept-encoding"];

/// Flattens header pairs into `key: value` lines, dropping empty values.
pub fn flatten_headers(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses `key: value` lines into a header map.
///
/// Keys are lowercased. Lines without a colon are ignored, as are the
/// transport headers and `sec*` fetch metadata a browser adds. Both the
/// request's own `authorization` and `origin` are replaced when requests are
/// signed. The browser's `user-agent` is kept.
pub fn parse_raw_headers(raw: &str) -> Result<HeaderMap, TransferError> {
    if raw.trim().is_empty() {
        return Err(TransferError::Auth(
            "YouTube Music auth headers are empty".to_string(),
        ));
    }

    let mut headers = HeaderMap::new();
    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = key.trim().to_lowercase();
        let value = value.trim();
        if key.is_empty()
            || value.is_empty()
            || key.starts_with("sec")
            || IGNORED_HEADERS.contains(&key.as_str())
            || key == "authorization"
            || key == "origin"
            || key == "x-origin"
        {
            continue;
        }

        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| TransferError::Auth(format!("invalid header name '{}': {}", key, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransferError::Auth(format!("invalid value for '{}': {}", key, e)))?;
        headers.insert(name, value);
    }

    if headers.is_empty() {
        return Err(TransferError::Auth(
            "YouTube Music auth headers contain no usable header".to_string(),
        ));
    }

    Ok(headers)
}

/// Reads the `__Secure-3PAPISID` value from the session cookie.
pub fn sapisid_from_headers(headers: &HeaderMap) -> Result<String, TransferError> {
    let cookie = headers
        .get(COOKIE)
        .and_then(|c| c.to_str().ok())
        .ok_or_else(|| {
            TransferError::Auth("YouTube Music auth headers contain no cookie".to_string())
        })?;

    cookie
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SAPISID_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            TransferError::Auth(format!(
                "YouTube Music cookie is missing the required value {}",
                SAPISID_COOKIE
            ))
        })
}

/// Builds the `SAPISIDHASH` authorization value for `timestamp` (unix seconds).
pub fn sapisid_hash(sapisid: &str, timestamp: i64) -> String {
    let digest = Sha1::digest(format!("{} {} {}", timestamp, sapisid, YTM_ORIGIN).as_bytes());
    format!("SAPISIDHASH {}_{:x}", timestamp, digest)
}

impl AuthMaterial {
    /// Interprets the `auth_headers` value of a request.
    ///
    /// An object becomes [`AuthMaterial::Headers`]. A string holding a JSON
    /// object is treated as that object; any other non-empty string is taken
    /// as raw `key: value` header lines.
    pub fn from_json(value: Value) -> Result<Self, TransferError> {
        match value {
            Value::Object(map) if map.is_empty() => Err(TransferError::InvalidInput(
                "Auth headers are required".to_string(),
            )),
            Value::Object(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let value = match value {
                        Value::String(s) => s,
                        Value::Null => String::new(),
                        Value::Bool(b) => b.to_string(),
                        Value::Number(n) => n.to_string(),
                        Value::Array(_) | Value::Object(_) => {
                            return Err(TransferError::InvalidInput(format!(
                                "header '{}' must be a string",
                                key
                            )));
                        }
                    };
                    pairs.push((key, value));
                }
                Ok(AuthMaterial::Headers(pairs))
            }
            Value::String(text) => Self::from_text(&text),
            Value::Null => Err(TransferError::InvalidInput(
                "Auth headers are required".to_string(),
            )),
            _ => Err(TransferError::InvalidInput(
                "Invalid headers format. Headers must be a JSON object or raw header lines."
                    .to_string(),
            )),
        }
    }

    /// Interprets free text, e.g. the contents of a headers file.
    pub fn from_text(text: &str) -> Result<Self, TransferError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TransferError::InvalidInput(
                "Auth headers are required".to_string(),
            ));
        }

        match serde_json::from_str::<Value>(text) {
            Ok(value @ Value::Object(_)) => Self::from_json(value),
            _ => Ok(AuthMaterial::Raw(text.to_string())),
        }
    }
}
