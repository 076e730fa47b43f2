//! Reversible text encoding for persisted records: JSON, then base64.

use crate::{SessionError, SessionResult};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn encode<T: Serialize>(value: &T) -> SessionResult<String> {
    let json = serde_json::to_vec(value)
        .map_err(|e| SessionError::storage(format!("failed to serialize record: {e}")))?;
    Ok(STANDARD.encode(json))
}

pub fn decode<T: DeserializeOwned>(text: &str) -> SessionResult<T> {
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| SessionError::corrupt_session(format!("invalid base64: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| SessionError::corrupt_session(format!("invalid record: {e}")))
}
