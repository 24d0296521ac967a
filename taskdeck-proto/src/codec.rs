//! Serialization and deserialization for the `TaskDeck` wire format.
//!
//! The store boundary speaks JSON text frames; WebSocket preserves message
//! boundaries, so no additional framing is needed.

use crate::store::{StoreRequest, StoreResponse};

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encodes a [`StoreRequest`] into a JSON string.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the request cannot be serialized.
pub fn encode_request(req: &StoreRequest) -> Result<String, CodecError> {
    serde_json::to_string(req).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a [`StoreRequest`] from a JSON string.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the text cannot be deserialized.
pub fn decode_request(text: &str) -> Result<StoreRequest, CodecError> {
    serde_json::from_str(text).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Encodes a [`StoreResponse`] into a JSON string.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the response cannot be serialized.
pub fn encode_response(resp: &StoreResponse) -> Result<String, CodecError> {
    serde_json::to_string(resp).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a [`StoreResponse`] from a JSON string.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the text cannot be deserialized.
pub fn decode_response(text: &str) -> Result<StoreResponse, CodecError> {
    serde_json::from_str(text).map_err(|e| CodecError::Serialization(e.to_string()))
}
