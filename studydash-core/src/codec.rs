//! Snapshot encoding for the key-value store.
//!
//! Every persisted collection is a single JSON document stored under one
//! string key. Readers treat anything that fails to decode as absent.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Store key for the task list.
pub const TASKS_KEY: &str = "studyTasks";

/// Store key for the stopwatch record.
pub const TIMER_KEY: &str = "studyTimer";

/// Store key for the study materials list.
pub const MATERIALS_KEY: &str = "studyMaterials";

/// Error type for snapshot encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization failed.
    #[error("snapshot encode error: {0}")]
    Encode(String),
    /// The stored text is not a valid snapshot.
    #[error("snapshot decode error: {0}")]
    Decode(String),
}

/// Encodes any snapshot value as JSON text.
///
/// # Errors
///
/// Returns `CodecError::Encode` if the value cannot be serialized.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decodes a snapshot value from JSON text.
///
/// # Errors
///
/// Returns `CodecError::Decode` if the text is not valid JSON for `T`.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    serde_json::from_str(text).map_err(|e| CodecError::Decode(e.to_string()))
}
