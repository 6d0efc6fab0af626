//! Error types for the protocol layer.

/// Errors from encoding or decoding wire data.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed — malformed bytes, missing fields, or a
    /// schema mismatch.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Structurally valid but logically invalid — e.g. a snapshot with
    /// an unknown schema version.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
