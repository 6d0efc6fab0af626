//! Codec trait and implementations for serializing snapshots and events.
//!
//! The Store and Bus boundaries don't care how records are serialized —
//! they take whatever implements [`Codec`]. [`JsonCodec`] is the default;
//! a binary codec could be dropped in without touching the gateway.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts values to and from bytes.
///
/// `Send + Sync + 'static` because codecs are shared across the room
/// actors' tasks and live for the process lifetime.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed or
    /// don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// Human-readable records make the Store inspectable during development;
/// the size tradeoff is irrelevant at two players per room.
///
/// ## Example
///
/// ```rust
/// use wordfuse_protocol::{Codec, JsonCodec, Seat};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&Seat::Two).unwrap();
/// let decoded: Seat = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, Seat::Two);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
