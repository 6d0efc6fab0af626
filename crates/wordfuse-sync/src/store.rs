//! The durable record boundary.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use wordfuse_protocol::{Codec, JsonCodec, RoomId, RoomSnapshot};

use crate::SyncError;

/// A durable key-value record per room.
///
/// Every transition overwrites the full record — last write wins, no
/// partial patches — so saving the same logical snapshot twice is a
/// no-op. Object-safe so room actors can hold `Arc<dyn Store>` and
/// tests can substitute doubles.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Overwrites the room's record with this snapshot.
    async fn save(&self, snapshot: &RoomSnapshot) -> Result<(), SyncError>;

    /// Loads the room's record, if one exists.
    async fn load(&self, room_id: &RoomId) -> Result<Option<RoomSnapshot>, SyncError>;
}

/// In-memory [`Store`] for tests and local play.
///
/// Records are held as encoded bytes rather than live structs so the
/// codec path is exercised exactly as it would be against a real
/// backend.
pub struct MemoryStore {
    codec: JsonCodec,
    records: Mutex<HashMap<RoomId, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            codec: JsonCodec,
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn save(&self, snapshot: &RoomSnapshot) -> Result<(), SyncError> {
        let bytes = self
            .codec
            .encode(snapshot)
            .map_err(|e| SyncError::Store(e.to_string()))?;
        self.records
            .lock()
            .await
            .insert(snapshot.id.clone(), bytes);
        Ok(())
    }

    async fn load(&self, room_id: &RoomId) -> Result<Option<RoomSnapshot>, SyncError> {
        let records = self.records.lock().await;
        match records.get(room_id) {
            Some(bytes) => {
                let snapshot = self
                    .codec
                    .decode(bytes)
                    .map_err(|e| SyncError::Store(e.to_string()))?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }
}
