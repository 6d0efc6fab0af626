//! The fan-out boundary: per-room publish/subscribe topics.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, broadcast};
use wordfuse_protocol::{BusEvent, RoomId};

use crate::SyncError;

/// Receiving half of a room subscription.
pub type BusReceiver = broadcast::Receiver<BusEvent>;

/// An at-least-once publish/subscribe channel scoped to a room.
///
/// Delivery is best-effort towards currently attached subscribers; a
/// subscriber that lags far enough to overflow its buffer loses the
/// oldest events, which is acceptable because every state change is
/// followed by a full snapshot.
#[async_trait]
pub trait Bus: Send + Sync + 'static {
    /// Publishes an event on the room's topic.
    async fn publish(&self, room_id: &RoomId, event: &BusEvent) -> Result<(), SyncError>;

    /// Attaches a new subscriber to the room's topic.
    async fn subscribe(&self, room_id: &RoomId) -> BusReceiver;
}

/// Per-topic buffer for the in-memory bus.
const TOPIC_CAPACITY: usize = 64;

/// In-memory [`Bus`] backed by one `broadcast` channel per room.
pub struct MemoryBus {
    topics: Mutex<HashMap<RoomId, broadcast::Sender<BusEvent>>>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
        }
    }

    async fn topic(&self, room_id: &RoomId) -> broadcast::Sender<BusEvent> {
        let mut topics = self.topics.lock().await;
        topics
            .entry(room_id.clone())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .clone()
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bus for MemoryBus {
    async fn publish(&self, room_id: &RoomId, event: &BusEvent) -> Result<(), SyncError> {
        let topic = self.topic(room_id).await;
        // A send error only means nobody is subscribed right now; the
        // next subscriber gets a fresh snapshot anyway.
        let _ = topic.send(event.clone());
        Ok(())
    }

    async fn subscribe(&self, room_id: &RoomId) -> BusReceiver {
        self.topic(room_id).await.subscribe()
    }
}
