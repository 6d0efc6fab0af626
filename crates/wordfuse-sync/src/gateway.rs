//! The sync gateway: the only component that touches the Store and Bus.
//!
//! Room actors compute transitions synchronously in memory, hand the
//! resulting snapshot to the gateway, and move on to the next command.
//! Persistence and fan-out happen on spawned tasks with bounded retry,
//! so a slow or failing backend can degrade sync without ever blocking
//! the state machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use wordfuse_protocol::{BusEvent, RoomId, RoomSnapshot, Seat};

use crate::{Bus, BusReceiver, Store, SyncError};

/// How persistence failures are retried.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: u32,
    /// Delay before the second attempt; doubles on each further retry.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            initial_backoff: Duration::from_millis(100),
        }
    }
}

/// Translates room transitions into Store writes and Bus events.
///
/// Cheap to clone; room actors each hold one. The Store and Bus are
/// trait objects injected at construction so tests can substitute
/// doubles.
#[derive(Clone)]
pub struct SyncGateway {
    store: Arc<dyn Store>,
    bus: Arc<dyn Bus>,
    retry: RetryPolicy,
}

impl SyncGateway {
    pub fn new(store: Arc<dyn Store>, bus: Arc<dyn Bus>) -> Self {
        Self {
            store,
            bus,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Persists and broadcasts a snapshot, retrying the store write with
    /// exponential backoff.
    ///
    /// The broadcast happens even if persistence ultimately fails — the
    /// in-memory state machine remains authoritative and peers should
    /// keep seeing it.
    pub async fn persist(&self, snapshot: RoomSnapshot) -> Result<(), SyncError> {
        let room_id = snapshot.id.clone();
        let result = self.save_with_retry(&snapshot).await;
        if let Err(ref e) = result {
            tracing::warn!(%room_id, error = %e, "room sync degraded: snapshot not persisted");
        }

        if let Err(e) = self
            .bus
            .publish(&room_id, &BusEvent::StateChanged { snapshot })
            .await
        {
            tracing::warn!(%room_id, error = %e, "state broadcast failed");
        }
        result
    }

    /// Fire-and-forget variant of [`persist`](Self::persist) for use
    /// inside the room actor's command loop.
    pub fn sync_snapshot(&self, snapshot: RoomSnapshot) {
        let gateway = self.clone();
        tokio::spawn(async move {
            let _ = gateway.persist(snapshot).await;
        });
    }

    /// Publishes one countdown decrement. Fire-and-forget: a lost tick
    /// only costs an observer one second of display smoothness.
    pub fn publish_tick(&self, room_id: RoomId, remaining_seconds: u16) {
        let bus = Arc::clone(&self.bus);
        tokio::spawn(async move {
            if let Err(e) = bus
                .publish(&room_id, &BusEvent::TimerTick { remaining_seconds })
                .await
            {
                tracing::debug!(%room_id, error = %e, "tick broadcast failed");
            }
        });
    }

    /// Relays what a player is typing to their peer. Advisory only —
    /// this never enters the state machine.
    pub async fn send_typing(
        &self,
        room_id: &RoomId,
        seat: Seat,
        text: String,
    ) -> Result<(), SyncError> {
        self.bus
            .publish(room_id, &BusEvent::Typing { seat, text })
            .await
    }

    /// Publishes the current set of live seats.
    pub async fn publish_presence(
        &self,
        room_id: &RoomId,
        connected: Vec<Seat>,
    ) -> Result<(), SyncError> {
        self.bus
            .publish(room_id, &BusEvent::PresenceSync { connected })
            .await
    }

    /// Attaches a subscriber to the room's topic.
    pub async fn subscribe(&self, room_id: &RoomId) -> BusReceiver {
        self.bus.subscribe(room_id).await
    }

    /// Loads the room's persisted record.
    pub async fn load(&self, room_id: &RoomId) -> Result<Option<RoomSnapshot>, SyncError> {
        self.store.load(room_id).await
    }

    async fn save_with_retry(&self, snapshot: &RoomSnapshot) -> Result<(), SyncError> {
        let mut backoff = self.retry.initial_backoff;
        let mut last_err = None;

        for attempt in 1..=self.retry.attempts {
            match self.store.save(snapshot).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(
                        room_id = %snapshot.id,
                        attempt,
                        error = %e,
                        "snapshot save failed"
                    );
                    last_err = Some(e);
                    if attempt < self.retry.attempts {
                        sleep(backoff).await;
                        backoff *= 2;
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| SyncError::Store("no attempts made".into())))
    }
}
