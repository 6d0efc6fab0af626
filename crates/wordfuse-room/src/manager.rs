//! Room manager: creates, tracks, and tears down rooms.

use std::collections::HashMap;

use wordfuse_protocol::{GameConfig, RoomId};
use wordfuse_sync::SyncGateway;

use crate::actor::spawn_room;
use crate::{RoomError, RoomHandle, RoomPolicy};

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Tracks every active room by id.
///
/// Rooms are fully independent units of concurrency — the manager only
/// maps ids to handles, it never holds game state, and no operation
/// here touches two rooms at once.
pub struct RoomManager {
    rooms: HashMap<RoomId, RoomHandle>,
    gateway: SyncGateway,
    policy: RoomPolicy,
}

impl RoomManager {
    /// A manager that wires new rooms to the given gateway.
    pub fn new(gateway: SyncGateway) -> Self {
        Self {
            rooms: HashMap::new(),
            gateway,
            policy: RoomPolicy::default(),
        }
    }

    /// Overrides the policy applied to rooms created from here on.
    pub fn with_policy(mut self, policy: RoomPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Creates a room under the given id.
    ///
    /// # Errors
    /// Returns [`RoomError::RoomExists`] if the id is already in use.
    pub fn create_room(
        &mut self,
        id: RoomId,
        config: GameConfig,
    ) -> Result<RoomHandle, RoomError> {
        if self.rooms.contains_key(&id) {
            return Err(RoomError::RoomExists(id));
        }

        let handle = spawn_room(
            id.clone(),
            config,
            self.policy.clone(),
            self.gateway.clone(),
            DEFAULT_CHANNEL_SIZE,
        );
        self.rooms.insert(id.clone(), handle.clone());
        tracing::info!(room_id = %id, "room created");
        Ok(handle)
    }

    /// Handle to an existing room.
    pub fn handle(&self, id: &RoomId) -> Result<RoomHandle, RoomError> {
        self.rooms
            .get(id)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(id.clone()))
    }

    /// Shuts a room down and forgets it.
    pub async fn destroy_room(&mut self, id: &RoomId) -> Result<(), RoomError> {
        let handle = self
            .rooms
            .remove(id)
            .ok_or_else(|| RoomError::NotFound(id.clone()))?;
        let _ = handle.shutdown().await;
        tracing::info!(room_id = %id, "room destroyed");
        Ok(())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().cloned().collect()
    }
}
