//! Store/Bus boundary for Wordfuse.
//!
//! Persistence and fan-out live behind two object-safe traits so the
//! room layer never names a concrete backend:
//!
//! - [`Store`] — durable record per room ([`MemoryStore`] in-process)
//! - [`Bus`] — per-room publish/subscribe topic ([`MemoryBus`])
//! - [`SyncGateway`] — the one component that touches both, with
//!   retry/backoff on persistence failures
//! - [`PresenceTracker`] — heartbeat liveness at the boundary

mod bus;
mod error;
mod gateway;
mod presence;
mod store;

pub use bus::{Bus, BusReceiver, MemoryBus};
pub use error::SyncError;
pub use gateway::{RetryPolicy, SyncGateway};
pub use presence::{DEFAULT_LIVENESS_WINDOW, PresenceTracker};
pub use store::{MemoryStore, Store};
