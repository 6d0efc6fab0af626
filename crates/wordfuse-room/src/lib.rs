//! Authoritative room state machine for Wordfuse.
//!
//! Each room runs as an isolated Tokio task (actor model) owning its
//! canonical game state and turn countdown, with commands serialized
//! through an mpsc channel.
//!
//! # Key types
//!
//! - [`RoomCore`] — the pure state machine (no channels, no clocks)
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`RoomManager`] — creates/destroys rooms by id
//! - [`RoomPolicy`] — fixed per-room rules (character rule, disconnect
//!   handling)
//! - [`SubmitOutcome`] — the three-way result of a word submission

mod actor;
mod error;
mod manager;
mod policy;
mod state;

pub use actor::{CommandReply, RoomHandle};
pub use error::RoomError;
pub use manager::RoomManager;
pub use policy::{DisconnectPolicy, RoomPolicy};
pub use state::{Applied, RoomCore, SubmitOutcome, TimerDirective};
