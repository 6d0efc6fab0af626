//! Shared vocabulary for Wordfuse.
//!
//! Everything the layers agree on lives here:
//!
//! - **Types** ([`RoomSnapshot`], [`Seat`], [`Phase`], [`GameConfig`],
//!   …) — the authoritative room record and its pieces.
//! - **Commands** ([`Command`]) — what participants may ask a room to do.
//! - **Events** ([`BusEvent`]) — what a room fans out to its subscribers.
//! - **Codec** ([`Codec`], [`JsonCodec`]) — how records become bytes at
//!   the Store/Bus boundary.
//!
//! This crate knows nothing about actors, timers, or storage — it is the
//! language the other crates speak to each other.

mod codec;
mod command;
mod error;
mod event;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use command::Command;
pub use error::ProtocolError;
pub use event::BusEvent;
pub use types::{
    Character, ConfigUpdate, Difficulty, GameConfig, InvalidConfigValue, Phase,
    PlayerId, PlayerSlot, RoomId, RoomSnapshot, RoundOutcome, SCHEMA_VERSION,
    Seat, VariantMode,
};
