//! Error types for the room layer.

use wordfuse_protocol::{InvalidConfigValue, Phase, RoomId, Seat};

/// Errors from room operations.
///
/// Every variant is local to a single command: a failed command leaves
/// the room exactly as it was. Word rejection is deliberately absent —
/// it is a normal negative result, not an error (see
/// [`SubmitOutcome`](crate::SubmitOutcome)).
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The seat is occupied by a different player.
    #[error("{0} is already taken")]
    SeatTaken(Seat),

    /// The caller lacks authority for this action (host-only actions
    /// from the guest seat).
    #[error("{action} requires the host seat")]
    Forbidden { action: &'static str },

    /// The action is not valid in the room's current phase.
    #[error("cannot {action} while the room is {phase}")]
    InvalidPhase { action: &'static str, phase: Phase },

    /// A configuration value was out of its allowed range.
    #[error(transparent)]
    InvalidValue(#[from] InvalidConfigValue),

    /// Start attempted before its preconditions were met.
    #[error("not ready to start: {0}")]
    NotReady(&'static str),

    /// No room with this id.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// A room with this id already exists.
    #[error("room {0} already exists")]
    RoomExists(RoomId),

    /// The room's command channel is closed or full.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}
