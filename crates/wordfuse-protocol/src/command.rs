//! The client command surface.
//!
//! These are the only operations a participant can request; the room
//! actor applies them in strict arrival order. Note the deliberate
//! absence of a timeout variant — turn timeouts are produced solely by
//! the room's own timer, so a forged timeout is unrepresentable on the
//! wire.

use serde::{Deserialize, Serialize};

use crate::{Character, ConfigUpdate, PlayerId, Seat};

/// A request from a participant to their room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Take a seat. Idempotent for the same player.
    ClaimSeat { seat: Seat, player: PlayerId },

    /// Pick an avatar for the round. Pre-start only.
    SelectCharacter { seat: Seat, character: Character },

    /// Host-only configuration change.
    UpdateConfig { seat: Seat, update: ConfigUpdate },

    /// Host-only: begin the round.
    StartGame { seat: Seat },

    /// Submit a word for the current prompt.
    SubmitWord { seat: Seat, word: String },

    /// Host-only: freeze or unfreeze the countdown.
    TogglePause { seat: Seat },

    /// Host-only, after game over: back to the lobby for a rematch.
    ResetToLobby { seat: Seat },
}

impl Command {
    /// The seat issuing this command.
    pub fn seat(&self) -> Seat {
        match *self {
            Command::ClaimSeat { seat, .. }
            | Command::SelectCharacter { seat, .. }
            | Command::UpdateConfig { seat, .. }
            | Command::StartGame { seat }
            | Command::SubmitWord { seat, .. }
            | Command::TogglePause { seat }
            | Command::ResetToLobby { seat } => seat,
        }
    }
}
