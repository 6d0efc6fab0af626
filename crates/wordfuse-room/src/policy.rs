//! Room-level policy knobs.
//!
//! These sit outside [`GameConfig`](wordfuse_protocol::GameConfig): they
//! are operator decisions fixed at room creation, not settings the host
//! toggles from the lobby.

use std::time::Duration;

/// What sustained disconnection does to an active round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectPolicy {
    /// Liveness is display-only; the room waits indefinitely for the
    /// absent player. The countdown keeps running, so an absent turn
    /// owner still bleeds lives the normal way.
    Wait,

    /// The match is forfeited once a seat stays disconnected longer
    /// than the grace period.
    Forfeit { grace: Duration },
}

/// Fixed per-room rules.
#[derive(Debug, Clone)]
pub struct RoomPolicy {
    /// Require both players to pick a character before the host can
    /// start.
    pub require_characters: bool,

    /// Disconnect handling for active rounds.
    pub disconnect: DisconnectPolicy,
}

impl Default for RoomPolicy {
    fn default() -> Self {
        Self {
            require_characters: false,
            disconnect: DisconnectPolicy::Wait,
        }
    }
}
