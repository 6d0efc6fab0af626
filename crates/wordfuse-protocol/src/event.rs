//! Events published on a room's Bus topic.

use serde::{Deserialize, Serialize};

use crate::{RoomSnapshot, Seat};

/// A message fanned out to a room's subscribers.
///
/// Adjacent tagging keeps the event name and payload separate on the
/// wire: `{ "event": "timer.tick", "data": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum BusEvent {
    /// Full authoritative snapshot after a state transition. Server→all.
    #[serde(rename = "state.changed")]
    StateChanged { snapshot: RoomSnapshot },

    /// What the opponent is currently typing. Peer→peer, advisory only —
    /// never touches the state machine.
    #[serde(rename = "typing")]
    Typing { seat: Seat, text: String },

    /// One countdown decrement from the timer authority. Observers render
    /// this instead of running their own clock.
    #[serde(rename = "timer.tick")]
    TimerTick { remaining_seconds: u16 },

    /// The set of seats currently passing liveness checks.
    #[serde(rename = "presence.sync")]
    PresenceSync { connected: Vec<Seat> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_tick_wire_shape() {
        let event = BusEvent::TimerTick {
            remaining_seconds: 7,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "timer.tick");
        assert_eq!(json["data"]["remaining_seconds"], 7);
    }

    #[test]
    fn test_typing_round_trip() {
        let event = BusEvent::Typing {
            seat: Seat::Two,
            text: "pota".into(),
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: BusEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_presence_sync_wire_shape() {
        let event = BusEvent::PresenceSync {
            connected: vec![Seat::One],
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "presence.sync");
        assert_eq!(json["data"]["connected"], serde_json::json!([1]));
    }
}
