//! Heartbeat-based liveness tracking.
//!
//! Presence is detected at the Bus boundary: participants heartbeat
//! through whatever transport carries their commands, and a seat falls
//! disconnected once its heartbeat goes stale. The tracker only answers
//! "who is live right now" — what (if anything) that does to the game
//! is the room's disconnect policy, not this module's business.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use wordfuse_protocol::Seat;

/// Default window after which a silent seat counts as disconnected.
pub const DEFAULT_LIVENESS_WINDOW: Duration = Duration::from_secs(15);

/// Tracks each seat's most recent heartbeat.
///
/// All methods take `now` explicitly so tests drive time themselves.
#[derive(Debug)]
pub struct PresenceTracker {
    last_seen: HashMap<Seat, Instant>,
    window: Duration,
}

impl PresenceTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            last_seen: HashMap::new(),
            window,
        }
    }

    /// Records a heartbeat from a seat.
    pub fn heartbeat(&mut self, seat: Seat, now: Instant) {
        self.last_seen.insert(seat, now);
    }

    /// Whether a seat's heartbeat is within the liveness window.
    pub fn is_connected(&self, seat: Seat, now: Instant) -> bool {
        match self.last_seen.get(&seat) {
            Some(seen) => now.duration_since(*seen) <= self.window,
            None => false,
        }
    }

    /// The set of currently live seats, seat 1 first.
    pub fn connected(&self, now: Instant) -> Vec<Seat> {
        [Seat::One, Seat::Two]
            .into_iter()
            .filter(|seat| self.is_connected(*seat, now))
            .collect()
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new(DEFAULT_LIVENESS_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_seat_is_disconnected() {
        let tracker = PresenceTracker::default();
        assert!(!tracker.is_connected(Seat::One, Instant::now()));
    }

    #[test]
    fn test_heartbeat_marks_connected() {
        let mut tracker = PresenceTracker::new(Duration::from_secs(10));
        let now = Instant::now();
        tracker.heartbeat(Seat::One, now);
        assert!(tracker.is_connected(Seat::One, now));
        assert!(!tracker.is_connected(Seat::Two, now));
    }

    #[test]
    fn test_stale_heartbeat_falls_disconnected() {
        let mut tracker = PresenceTracker::new(Duration::from_secs(10));
        let start = Instant::now();
        tracker.heartbeat(Seat::One, start);

        let later = start + Duration::from_secs(11);
        assert!(!tracker.is_connected(Seat::One, later));
    }

    #[test]
    fn test_fresh_heartbeat_revives_seat() {
        let mut tracker = PresenceTracker::new(Duration::from_secs(10));
        let start = Instant::now();
        tracker.heartbeat(Seat::One, start);

        let later = start + Duration::from_secs(20);
        tracker.heartbeat(Seat::One, later);
        assert!(tracker.is_connected(Seat::One, later));
    }

    #[test]
    fn test_connected_lists_live_seats_in_seat_order() {
        let mut tracker = PresenceTracker::new(Duration::from_secs(10));
        let now = Instant::now();
        tracker.heartbeat(Seat::Two, now);
        tracker.heartbeat(Seat::One, now);

        assert_eq!(tracker.connected(now), vec![Seat::One, Seat::Two]);

        let later = now + Duration::from_secs(15);
        tracker.heartbeat(Seat::Two, later);
        assert_eq!(tracker.connected(later), vec![Seat::Two]);
    }
}
