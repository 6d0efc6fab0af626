//! Per-room countdown authority for Wordfuse.
//!
//! One [`TurnTimer`] lives inside each room actor and is the only thing
//! allowed to decrement the turn clock — clients observe ticks, they
//! never produce them.
//!
//! # Integration
//!
//! The timer is designed to sit inside a room actor's `tokio::select!`
//! loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         remaining = timer.wait_for_tick() => {
//!             // publish the tick; at zero, apply the turn timeout
//!         }
//!     }
//! }
//! ```
//!
//! When the timer is not running, `wait_for_tick` pends forever so the
//! `select!` keeps servicing commands.

use std::time::Duration;

use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace};

/// Fixed decrement cadence.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Timer lifecycle.
///
/// ```text
/// Stopped ──arm──→ Running ──freeze──→ Frozen
///    ↑                │  ↑───resume──────┘
///    └──reaches 0 / stop┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No turn in progress; `wait_for_tick` pends.
    Stopped,
    /// Counting down one second at a time.
    Running,
    /// Paused mid-turn; the remaining value is preserved exactly.
    Frozen,
}

/// The countdown for one room's active turn.
///
/// Owned by the room actor — it is dropped with the actor, so a torn
/// down room can never leave a timer firing behind it.
pub struct TurnTimer {
    state: TimerState,
    remaining: u16,
    /// Deadline of the next decrement while running.
    next_tick: Option<TokioInstant>,
}

impl TurnTimer {
    /// A stopped timer with nothing on the clock.
    pub fn new() -> Self {
        Self {
            state: TimerState::Stopped,
            remaining: 0,
            next_tick: None,
        }
    }

    /// Starts a fresh countdown for a new turn.
    pub fn arm(&mut self, secs: u16) {
        self.state = TimerState::Running;
        self.remaining = secs;
        self.next_tick = Some(TokioInstant::now() + TICK_INTERVAL);
        debug!(secs, "turn timer armed");
    }

    /// Freezes a running countdown, preserving the remaining value.
    /// Idempotent; a no-op unless running.
    pub fn freeze(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Frozen;
            self.next_tick = None;
            debug!(remaining = self.remaining, "turn timer frozen");
        }
    }

    /// Resumes a frozen countdown with the same remaining value. The
    /// next decrement lands a full interval from now.
    pub fn resume(&mut self) {
        if self.state == TimerState::Frozen {
            self.state = TimerState::Running;
            self.next_tick = Some(TokioInstant::now() + TICK_INTERVAL);
            debug!(remaining = self.remaining, "turn timer resumed");
        }
    }

    /// Stops the countdown entirely (game over, room teardown).
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
        self.next_tick = None;
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Seconds left on the clock.
    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Waits for the next one-second decrement and returns the new
    /// remaining value.
    ///
    /// At zero the timer stops itself, so exactly one expiry is ever
    /// reported per armed turn. While stopped or frozen this future
    /// pends forever — `select!` handles the other branches.
    pub async fn wait_for_tick(&mut self) -> u16 {
        let next = match (self.state, self.next_tick) {
            (TimerState::Running, Some(next)) => next,
            _ => {
                // Never resolves; the actor's select! keeps running.
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        time::sleep_until(next).await;

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Stopped;
            self.next_tick = None;
        } else {
            // Schedule from the previous deadline, not from now, so the
            // cadence doesn't drift.
            self.next_tick = Some(next + TICK_INTERVAL);
        }

        trace!(remaining = self.remaining, "turn timer tick");
        self.remaining
    }
}

impl Default for TurnTimer {
    fn default() -> Self {
        Self::new()
    }
}
