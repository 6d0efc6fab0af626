//! Core game vocabulary shared by every layer.
//!
//! Everything in this module either travels on the wire (snapshots, bus
//! events) or is embedded in something that does, so every type derives
//! `Serialize`/`Deserialize` and the tests at the bottom pin the exact
//! JSON shapes the Store and Bus see.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot schema version, bumped on any incompatible field change.
pub const SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player.
///
/// Newtype over `u64` so a player id can never be confused with a seat
/// number or a room id. `#[serde(transparent)]` keeps the wire shape a
/// plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A room identifier: an opaque string shared out-of-band between the
/// two participants. Immutable once the room exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Seats
// ---------------------------------------------------------------------------

/// One of the two player seats. Seat 1 is the host.
///
/// Serialized as the bare seat number (`1` or `2`) so snapshots stay
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    /// The opposite seat — the next turn owner after this one.
    pub fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Index into a `[PlayerSlot; 2]` array.
    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }

    /// Whether this seat holds host privileges.
    pub fn is_host(self) -> bool {
        matches!(self, Seat::One)
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> u8 {
        match seat {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }
}

impl TryFrom<u8> for Seat {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Seat::One),
            2 => Ok(Seat::Two),
            other => Err(format!("seat must be 1 or 2, got {other}")),
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", u8::from(*self))
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The room lifecycle phase.
///
/// ```text
/// AwaitingSeats → Lobby → Active ⇄ Paused
///                   ↑        │
///                   │        ▼
///                   └──── GameOver
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Room exists, not all seats claimed yet.
    AwaitingSeats,
    /// Both seats claimed; host may configure and start.
    Lobby,
    /// A round is running and the countdown is live.
    Active,
    /// Round frozen by the host; countdown preserved.
    Paused,
    /// Some seat ran out of lives.
    GameOver,
}

impl Phase {
    /// Whether a round is underway (a turn owner is defined).
    pub fn in_round(self) -> bool {
        matches!(self, Phase::Active | Phase::Paused)
    }

    /// Whether game setup (characters, variant mode) may still change.
    pub fn pre_start(self) -> bool {
        matches!(self, Phase::AwaitingSeats | Phase::Lobby)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::AwaitingSeats => "AwaitingSeats",
            Phase::Lobby => "Lobby",
            Phase::Active => "Active",
            Phase::Paused => "Paused",
            Phase::GameOver => "GameOver",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Game configuration
// ---------------------------------------------------------------------------

/// Prompt difficulty, controlling how the next fragment is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Alternate prompt-generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantMode {
    /// Plain difficulty-driven prompts.
    None,
    /// Seat 1 walks a fixed fragment sequence toward a special finale.
    Sequence,
}

/// The avatar a player picks in the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
    Seal,
    Otter,
}

/// Host-tunable match settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Lives each player starts a round with.
    pub max_lives: u8,
    /// Seconds a player has to produce a word.
    pub turn_duration_secs: u16,
    pub difficulty: Difficulty,
    pub variant_mode: VariantMode,
}

impl GameConfig {
    pub const MIN_LIVES: u8 = 1;
    pub const MAX_LIVES: u8 = 5;
    pub const MIN_TURN_SECS: u16 = 5;
    pub const MAX_TURN_SECS: u16 = 30;
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_lives: 3,
            turn_duration_secs: 10,
            difficulty: Difficulty::Medium,
            variant_mode: VariantMode::None,
        }
    }
}

/// A value that was outside its allowed configuration range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{key} must be between {min} and {max}, got {got}")]
pub struct InvalidConfigValue {
    pub key: &'static str,
    pub got: i64,
    pub min: i64,
    pub max: i64,
}

/// A single validated configuration change.
///
/// A closed enum rather than a `(key, value)` pair: every settable field
/// is enumerated here with its typed value, so an out-of-range or
/// unknown-field update is unrepresentable past validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum ConfigUpdate {
    MaxLives(u8),
    TurnDuration(u16),
    Difficulty(Difficulty),
    VariantMode(VariantMode),
}

impl ConfigUpdate {
    /// Field name, for error messages and logs.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigUpdate::MaxLives(_) => "max_lives",
            ConfigUpdate::TurnDuration(_) => "turn_duration_secs",
            ConfigUpdate::Difficulty(_) => "difficulty",
            ConfigUpdate::VariantMode(_) => "variant_mode",
        }
    }

    /// Whether this update targets the variant mode, which has stricter
    /// phase rules than the other fields.
    pub fn is_variant_mode(&self) -> bool {
        matches!(self, ConfigUpdate::VariantMode(_))
    }

    /// Range-checks the carried value.
    pub fn validate(&self) -> Result<(), InvalidConfigValue> {
        match *self {
            ConfigUpdate::MaxLives(n) => {
                let (min, max) = (GameConfig::MIN_LIVES, GameConfig::MAX_LIVES);
                if n < min || n > max {
                    return Err(InvalidConfigValue {
                        key: self.key(),
                        got: n as i64,
                        min: min as i64,
                        max: max as i64,
                    });
                }
            }
            ConfigUpdate::TurnDuration(secs) => {
                let (min, max) =
                    (GameConfig::MIN_TURN_SECS, GameConfig::MAX_TURN_SECS);
                if secs < min || secs > max {
                    return Err(InvalidConfigValue {
                        key: self.key(),
                        got: secs as i64,
                        min: min as i64,
                        max: max as i64,
                    });
                }
            }
            ConfigUpdate::Difficulty(_) | ConfigUpdate::VariantMode(_) => {}
        }
        Ok(())
    }

    /// Writes the (already validated) value into the config.
    pub fn apply_to(&self, config: &mut GameConfig) {
        match *self {
            ConfigUpdate::MaxLives(n) => config.max_lives = n,
            ConfigUpdate::TurnDuration(secs) => config.turn_duration_secs = secs,
            ConfigUpdate::Difficulty(d) => config.difficulty = d,
            ConfigUpdate::VariantMode(m) => config.variant_mode = m,
        }
    }
}

// ---------------------------------------------------------------------------
// Players and snapshots
// ---------------------------------------------------------------------------

/// One seat's slice of room state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    /// Who claimed this seat, if anyone.
    pub occupant: Option<PlayerId>,
    pub lives: u8,
    pub character: Option<Character>,
    /// Liveness flag refreshed by heartbeats; never affects game rules
    /// by itself.
    pub connected: bool,
}

impl PlayerSlot {
    pub fn empty() -> Self {
        Self {
            occupant: None,
            lives: 0,
            character: None,
            connected: false,
        }
    }

    pub fn is_claimed(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Outcome flag for the special variant round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Seat 2 completed the sequence finale.
    SequenceComplete,
}

/// The full authoritative room record.
///
/// Every state transition overwrites the whole snapshot in the Store —
/// no partial patches — so replaying a snapshot is idempotent and the
/// boundary can never see a half-applied update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub schema_version: u32,
    pub id: RoomId,
    pub phase: Phase,
    pub config: GameConfig,
    pub players: [PlayerSlot; 2],
    /// Defined whenever `phase.in_round()`.
    pub turn_owner: Option<Seat>,
    /// The fragment the next word must contain. Never empty once a
    /// round has started.
    pub prompt: String,
    /// Accepted words this round, newest last. Order is display-only.
    pub used_words: Vec<String>,
    pub remaining_seconds: u16,
    /// Advances once per full turn cycle back to seat 1.
    pub round_counter: u32,
    pub round_outcome: Option<RoundOutcome>,
}

impl RoomSnapshot {
    /// The seat still holding lives once the game is over.
    pub fn winner(&self) -> Option<Seat> {
        if self.phase != Phase::GameOver {
            return None;
        }
        if self.players[Seat::One.index()].lives > 0 {
            Some(Seat::One)
        } else {
            Some(Seat::Two)
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
