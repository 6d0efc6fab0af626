//! The pure room state machine.
//!
//! [`RoomCore`] owns the canonical game state and applies one command at
//! a time. It has no channels, no clocks, and no I/O — the actor layer
//! provides serialization and timing, and tests drive it directly with
//! a seeded RNG. Each transition answers with a [`TimerDirective`] so
//! the caller knows what the countdown should do next.

use rand::Rng;
use tracing::{debug, info};
use wordfuse_protocol::{
    Character, ConfigUpdate, GameConfig, Phase, PlayerId, PlayerSlot, RoomId,
    RoomSnapshot, RoundOutcome, SCHEMA_VERSION, Seat, VariantMode,
};
use wordfuse_words::prompt;
use wordfuse_words::validate::{self, Verdict};

use crate::{RoomError, RoomPolicy};

// ---------------------------------------------------------------------------
// Transition results
// ---------------------------------------------------------------------------

/// What the countdown should do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDirective {
    /// Leave the timer as it is.
    Keep,
    /// Start a fresh countdown at this many seconds.
    Arm(u16),
    /// Freeze the countdown, preserving its value.
    Freeze,
    /// Resume a frozen countdown.
    Resume,
    /// Stop the countdown entirely.
    Stop,
}

/// A successfully applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub timer: TimerDirective,
}

impl Applied {
    fn keep() -> Self {
        Self {
            timer: TimerDirective::Keep,
        }
    }
}

/// Result of a word submission.
///
/// Not a `Result`: rejection and out-of-turn submissions are normal
/// gameplay, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Word accepted; the turn advanced.
    Accepted,
    /// Word rejected; surfaced to the submitting player only, shared
    /// state untouched.
    Rejected(Verdict),
    /// Not this seat's turn (or no round running); silently dropped.
    /// This is how a submit/timeout race resolves — the later arrival
    /// sees the already-advanced turn and lands here.
    Ignored,
}

// ---------------------------------------------------------------------------
// RoomCore
// ---------------------------------------------------------------------------

/// Canonical state for one room.
pub struct RoomCore {
    id: RoomId,
    phase: Phase,
    config: GameConfig,
    policy: RoomPolicy,
    players: [PlayerSlot; 2],
    turn_owner: Option<Seat>,
    prompt: String,
    used_words: Vec<String>,
    remaining_seconds: u16,
    round_counter: u32,
    round_outcome: Option<RoundOutcome>,
}

impl RoomCore {
    pub fn new(id: RoomId, config: GameConfig, policy: RoomPolicy) -> Self {
        Self {
            id,
            phase: Phase::AwaitingSeats,
            config,
            policy,
            players: [PlayerSlot::empty(), PlayerSlot::empty()],
            turn_owner: None,
            prompt: String::new(),
            used_words: Vec::new(),
            remaining_seconds: 0,
            round_counter: 0,
            round_outcome: None,
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn policy(&self) -> &RoomPolicy {
        &self.policy
    }

    pub fn turn_owner(&self) -> Option<Seat> {
        self.turn_owner
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn lives(&self, seat: Seat) -> u8 {
        self.players[seat.index()].lives
    }

    pub fn remaining_seconds(&self) -> u16 {
        self.remaining_seconds
    }

    pub fn round_outcome(&self) -> Option<RoundOutcome> {
        self.round_outcome
    }

    /// The full authoritative record, as persisted and broadcast.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            schema_version: SCHEMA_VERSION,
            id: self.id.clone(),
            phase: self.phase,
            config: self.config.clone(),
            players: self.players.clone(),
            turn_owner: self.turn_owner,
            prompt: self.prompt.clone(),
            used_words: self.used_words.clone(),
            remaining_seconds: self.remaining_seconds,
            round_counter: self.round_counter,
            round_outcome: self.round_outcome,
        }
    }

    // -- Lobby -------------------------------------------------------------

    /// Takes a seat. Idempotent for the same player; both seats claimed
    /// moves the room into the lobby.
    pub fn claim_seat(
        &mut self,
        seat: Seat,
        player: PlayerId,
    ) -> Result<Applied, RoomError> {
        let slot = &mut self.players[seat.index()];
        match slot.occupant {
            Some(existing) if existing == player => return Ok(Applied::keep()),
            Some(_) => return Err(RoomError::SeatTaken(seat)),
            None => {
                slot.occupant = Some(player);
                slot.lives = self.config.max_lives;
                slot.connected = true;
            }
        }

        if self.phase == Phase::AwaitingSeats
            && self.players.iter().all(PlayerSlot::is_claimed)
        {
            self.phase = Phase::Lobby;
        }

        info!(room_id = %self.id, %seat, %player, phase = %self.phase, "seat claimed");
        Ok(Applied::keep())
    }

    /// Picks an avatar. Pre-start only; any claimed seat may set its own.
    pub fn select_character(
        &mut self,
        seat: Seat,
        character: Character,
    ) -> Result<Applied, RoomError> {
        if !self.phase.pre_start() {
            return Err(RoomError::InvalidPhase {
                action: "select a character",
                phase: self.phase,
            });
        }
        self.players[seat.index()].character = Some(character);
        Ok(Applied::keep())
    }

    /// Applies a host configuration change.
    ///
    /// Variant mode may only change before the first start; the other
    /// fields are additionally allowed between rounds (game over) but
    /// never mid-round.
    pub fn update_config(
        &mut self,
        caller: Seat,
        update: ConfigUpdate,
    ) -> Result<Applied, RoomError> {
        if !caller.is_host() {
            return Err(RoomError::Forbidden {
                action: "changing settings",
            });
        }
        update.validate()?;

        let allowed = if update.is_variant_mode() {
            self.phase.pre_start()
        } else {
            !self.phase.in_round()
        };
        if !allowed {
            return Err(RoomError::InvalidPhase {
                action: "change settings",
                phase: self.phase,
            });
        }

        update.apply_to(&mut self.config);

        // Keep the lobby's life display in step with the new maximum.
        if self.phase.pre_start() {
            for slot in self.players.iter_mut().filter(|s| s.is_claimed()) {
                slot.lives = self.config.max_lives;
            }
        }

        debug!(room_id = %self.id, key = update.key(), "config updated");
        Ok(Applied::keep())
    }

    // -- Round lifecycle ---------------------------------------------------

    /// Starts a round: host only, both seats claimed, lobby phase.
    pub fn start_game<R: Rng + ?Sized>(
        &mut self,
        caller: Seat,
        rng: &mut R,
    ) -> Result<Applied, RoomError> {
        if !caller.is_host() {
            return Err(RoomError::Forbidden {
                action: "starting the game",
            });
        }
        if !self.players.iter().all(PlayerSlot::is_claimed) {
            return Err(RoomError::NotReady("both seats must be claimed"));
        }
        if self.phase != Phase::Lobby {
            return Err(RoomError::InvalidPhase {
                action: "start the game",
                phase: self.phase,
            });
        }
        if self.policy.require_characters
            && self.players.iter().any(|s| s.character.is_none())
        {
            return Err(RoomError::NotReady("both players must pick a character"));
        }

        for slot in self.players.iter_mut() {
            slot.lives = self.config.max_lives;
        }
        self.used_words.clear();
        self.round_counter = 0;
        self.round_outcome = None;
        self.turn_owner = Some(Seat::One);
        self.prompt = prompt::initial_prompt(&self.config, rng);
        self.remaining_seconds = self.config.turn_duration_secs;
        self.phase = Phase::Active;

        info!(
            room_id = %self.id,
            prompt = %self.prompt,
            duration = self.config.turn_duration_secs,
            "game started"
        );
        Ok(Applied {
            timer: TimerDirective::Arm(self.config.turn_duration_secs),
        })
    }

    /// Handles a word submission from a seat.
    pub fn submit_word<R: Rng + ?Sized>(
        &mut self,
        seat: Seat,
        word: &str,
        rng: &mut R,
    ) -> SubmitOutcome {
        if self.phase != Phase::Active || self.turn_owner != Some(seat) {
            return SubmitOutcome::Ignored;
        }

        let verdict = validate::check(word, &self.prompt, &self.used_words);
        if !verdict.is_valid() {
            debug!(room_id = %self.id, %seat, reason = verdict.message(), "word rejected");
            return SubmitOutcome::Rejected(verdict);
        }

        let accepted = validate::normalize(word);
        debug!(room_id = %self.id, %seat, word = %accepted, "word accepted");
        self.used_words.push(accepted);

        // Sequence finale: seat 2 answering the designated final
        // fragment completes the variant round.
        if self.config.variant_mode == VariantMode::Sequence
            && seat == Seat::Two
            && self.prompt == prompt::SEQUENCE_FINALE
        {
            self.round_outcome = Some(RoundOutcome::SequenceComplete);
            info!(room_id = %self.id, "sequence round completed");
        }

        self.advance_turn(rng);
        SubmitOutcome::Accepted
    }

    /// Applies a turn timeout from the timer authority.
    ///
    /// A stale timeout — one whose turn has already advanced — is a
    /// no-op, which is what makes replays after a submit/timeout race
    /// harmless.
    pub fn handle_timeout<R: Rng + ?Sized>(
        &mut self,
        seat: Seat,
        rng: &mut R,
    ) -> Applied {
        if self.phase != Phase::Active || self.turn_owner != Some(seat) {
            return Applied::keep();
        }

        let slot = &mut self.players[seat.index()];
        slot.lives = slot.lives.saturating_sub(1);
        info!(room_id = %self.id, %seat, lives = slot.lives, "turn timed out");

        if slot.lives == 0 {
            self.phase = Phase::GameOver;
            info!(room_id = %self.id, winner = %seat.other(), "game over");
            return Applied {
                timer: TimerDirective::Stop,
            };
        }

        self.advance_turn(rng);
        Applied {
            timer: TimerDirective::Arm(self.config.turn_duration_secs),
        }
    }

    /// Host pause toggle. The countdown value survives the round trip.
    pub fn toggle_pause(&mut self, caller: Seat) -> Result<Applied, RoomError> {
        if !caller.is_host() {
            return Err(RoomError::Forbidden {
                action: "pausing",
            });
        }
        match self.phase {
            Phase::Active => {
                self.phase = Phase::Paused;
                debug!(room_id = %self.id, remaining = self.remaining_seconds, "paused");
                Ok(Applied {
                    timer: TimerDirective::Freeze,
                })
            }
            Phase::Paused => {
                self.phase = Phase::Active;
                debug!(room_id = %self.id, remaining = self.remaining_seconds, "resumed");
                Ok(Applied {
                    timer: TimerDirective::Resume,
                })
            }
            phase => Err(RoomError::InvalidPhase {
                action: "toggle pause",
                phase,
            }),
        }
    }

    /// Host "play again": back to the lobby, seats and characters kept.
    pub fn reset_to_lobby(&mut self, caller: Seat) -> Result<Applied, RoomError> {
        if !caller.is_host() {
            return Err(RoomError::Forbidden {
                action: "resetting the room",
            });
        }
        if self.phase != Phase::GameOver {
            return Err(RoomError::InvalidPhase {
                action: "reset to lobby",
                phase: self.phase,
            });
        }

        self.phase = Phase::Lobby;
        self.turn_owner = None;
        self.prompt.clear();
        self.used_words.clear();
        self.remaining_seconds = 0;
        self.round_counter = 0;
        self.round_outcome = None;
        for slot in self.players.iter_mut() {
            slot.lives = self.config.max_lives;
        }

        info!(room_id = %self.id, "room reset to lobby");
        Ok(Applied {
            timer: TimerDirective::Stop,
        })
    }

    /// Forfeits the match against `seat` (disconnect policy).
    pub fn forfeit(&mut self, seat: Seat) -> Applied {
        if !self.phase.in_round() {
            return Applied::keep();
        }
        self.players[seat.index()].lives = 0;
        self.phase = Phase::GameOver;
        info!(room_id = %self.id, forfeited = %seat, "match forfeited");
        Applied {
            timer: TimerDirective::Stop,
        }
    }

    // -- Liveness and clock mirroring --------------------------------------

    /// Updates a seat's liveness flag. Returns whether anything changed.
    /// Never touches phase or lives by itself.
    pub fn set_connected(&mut self, seat: Seat, connected: bool) -> bool {
        let slot = &mut self.players[seat.index()];
        if slot.connected == connected {
            return false;
        }
        slot.connected = connected;
        debug!(room_id = %self.id, %seat, connected, "presence changed");
        true
    }

    /// Mirrors a countdown decrement into the snapshot state. Only the
    /// timer path calls this; the value can only go down, and only
    /// while a round is actively running.
    pub fn record_tick(&mut self, remaining: u16) {
        if self.phase == Phase::Active && remaining < self.remaining_seconds {
            self.remaining_seconds = remaining;
        }
    }

    // -- Internal ----------------------------------------------------------

    /// Flips the turn: bumps the round counter when play returns to
    /// seat 1, deals the next prompt, and resets the clock.
    fn advance_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(owner) = self.turn_owner else {
            return;
        };
        let next = owner.other();

        if next == Seat::One {
            self.round_counter += 1;
        }
        self.prompt =
            prompt::next_prompt(&self.config, self.round_counter, next, &self.prompt, rng);
        self.turn_owner = Some(next);
        self.remaining_seconds = self.config.turn_duration_secs;
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wordfuse_protocol::Difficulty;
    use wordfuse_words::prompt::{SEQUENCE_FINALE, SEQUENCE_PROMPTS};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn room() -> RoomCore {
        RoomCore::new(
            RoomId::new("kitchen"),
            GameConfig::default(),
            RoomPolicy::default(),
        )
    }

    /// Room with both seats claimed, still in the lobby.
    fn lobby_room(config: GameConfig) -> RoomCore {
        let mut core = RoomCore::new(
            RoomId::new("kitchen"),
            config,
            RoomPolicy::default(),
        );
        core.claim_seat(Seat::One, PlayerId(1)).unwrap();
        core.claim_seat(Seat::Two, PlayerId(2)).unwrap();
        core
    }

    /// Room with a started round.
    fn active_room(config: GameConfig) -> RoomCore {
        let mut core = lobby_room(config);
        core.start_game(Seat::One, &mut rng()).unwrap();
        core
    }

    /// A dictionary word containing the current prompt that hasn't been
    /// played yet.
    fn word_for(core: &RoomCore) -> String {
        let fragment = core.prompt().to_string();
        let used = core.snapshot().used_words;
        wordfuse_words::dictionary::playable_words()
            .iter()
            .find(|w| w.contains(fragment.as_str()) && !used.contains(*w))
            .cloned()
            .unwrap_or_else(|| panic!("no corpus word for prompt {fragment:?}"))
    }

    // -- Seats and lobby ---------------------------------------------------

    #[test]
    fn test_new_room_awaits_seats() {
        let core = room();
        assert_eq!(core.phase(), Phase::AwaitingSeats);
        assert_eq!(core.turn_owner(), None);
    }

    #[test]
    fn test_both_seats_claimed_reaches_lobby() {
        let mut core = room();
        core.claim_seat(Seat::One, PlayerId(1)).unwrap();
        assert_eq!(core.phase(), Phase::AwaitingSeats);
        core.claim_seat(Seat::Two, PlayerId(2)).unwrap();
        assert_eq!(core.phase(), Phase::Lobby);
    }

    #[test]
    fn test_claim_taken_seat_fails() {
        let mut core = room();
        core.claim_seat(Seat::One, PlayerId(1)).unwrap();
        let err = core.claim_seat(Seat::One, PlayerId(2)).unwrap_err();
        assert!(matches!(err, RoomError::SeatTaken(Seat::One)));
    }

    #[test]
    fn test_claim_is_idempotent_for_same_player() {
        let mut core = room();
        core.claim_seat(Seat::One, PlayerId(1)).unwrap();
        core.claim_seat(Seat::One, PlayerId(1)).unwrap();
        assert_eq!(core.snapshot().players[0].occupant, Some(PlayerId(1)));
    }

    #[test]
    fn test_select_character_pre_start_only() {
        let mut core = lobby_room(GameConfig::default());
        core.select_character(Seat::Two, Character::Otter).unwrap();
        assert_eq!(
            core.snapshot().players[1].character,
            Some(Character::Otter)
        );

        core.start_game(Seat::One, &mut rng()).unwrap();
        let err = core
            .select_character(Seat::One, Character::Seal)
            .unwrap_err();
        assert!(matches!(err, RoomError::InvalidPhase { .. }));
    }

    // -- Config ------------------------------------------------------------

    #[test]
    fn test_only_host_updates_config() {
        let mut core = lobby_room(GameConfig::default());
        let err = core
            .update_config(Seat::Two, ConfigUpdate::MaxLives(2))
            .unwrap_err();
        assert!(matches!(err, RoomError::Forbidden { .. }));
    }

    #[test]
    fn test_config_value_range_checked() {
        let mut core = lobby_room(GameConfig::default());
        let err = core
            .update_config(Seat::One, ConfigUpdate::TurnDuration(99))
            .unwrap_err();
        assert!(matches!(err, RoomError::InvalidValue(_)));
        assert_eq!(core.config().turn_duration_secs, 10);
    }

    #[test]
    fn test_config_frozen_mid_round() {
        let mut core = active_room(GameConfig::default());
        let err = core
            .update_config(Seat::One, ConfigUpdate::MaxLives(5))
            .unwrap_err();
        assert!(matches!(err, RoomError::InvalidPhase { .. }));
    }

    #[test]
    fn test_config_editable_between_rounds() {
        let mut core = active_room(GameConfig {
            max_lives: 1,
            ..GameConfig::default()
        });
        core.handle_timeout(Seat::One, &mut rng());
        assert_eq!(core.phase(), Phase::GameOver);

        core.update_config(Seat::One, ConfigUpdate::MaxLives(5))
            .unwrap();
        assert_eq!(core.config().max_lives, 5);
    }

    #[test]
    fn test_variant_mode_locked_after_first_start() {
        let mut core = active_room(GameConfig {
            max_lives: 1,
            ..GameConfig::default()
        });
        core.handle_timeout(Seat::One, &mut rng());
        assert_eq!(core.phase(), Phase::GameOver);

        // Lives may change between rounds, variant mode may not.
        let err = core
            .update_config(Seat::One, ConfigUpdate::VariantMode(VariantMode::Sequence))
            .unwrap_err();
        assert!(matches!(err, RoomError::InvalidPhase { .. }));
    }

    #[test]
    fn test_lobby_lives_follow_max_lives() {
        let mut core = lobby_room(GameConfig::default());
        core.update_config(Seat::One, ConfigUpdate::MaxLives(5))
            .unwrap();
        assert_eq!(core.lives(Seat::One), 5);
        assert_eq!(core.lives(Seat::Two), 5);
    }

    // -- Start -------------------------------------------------------------

    #[test]
    fn test_start_requires_host() {
        let mut core = lobby_room(GameConfig::default());
        let err = core.start_game(Seat::Two, &mut rng()).unwrap_err();
        assert!(matches!(err, RoomError::Forbidden { .. }));
    }

    #[test]
    fn test_start_requires_both_seats() {
        let mut core = room();
        core.claim_seat(Seat::One, PlayerId(1)).unwrap();
        let err = core.start_game(Seat::One, &mut rng()).unwrap_err();
        assert!(matches!(err, RoomError::NotReady(_)));
    }

    #[test]
    fn test_start_initializes_round() {
        let config = GameConfig {
            turn_duration_secs: 5,
            difficulty: Difficulty::Easy,
            ..GameConfig::default()
        };
        let mut core = lobby_room(config);
        let applied = core.start_game(Seat::One, &mut rng()).unwrap();

        assert_eq!(applied.timer, TimerDirective::Arm(5));
        assert_eq!(core.phase(), Phase::Active);
        assert_eq!(core.turn_owner(), Some(Seat::One));
        assert!(!core.prompt().is_empty());
        assert_eq!(core.remaining_seconds(), 5);
        assert_eq!(core.lives(Seat::One), 3);
        assert_eq!(core.lives(Seat::Two), 3);
    }

    #[test]
    fn test_start_mid_round_rejected() {
        let mut core = active_room(GameConfig::default());
        let err = core.start_game(Seat::One, &mut rng()).unwrap_err();
        assert!(matches!(err, RoomError::InvalidPhase { .. }));
    }

    #[test]
    fn test_character_rule_blocks_start_when_enabled() {
        let mut core = RoomCore::new(
            RoomId::new("kitchen"),
            GameConfig::default(),
            RoomPolicy {
                require_characters: true,
                ..RoomPolicy::default()
            },
        );
        core.claim_seat(Seat::One, PlayerId(1)).unwrap();
        core.claim_seat(Seat::Two, PlayerId(2)).unwrap();

        let err = core.start_game(Seat::One, &mut rng()).unwrap_err();
        assert!(matches!(err, RoomError::NotReady(_)));

        core.select_character(Seat::One, Character::Seal).unwrap();
        core.select_character(Seat::Two, Character::Otter).unwrap();
        core.start_game(Seat::One, &mut rng()).unwrap();
        assert_eq!(core.phase(), Phase::Active);
    }

    // -- Submission --------------------------------------------------------

    #[test]
    fn test_valid_submit_advances_turn() {
        let config = GameConfig {
            turn_duration_secs: 5,
            difficulty: Difficulty::Easy,
            ..GameConfig::default()
        };
        let mut core = active_room(config);
        let mut r = rng();

        let word = word_for(&core);
        let outcome = core.submit_word(Seat::One, &word, &mut r);

        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(core.turn_owner(), Some(Seat::Two));
        assert_eq!(core.remaining_seconds(), 5);
        assert!(core.snapshot().used_words.contains(&word));
        assert!(!core.prompt().is_empty());
    }

    #[test]
    fn test_rejected_submit_leaves_state_unchanged() {
        let mut core = active_room(GameConfig::default());
        let before = core.snapshot();

        let outcome = core.submit_word(Seat::One, "zzznotaword", &mut rng());
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(core.snapshot(), before);
    }

    #[test]
    fn test_out_of_turn_submit_ignored() {
        let mut core = active_room(GameConfig::default());
        let word = word_for(&core);
        let outcome = core.submit_word(Seat::Two, &word, &mut rng());
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(core.turn_owner(), Some(Seat::One));
    }

    #[test]
    fn test_submit_outside_active_ignored() {
        let mut core = lobby_room(GameConfig::default());
        let outcome = core.submit_word(Seat::One, "potato", &mut rng());
        assert_eq!(outcome, SubmitOutcome::Ignored);
    }

    #[test]
    fn test_accepted_word_cannot_repeat() {
        let mut core = active_room(GameConfig {
            difficulty: Difficulty::Easy,
            ..GameConfig::default()
        });
        let mut r = rng();

        let word = word_for(&core);
        assert_eq!(core.submit_word(Seat::One, &word, &mut r), SubmitOutcome::Accepted);

        // Walk turns until the same fragment comes around again, then
        // replay the word: it must be rejected as used if it matches,
        // and the history must still contain it exactly once.
        let outcome = core.submit_word(Seat::Two, &word, &mut r);
        if word.contains(core.prompt()) {
            assert_eq!(outcome, SubmitOutcome::Rejected(Verdict::AlreadyUsed));
        }
        let count = core
            .snapshot()
            .used_words
            .iter()
            .filter(|w| **w == word)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_turn_alternates_across_submissions() {
        let mut core = active_room(GameConfig {
            difficulty: Difficulty::Easy,
            ..GameConfig::default()
        });
        let mut r = rng();

        for _ in 0..4 {
            let owner = core.turn_owner().unwrap();
            let word = word_for(&core);
            assert_eq!(core.submit_word(owner, &word, &mut r), SubmitOutcome::Accepted);
            assert_eq!(core.turn_owner(), Some(owner.other()));
        }
    }

    #[test]
    fn test_round_counter_bumps_on_cycle_back_to_host() {
        let mut core = active_room(GameConfig {
            difficulty: Difficulty::Easy,
            ..GameConfig::default()
        });
        let mut r = rng();
        assert_eq!(core.snapshot().round_counter, 0);

        let word = word_for(&core);
        core.submit_word(Seat::One, &word, &mut r);
        assert_eq!(core.snapshot().round_counter, 0);

        let word = word_for(&core);
        core.submit_word(Seat::Two, &word, &mut r);
        assert_eq!(core.snapshot().round_counter, 1);
    }

    // -- Timeout -----------------------------------------------------------

    #[test]
    fn test_timeout_costs_a_life_and_flips_turn() {
        let config = GameConfig {
            turn_duration_secs: 5,
            ..GameConfig::default()
        };
        let mut core = active_room(config);

        let applied = core.handle_timeout(Seat::One, &mut rng());
        assert_eq!(applied.timer, TimerDirective::Arm(5));
        assert_eq!(core.lives(Seat::One), 2);
        assert_eq!(core.turn_owner(), Some(Seat::Two));
        assert_eq!(core.remaining_seconds(), 5);
    }

    #[test]
    fn test_last_life_timeout_ends_game() {
        let mut core = active_room(GameConfig {
            max_lives: 1,
            ..GameConfig::default()
        });

        let applied = core.handle_timeout(Seat::One, &mut rng());
        assert_eq!(applied.timer, TimerDirective::Stop);
        assert_eq!(core.phase(), Phase::GameOver);
        assert_eq!(core.lives(Seat::One), 0);
        assert_eq!(core.lives(Seat::Two), 1);
        assert_eq!(core.snapshot().winner(), Some(Seat::Two));
    }

    #[test]
    fn test_stale_timeout_is_noop() {
        let mut core = active_room(GameConfig {
            difficulty: Difficulty::Easy,
            ..GameConfig::default()
        });
        let mut r = rng();

        // Seat 1 submits just before its timeout lands.
        let word = word_for(&core);
        core.submit_word(Seat::One, &word, &mut r);
        let before = core.snapshot();

        // The late timeout for seat 1 sees seat 2 owning the turn.
        let applied = core.handle_timeout(Seat::One, &mut r);
        assert_eq!(applied.timer, TimerDirective::Keep);
        assert_eq!(core.snapshot(), before);
    }

    #[test]
    fn test_lives_never_go_negative() {
        let mut core = active_room(GameConfig {
            max_lives: 1,
            ..GameConfig::default()
        });
        let mut r = rng();

        core.handle_timeout(Seat::One, &mut r);
        // Replayed timeouts after game over change nothing.
        core.handle_timeout(Seat::One, &mut r);
        core.handle_timeout(Seat::One, &mut r);
        assert_eq!(core.lives(Seat::One), 0);
        assert_eq!(core.phase(), Phase::GameOver);
    }

    // -- Pause -------------------------------------------------------------

    #[test]
    fn test_pause_preserves_countdown() {
        let mut core = active_room(GameConfig::default());
        core.record_tick(7);
        assert_eq!(core.remaining_seconds(), 7);

        let applied = core.toggle_pause(Seat::One).unwrap();
        assert_eq!(applied.timer, TimerDirective::Freeze);
        assert_eq!(core.phase(), Phase::Paused);
        assert_eq!(core.remaining_seconds(), 7);

        let applied = core.toggle_pause(Seat::One).unwrap();
        assert_eq!(applied.timer, TimerDirective::Resume);
        assert_eq!(core.phase(), Phase::Active);
        assert_eq!(core.remaining_seconds(), 7);
    }

    #[test]
    fn test_guest_cannot_pause() {
        let mut core = active_room(GameConfig::default());
        let err = core.toggle_pause(Seat::Two).unwrap_err();
        assert!(matches!(err, RoomError::Forbidden { .. }));
    }

    #[test]
    fn test_pause_outside_round_rejected() {
        let mut core = lobby_room(GameConfig::default());
        let err = core.toggle_pause(Seat::One).unwrap_err();
        assert!(matches!(err, RoomError::InvalidPhase { .. }));
    }

    #[test]
    fn test_ticks_ignored_while_paused() {
        let mut core = active_room(GameConfig::default());
        core.record_tick(7);
        core.toggle_pause(Seat::One).unwrap();
        core.record_tick(3);
        assert_eq!(core.remaining_seconds(), 7);
    }

    #[test]
    fn test_ticks_only_decrease() {
        let mut core = active_room(GameConfig::default());
        core.record_tick(7);
        core.record_tick(9);
        assert_eq!(core.remaining_seconds(), 7);
    }

    // -- Reset -------------------------------------------------------------

    #[test]
    fn test_reset_to_lobby_preserves_seats_and_characters() {
        let mut core = lobby_room(GameConfig {
            max_lives: 1,
            ..GameConfig::default()
        });
        core.select_character(Seat::One, Character::Seal).unwrap();
        core.start_game(Seat::One, &mut rng()).unwrap();
        core.handle_timeout(Seat::One, &mut rng());
        assert_eq!(core.phase(), Phase::GameOver);

        let applied = core.reset_to_lobby(Seat::One).unwrap();
        assert_eq!(applied.timer, TimerDirective::Stop);

        let snap = core.snapshot();
        assert_eq!(snap.phase, Phase::Lobby);
        assert_eq!(snap.players[0].occupant, Some(PlayerId(1)));
        assert_eq!(snap.players[0].character, Some(Character::Seal));
        assert!(snap.used_words.is_empty());
        assert!(snap.prompt.is_empty());
        assert_eq!(snap.round_outcome, None);
    }

    #[test]
    fn test_reset_requires_game_over() {
        let mut core = active_room(GameConfig::default());
        let err = core.reset_to_lobby(Seat::One).unwrap_err();
        assert!(matches!(err, RoomError::InvalidPhase { .. }));
    }

    // -- Presence and forfeit ----------------------------------------------

    #[test]
    fn test_disconnect_flag_does_not_touch_game_state() {
        let mut core = active_room(GameConfig::default());
        let changed = core.set_connected(Seat::Two, false);
        assert!(changed);
        assert_eq!(core.phase(), Phase::Active);
        assert_eq!(core.lives(Seat::Two), 3);

        // Redundant updates report no change.
        assert!(!core.set_connected(Seat::Two, false));
    }

    #[test]
    fn test_forfeit_ends_round_against_seat() {
        let mut core = active_room(GameConfig::default());
        let applied = core.forfeit(Seat::Two);
        assert_eq!(applied.timer, TimerDirective::Stop);
        assert_eq!(core.phase(), Phase::GameOver);
        assert_eq!(core.lives(Seat::Two), 0);
        assert_eq!(core.snapshot().winner(), Some(Seat::One));
    }

    #[test]
    fn test_forfeit_outside_round_is_noop() {
        let mut core = lobby_room(GameConfig::default());
        let applied = core.forfeit(Seat::Two);
        assert_eq!(applied.timer, TimerDirective::Keep);
        assert_eq!(core.phase(), Phase::Lobby);
    }

    // -- Sequence variant --------------------------------------------------

    /// Plays the sequence variant through to the finale.
    #[test]
    fn test_sequence_round_completes_with_success_outcome() {
        let config = GameConfig {
            difficulty: Difficulty::Easy,
            variant_mode: VariantMode::Sequence,
            ..GameConfig::default()
        };
        let mut core = lobby_room(config);
        let mut r = rng();
        core.start_game(Seat::One, &mut r).unwrap();
        assert_eq!(core.prompt(), SEQUENCE_PROMPTS[0]);

        // Walk seat 1 through every fragment of the sequence; seat 2
        // answers ordinary prompts in between.
        for step in 0..SEQUENCE_PROMPTS.len() {
            assert_eq!(core.prompt(), SEQUENCE_PROMPTS[step]);
            let word = word_for(&core);
            assert_eq!(core.submit_word(Seat::One, &word, &mut r), SubmitOutcome::Accepted);

            if step + 1 == SEQUENCE_PROMPTS.len() {
                break;
            }
            let word = word_for(&core);
            assert_eq!(core.submit_word(Seat::Two, &word, &mut r), SubmitOutcome::Accepted);
        }

        // Seat 1 finished the walk: seat 2 now faces the finale.
        assert_eq!(core.prompt(), SEQUENCE_FINALE);
        assert_eq!(core.round_outcome(), None);

        let word = word_for(&core);
        assert_eq!(core.submit_word(Seat::Two, &word, &mut r), SubmitOutcome::Accepted);
        assert_eq!(core.round_outcome(), Some(RoundOutcome::SequenceComplete));
    }
}
