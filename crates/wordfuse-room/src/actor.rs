//! Room actor: an isolated Tokio task that owns one game.
//!
//! Each room runs in its own task and is reached only through an mpsc
//! channel, so commands for a room are applied one at a time in arrival
//! order — the serialization point every turn-race guarantee rests on.
//! The actor also owns the room's [`TurnTimer`]; dropping the actor
//! drops the timer, so no countdown can outlive its room.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use wordfuse_protocol::{
    Character, Command, ConfigUpdate, GameConfig, PlayerId, RoomId, RoomSnapshot,
    Seat,
};
use wordfuse_sync::SyncGateway;
use wordfuse_timer::TurnTimer;

use crate::state::{RoomCore, SubmitOutcome, TimerDirective};
use crate::{DisconnectPolicy, RoomError, RoomPolicy};

/// Commands sent to a room actor through its channel.
///
/// Variants carrying a `oneshot::Sender` are request/response: the
/// caller awaits the reply channel.
pub(crate) enum RoomCommand {
    ClaimSeat {
        seat: Seat,
        player: PlayerId,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    SelectCharacter {
        seat: Seat,
        character: Character,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    UpdateConfig {
        seat: Seat,
        update: ConfigUpdate,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    StartGame {
        seat: Seat,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    SubmitWord {
        seat: Seat,
        word: String,
        reply: oneshot::Sender<SubmitOutcome>,
    },
    TogglePause {
        seat: Seat,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    ResetToLobby {
        seat: Seat,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    /// Presence change from the heartbeat boundary. Fire-and-forget.
    SetConnected { seat: Seat, connected: bool },
    Snapshot {
        reply: oneshot::Sender<RoomSnapshot>,
    },
    Shutdown,
}

/// Reply to a wire-level [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// The command was applied.
    Ack,
    /// A word submission's three-way outcome.
    Submit(SubmitOutcome),
}

/// Handle to a running room actor. Cheap to clone.
#[derive(Clone, Debug)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Sends a request command and awaits its reply.
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> RoomCommand,
    ) -> Result<T, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(make(reply_tx))
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    pub async fn claim_seat(
        &self,
        seat: Seat,
        player: PlayerId,
    ) -> Result<(), RoomError> {
        self.request(|reply| RoomCommand::ClaimSeat { seat, player, reply })
            .await?
    }

    pub async fn select_character(
        &self,
        seat: Seat,
        character: Character,
    ) -> Result<(), RoomError> {
        self.request(|reply| RoomCommand::SelectCharacter {
            seat,
            character,
            reply,
        })
        .await?
    }

    pub async fn update_config(
        &self,
        seat: Seat,
        update: ConfigUpdate,
    ) -> Result<(), RoomError> {
        self.request(|reply| RoomCommand::UpdateConfig { seat, update, reply })
            .await?
    }

    pub async fn start_game(&self, seat: Seat) -> Result<(), RoomError> {
        self.request(|reply| RoomCommand::StartGame { seat, reply })
            .await?
    }

    pub async fn submit_word(
        &self,
        seat: Seat,
        word: impl Into<String>,
    ) -> Result<SubmitOutcome, RoomError> {
        let word = word.into();
        self.request(|reply| RoomCommand::SubmitWord { seat, word, reply })
            .await
    }

    pub async fn toggle_pause(&self, seat: Seat) -> Result<(), RoomError> {
        self.request(|reply| RoomCommand::TogglePause { seat, reply })
            .await?
    }

    pub async fn reset_to_lobby(&self, seat: Seat) -> Result<(), RoomError> {
        self.request(|reply| RoomCommand::ResetToLobby { seat, reply })
            .await?
    }

    /// Reports a seat's liveness as observed at the heartbeat boundary.
    pub async fn set_connected(
        &self,
        seat: Seat,
        connected: bool,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::SetConnected { seat, connected })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// The current authoritative snapshot.
    pub async fn snapshot(&self) -> Result<RoomSnapshot, RoomError> {
        self.request(|reply| RoomCommand::Snapshot { reply }).await
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Applies a serialized wire command, routing it onto the typed
    /// entry points above.
    pub async fn apply(&self, command: Command) -> Result<CommandReply, RoomError> {
        match command {
            Command::ClaimSeat { seat, player } => {
                self.claim_seat(seat, player).await.map(|_| CommandReply::Ack)
            }
            Command::SelectCharacter { seat, character } => self
                .select_character(seat, character)
                .await
                .map(|_| CommandReply::Ack),
            Command::UpdateConfig { seat, update } => self
                .update_config(seat, update)
                .await
                .map(|_| CommandReply::Ack),
            Command::StartGame { seat } => {
                self.start_game(seat).await.map(|_| CommandReply::Ack)
            }
            Command::SubmitWord { seat, word } => self
                .submit_word(seat, word)
                .await
                .map(CommandReply::Submit),
            Command::TogglePause { seat } => {
                self.toggle_pause(seat).await.map(|_| CommandReply::Ack)
            }
            Command::ResetToLobby { seat } => {
                self.reset_to_lobby(seat).await.map(|_| CommandReply::Ack)
            }
        }
    }
}

/// The room actor. Runs inside a Tokio task until shut down.
struct RoomActor {
    core: RoomCore,
    timer: TurnTimer,
    gateway: SyncGateway,
    rng: StdRng,
    receiver: mpsc::Receiver<RoomCommand>,
    /// When each seat was last seen going offline, for the forfeit
    /// policy.
    disconnected_since: [Option<Instant>; 2],
}

impl RoomActor {
    async fn run(mut self) {
        tracing::info!(room_id = %self.core.id(), "room actor started");

        loop {
            tokio::select! {
                maybe_cmd = self.receiver.recv() => {
                    match maybe_cmd {
                        Some(cmd) => {
                            if self.handle_command(cmd) {
                                break;
                            }
                        }
                        // All handles dropped: tear the room down.
                        None => break,
                    }
                }
                remaining = self.timer.wait_for_tick() => {
                    self.handle_tick(remaining);
                }
            }
            self.enforce_disconnect_policy();
        }

        tracing::info!(room_id = %self.core.id(), "room actor stopped");
    }

    /// Applies one command. Returns `true` on shutdown.
    fn handle_command(&mut self, cmd: RoomCommand) -> bool {
        match cmd {
            RoomCommand::ClaimSeat { seat, player, reply } => {
                let result = self.core.claim_seat(seat, player);
                self.finish(&result);
                let _ = reply.send(result.map(|_| ()));
            }
            RoomCommand::SelectCharacter {
                seat,
                character,
                reply,
            } => {
                let result = self.core.select_character(seat, character);
                self.finish(&result);
                let _ = reply.send(result.map(|_| ()));
            }
            RoomCommand::UpdateConfig { seat, update, reply } => {
                let result = self.core.update_config(seat, update);
                self.finish(&result);
                let _ = reply.send(result.map(|_| ()));
            }
            RoomCommand::StartGame { seat, reply } => {
                let result = self.core.start_game(seat, &mut self.rng);
                self.finish(&result);
                let _ = reply.send(result.map(|_| ()));
            }
            RoomCommand::SubmitWord { seat, word, reply } => {
                let outcome = self.core.submit_word(seat, &word, &mut self.rng);
                if outcome == SubmitOutcome::Accepted {
                    self.timer.arm(self.core.config().turn_duration_secs);
                    self.sync();
                }
                let _ = reply.send(outcome);
            }
            RoomCommand::TogglePause { seat, reply } => {
                let result = self.core.toggle_pause(seat);
                self.finish(&result);
                let _ = reply.send(result.map(|_| ()));
            }
            RoomCommand::ResetToLobby { seat, reply } => {
                let result = self.core.reset_to_lobby(seat);
                self.finish(&result);
                let _ = reply.send(result.map(|_| ()));
            }
            RoomCommand::SetConnected { seat, connected } => {
                if self.core.set_connected(seat, connected) {
                    self.disconnected_since[seat.index()] =
                        (!connected).then(Instant::now);
                    self.sync();
                }
            }
            RoomCommand::Snapshot { reply } => {
                let _ = reply.send(self.core.snapshot());
            }
            RoomCommand::Shutdown => {
                return true;
            }
        }
        false
    }

    /// One countdown decrement from the timer.
    fn handle_tick(&mut self, remaining: u16) {
        self.core.record_tick(remaining);
        self.gateway
            .publish_tick(self.core.id().clone(), remaining);

        // At zero the timer has stopped itself; apply the penalty and
        // let the directive arm the next turn (or stay stopped on game
        // over).
        if remaining == 0 {
            if let Some(owner) = self.core.turn_owner() {
                let applied = self.core.handle_timeout(owner, &mut self.rng);
                self.apply_directive(applied.timer);
                self.sync();
            }
        }
    }

    /// Applies the timer side of a successful transition and syncs the
    /// new snapshot out.
    fn finish(&mut self, result: &Result<crate::state::Applied, RoomError>) {
        if let Ok(applied) = result {
            self.apply_directive(applied.timer);
            self.sync();
        }
    }

    fn apply_directive(&mut self, directive: TimerDirective) {
        match directive {
            TimerDirective::Keep => {}
            TimerDirective::Arm(secs) => self.timer.arm(secs),
            TimerDirective::Freeze => self.timer.freeze(),
            TimerDirective::Resume => self.timer.resume(),
            TimerDirective::Stop => self.timer.stop(),
        }
    }

    fn sync(&self) {
        self.gateway.sync_snapshot(self.core.snapshot());
    }

    /// Forfeits the round against a seat that has been gone longer than
    /// the policy's grace period. Evaluated on every command and tick,
    /// which while a round is running means at least once a second.
    fn enforce_disconnect_policy(&mut self) {
        let DisconnectPolicy::Forfeit { grace } = self.core.policy().disconnect
        else {
            return;
        };
        if !self.core.phase().in_round() {
            return;
        }
        for seat in [Seat::One, Seat::Two] {
            if let Some(since) = self.disconnected_since[seat.index()] {
                if since.elapsed() >= grace {
                    let applied = self.core.forfeit(seat);
                    self.apply_directive(applied.timer);
                    self.sync();
                    return;
                }
            }
        }
    }
}

/// Spawns a new room actor task and returns a handle to it.
pub(crate) fn spawn_room(
    id: RoomId,
    config: GameConfig,
    policy: RoomPolicy,
    gateway: SyncGateway,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        core: RoomCore::new(id.clone(), config, policy),
        timer: TurnTimer::new(),
        gateway,
        rng: StdRng::from_os_rng(),
        receiver: rx,
        disconnected_since: [None, None],
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id: id,
        sender: tx,
    }
}
