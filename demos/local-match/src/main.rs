//! Plays a scripted two-player match against the in-memory Store/Bus.
//!
//! Run with `RUST_LOG=info cargo run -p local-match` to watch the room
//! actor's structured logs alongside the bus traffic printed here.

use std::sync::Arc;
use std::time::{Duration, Instant};

use wordfuse_protocol::{
    BusEvent, Character, Command, ConfigUpdate, Difficulty, GameConfig, Phase,
    PlayerId, RoomId, Seat,
};
use wordfuse_room::{RoomHandle, RoomManager, SubmitOutcome};
use wordfuse_sync::{MemoryBus, MemoryStore, PresenceTracker, SyncGateway};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let gateway =
        SyncGateway::new(Arc::new(MemoryStore::new()), Arc::new(MemoryBus::new()));
    let mut manager = RoomManager::new(gateway.clone());

    let room_id = RoomId::new("demo-kitchen");
    let handle = manager.create_room(room_id.clone(), GameConfig::default())?;

    // An observer rendering the bus, the way a second browser would.
    let mut events = gateway.subscribe(&room_id).await;
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                BusEvent::StateChanged { snapshot } => println!(
                    "[bus] {} | turn {:?} | prompt {:?} | lives {}-{}",
                    snapshot.phase,
                    snapshot.turn_owner.map(u8::from),
                    snapshot.prompt,
                    snapshot.players[0].lives,
                    snapshot.players[1].lives,
                ),
                BusEvent::TimerTick { remaining_seconds } => {
                    println!("[bus] tick: {remaining_seconds}s left")
                }
                BusEvent::Typing { seat, text } => {
                    println!("[bus] {seat} is typing {text:?}")
                }
                BusEvent::PresenceSync { connected } => {
                    println!("[bus] connected: {connected:?}")
                }
            }
        }
    });

    // Both players sit down and get ready.
    handle.claim_seat(Seat::One, PlayerId(1)).await?;
    handle.claim_seat(Seat::Two, PlayerId(2)).await?;

    let mut presence = PresenceTracker::new(Duration::from_secs(2));
    let joined_at = Instant::now();
    presence.heartbeat(Seat::One, joined_at);
    presence.heartbeat(Seat::Two, joined_at);
    gateway
        .publish_presence(&room_id, presence.connected(joined_at))
        .await?;

    handle
        .select_character(Seat::One, Character::Seal)
        .await?;
    handle
        .select_character(Seat::Two, Character::Otter)
        .await?;

    // The host tunes the match, including one wire-shaped command.
    handle
        .update_config(Seat::One, ConfigUpdate::Difficulty(Difficulty::Easy))
        .await?;
    handle
        .apply(Command::UpdateConfig {
            seat: Seat::One,
            update: ConfigUpdate::MaxLives(1),
        })
        .await?;

    handle.start_game(Seat::One).await?;

    // A few clean turns.
    for _ in 0..4 {
        let snap = handle.snapshot().await?;
        let Some(seat) = snap.turn_owner else { break };

        gateway
            .send_typing(&room_id, seat, snap.prompt.to_lowercase())
            .await?;
        let word = pick_word(&handle).await?;
        match handle.submit_word(seat, word.clone()).await? {
            SubmitOutcome::Accepted => println!("{seat} played {word}"),
            other => println!("{seat} failed with {other:?}"),
        }
    }

    // The host takes a breather, then lets their own clock run out.
    handle.toggle_pause(Seat::One).await?;
    tokio::time::sleep(Duration::from_secs(2)).await;
    handle.toggle_pause(Seat::One).await?;

    // Seat 2's heartbeat has gone stale by now; surface the liveness
    // change without touching the game itself.
    let now = Instant::now();
    presence.heartbeat(Seat::One, now);
    let connected = presence.connected(now);
    handle
        .set_connected(Seat::Two, connected.contains(&Seat::Two))
        .await?;
    gateway.publish_presence(&room_id, connected).await?;

    let duration = handle.snapshot().await?.config.turn_duration_secs;
    tokio::time::sleep(Duration::from_secs(duration as u64 + 1)).await;

    let snap = handle.snapshot().await?;
    if snap.phase == Phase::GameOver {
        match snap.winner() {
            Some(winner) => println!("game over — {winner} wins"),
            None => println!("game over"),
        }
    }

    manager.destroy_room(&room_id).await?;
    Ok(())
}

/// Picks the first unplayed corpus word matching the current prompt.
async fn pick_word(handle: &RoomHandle) -> Result<String, Box<dyn std::error::Error>> {
    let snap = handle.snapshot().await?;
    wordfuse_words::dictionary::playable_words()
        .iter()
        .find(|w| w.contains(snap.prompt.as_str()) && !snap.used_words.contains(*w))
        .cloned()
        .ok_or_else(|| format!("no word for prompt {:?}", snap.prompt).into())
}
