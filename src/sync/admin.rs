//! Admin push loop.

use crate::sync::{PollHandle, SyncTransport};
use std::sync::Arc;
use std::time::Duration;
use strictly_baseball::{GameId, GameState};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

/// Pushes every snapshot received on `rx` and re-pushes the latest one
/// every `interval` while the game is active.
///
/// The loop exits once the channel closes, after a final push of the last
/// snapshot seen.
#[instrument(skip(transport, rx), fields(game_id = %id))]
pub fn spawn_admin_sync(
    transport: Arc<dyn SyncTransport>,
    id: GameId,
    interval: Duration,
    mut rx: UnboundedReceiver<GameState>,
) -> PollHandle {
    info!(?interval, "Starting admin sync");
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; nothing to push yet.
        ticker.tick().await;

        let mut latest: Option<GameState> = None;
        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(state) => {
                        if !transport.push(&id, &state).await {
                            warn!("Push failed, will retry on next tick");
                        }
                        latest = Some(state);
                    }
                    None => {
                        debug!("Admin channel closed");
                        break;
                    }
                },
                _ = ticker.tick() => {
                    if let Some(state) = latest.as_ref().filter(|s| s.is_game_active()) {
                        debug!("Periodic push");
                        transport.push(&id, state).await;
                    }
                }
            }
        }

        if let Some(state) = latest {
            transport.push(&id, &state).await;
        }
        info!("Admin sync stopped");
    });
    PollHandle::new(task)
}
