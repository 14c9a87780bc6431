//! Spectator polling loop.

use crate::sync::SyncTransport;
use std::sync::Arc;
use std::time::Duration;
use strictly_baseball::{GameId, GameState, Phase};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Update delivered to a spectator.
#[derive(Debug, Clone, PartialEq)]
pub enum PollUpdate {
    /// A snapshot differing from the last one delivered.
    Snapshot(GameState),
    /// The game is not stored (or the store is unreachable).
    Missing,
    /// The game reached its final phase; polling has stopped.
    Ended(GameState),
}

/// Handle to a background sync task. The task is aborted on drop.
#[derive(Debug)]
pub struct PollHandle {
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Stops the task.
    pub fn stop(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the task to exit on its own.
    pub async fn finished(mut self) {
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
            && !e.is_cancelled()
        {
            warn!(error = %e, "Sync task failed");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Polls `id` every `interval` and forwards changed snapshots to `tx`.
///
/// The first fetch happens immediately. `Missing` is only sent on a
/// transition from found to not found (or on the first poll). The loop
/// exits when the game ends or the receiver is dropped.
#[instrument(skip(transport, tx), fields(game_id = %id))]
pub fn spawn_spectator(
    transport: Arc<dyn SyncTransport>,
    id: GameId,
    interval: Duration,
    tx: UnboundedSender<PollUpdate>,
) -> PollHandle {
    info!(?interval, "Starting spectator poll");
    let task = tokio::spawn(async move {
        let mut last: Option<GameState> = None;
        let mut reported_missing = false;

        loop {
            match transport.fetch(&id).await {
                Some(state) if matches!(state.phase(), Phase::Final(_)) => {
                    info!("Game ended, stopping spectator poll");
                    let _ = tx.send(PollUpdate::Ended(state));
                    break;
                }
                Some(state) => {
                    reported_missing = false;
                    if last.as_ref() != Some(&state) {
                        debug!(inning = state.inning(), "New snapshot");
                        last = Some(state.clone());
                        if tx.send(PollUpdate::Snapshot(state)).is_err() {
                            debug!("Spectator channel closed");
                            break;
                        }
                    }
                }
                None => {
                    if !reported_missing {
                        warn!("Game not available");
                        reported_missing = true;
                        if tx.send(PollUpdate::Missing).is_err() {
                            break;
                        }
                    }
                }
            }

            if tx.is_closed() {
                break;
            }
            tokio::time::sleep(interval).await;
        }
    });
    PollHandle::new(task)
}
