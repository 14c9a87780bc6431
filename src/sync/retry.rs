//! Joining a game with bounded retries.

use crate::config::ScoreboardConfig;
use crate::sync::{SyncError, SyncTransport};
use derive_getters::Getters;
use std::time::Duration;
use strictly_baseball::{GameId, GameState};
use tracing::{info, instrument, warn};

/// How many times to look for a game and how long to wait in between.
///
/// The wait doubles after every miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_new::new)]
pub struct RetryPolicy {
    attempts: u32,
    initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl From<&ScoreboardConfig> for RetryPolicy {
    fn from(config: &ScoreboardConfig) -> Self {
        Self::new(*config.join_attempts(), config.join_backoff())
    }
}

/// Fetches `id`, retrying per `policy`.
///
/// Returns [`SyncError::NotFound`] once every attempt has missed.
#[instrument(skip(transport), fields(game_id = %id))]
pub async fn join_game(
    transport: &dyn SyncTransport,
    id: &GameId,
    policy: RetryPolicy,
) -> Result<GameState, SyncError> {
    let attempts = policy.attempts.max(1);
    let mut backoff = policy.initial_backoff;

    for attempt in 1..=attempts {
        if let Some(state) = transport.fetch(id).await {
            info!(attempt, "Joined game");
            return Ok(state);
        }
        if attempt < attempts {
            warn!(attempt, ?backoff, "Game not found, retrying");
            tokio::time::sleep(backoff).await;
            backoff = backoff.saturating_mul(2);
        }
    }

    Err(SyncError::NotFound {
        game_id: id.clone(),
        attempts,
    })
}
