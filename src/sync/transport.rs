//! Polling transport contract.

use async_trait::async_trait;
use strictly_baseball::{GameId, GameState};

/// Moves game snapshots to and from the shared store.
///
/// Failures are logged by the implementation and reported as `None` or
/// `false`; callers retry on the next tick.
#[async_trait]
pub trait SyncTransport: Send + Sync + std::fmt::Debug {
    /// Fetches the latest snapshot, `None` if absent or unreachable.
    async fn fetch(&self, id: &GameId) -> Option<GameState>;

    /// Replaces the stored snapshot. Returns true on success.
    async fn push(&self, id: &GameId, state: &GameState) -> bool;

    /// Stores a new game. Returns true on success.
    async fn create(&self, id: &GameId, state: &GameState) -> bool;

    /// Returns true if the game is stored.
    async fn exists(&self, id: &GameId) -> bool;
}
