//! Sync errors.

use strictly_baseball::GameId;

/// Error surfaced by the sync layer.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SyncError {
    /// The game was not found after every join attempt.
    #[display("Game {} not found after {} attempts", game_id, attempts)]
    NotFound {
        /// Requested game.
        game_id: GameId,
        /// Attempts made.
        attempts: u32,
    },

    /// The store refused a new game.
    #[display("Failed to create game {}", _0)]
    CreateFailed(GameId),
}

impl std::error::Error for SyncError {}
