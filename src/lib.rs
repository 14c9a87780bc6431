//! Strictly Scoreboard library - live baseball scorekeeping
//!
//! One admin scores a game; spectators follow it by polling a shared store.
//!
//! # Architecture
//!
//! - **Core**: the game state machine lives in `strictly_baseball`
//! - **Store**: games are JSON snapshots keyed by join code (SQLite or memory)
//! - **Server**: an HTTP API over the store
//! - **Sync**: admin push loop, spectator poll loop, join retries
//! - **Scorekeeper**: admin session that locks controls once the game is over
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use strictly_scoreboard::{AppState, MemoryStore, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let state = AppState::new(Arc::new(MemoryStore::new()));
//! serve("127.0.0.1", 3000, state).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod config;
mod db;
mod display;
mod game_id;
mod roster;
mod scorekeeper;
mod server;
mod store;
mod sync;

// Crate-level exports - Wire types
pub use api::{
    ErrorResponse, ExistsResponse, GameIdQuery, GameResponse, SaveGameRequest, SaveGameResponse,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, ScoreboardConfig};
pub use roster::{RosterFile, RosterPlayer, RosterTeam};

// Crate-level exports - Persistence
pub use db::{DbError, GameRecord, GameRepository, NewGameRecord};
pub use store::{GameStore, MemoryStore};

// Crate-level exports - HTTP server
pub use server::{ApiError, AppState, router, serve};

// Crate-level exports - Sync
pub use sync::{
    HttpTransport, LocalTransport, PollHandle, PollUpdate, RetryPolicy, SyncError, SyncTransport,
    join_game, spawn_admin_sync, spawn_spectator,
};

// Crate-level exports - Admin session
pub use scorekeeper::{ActionRejected, Scorekeeper};

// Crate-level exports - Utilities
pub use display::status_line;
pub use game_id::{GAME_ID_LEN, generate_game_id};
