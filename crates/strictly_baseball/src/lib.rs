//! Strictly Baseball - live game state for a baseball scoreboard
//!
//! This crate holds the rules by which scoring events (ball, strike, out,
//! hit, walk, run, side switch, undo) transform a game, with no I/O.
//!
//! # Architecture
//!
//! - **GameState**: the authoritative snapshot of one game, serialized as JSON
//! - **StateMachine**: the single mutator, with a single-slot undo point
//! - **Action**: first-class scoring events, applied atomically
//! - **Invariants**: properties every resting state satisfies
//!
//! # Example
//!
//! ```
//! use strictly_baseball::{Action, GameSetup, Player, StateMachine, Team};
//!
//! let home = Team::with_players("Home", vec![Player::new("Ana", None)]);
//! let away = Team::with_players("Away", vec![Player::new("Beto", None)]);
//! let mut game = StateMachine::new(GameSetup::new(home, away).start().unwrap());
//!
//! game.apply(Action::AddStrike);
//! assert_eq!(game.state().strikes(), 1);
//!
//! game.apply(Action::Undo);
//! assert_eq!(game.state().strikes(), 0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod machine;
mod phase;
mod reducer;
mod setup;
mod state;
mod summary;
mod types;

// Public module declarations
pub mod invariants;
pub mod rules;

// Crate-level exports - Actions and transitions
pub use action::{Action, ActionParseError, GameEvent, PlayKind, Transition};

// Crate-level exports - State machine
pub use machine::StateMachine;

// Crate-level exports - State
pub use phase::{Half, HalfInning, Phase};
pub use state::{GameState, LastAction, MAX_BALLS, MAX_INNINGS, MAX_OUTS, MAX_STRIKES};

// Crate-level exports - Setup and summary
pub use setup::{GameSetup, SetupError, RECOMMENDED_MIN_PLAYERS};
pub use summary::{GameSummary, ProductiveInning};

// Crate-level exports - Domain types
pub use types::{Base, BasePath, Bases, GameId, Player, PlayerId, RosterError, Score, Side, Team};
