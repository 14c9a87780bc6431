//! Database persistence layer for shared game snapshots.

mod error;
mod models;
mod repository;
mod schema; // Diesel schema - internal use only

pub use error::DbError;
pub use models::{GameRecord, NewGameRecord};
pub use repository::GameRepository;
