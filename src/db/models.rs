//! Database models for stored games.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use strictly_baseball::{GameId, GameState};
use tracing::instrument;

use crate::db::{DbError, schema};

/// A stored game: the id plus the state as an opaque JSON document.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRecord {
    id: String,
    game_state: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRecord {
    /// Parses the stored document back into a [`GameState`].
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn parse_state(&self) -> Result<GameState, DbError> {
        Ok(serde_json::from_str(&self.game_state)?)
    }
}

/// Insertable game row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    id: String,
    game_state: String,
}

impl NewGameRecord {
    /// Serializes a game state for storage under `id`.
    #[instrument(skip(state), fields(game_id = %id))]
    pub fn from_state(id: &GameId, state: &GameState) -> Result<Self, DbError> {
        Ok(Self::new(id.to_string(), serde_json::to_string(state)?))
    }
}
