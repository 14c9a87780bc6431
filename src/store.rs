//! Key-value game store.
//!
//! Games are stored as opaque JSON documents keyed by [`GameId`]. Whatever
//! shape is written is read back as-is; the last write wins.

use crate::db::{DbError, GameRepository};
use std::collections::HashMap;
use std::sync::Mutex;
use strictly_baseball::{GameId, GameState};
use tracing::{debug, instrument};

/// Persistence contract for shared game snapshots.
///
/// Calls may block; async callers run them on a blocking thread.
pub trait GameStore: Send + Sync + std::fmt::Debug {
    /// Inserts or replaces the state stored under `id`.
    fn save(&self, id: &GameId, state: &GameState) -> Result<GameId, DbError>;

    /// Loads the state stored under `id`.
    fn load(&self, id: &GameId) -> Result<Option<GameState>, DbError>;

    /// Returns true if a state is stored under `id`.
    fn exists(&self, id: &GameId) -> Result<bool, DbError>;
}

impl GameStore for GameRepository {
    fn save(&self, id: &GameId, state: &GameState) -> Result<GameId, DbError> {
        self.save_game(id, state)
    }

    fn load(&self, id: &GameId) -> Result<Option<GameState>, DbError> {
        self.load_game(id)
    }

    fn exists(&self, id: &GameId) -> Result<bool, DbError> {
        self.game_exists(id)
    }
}

/// In-process store holding serialized documents.
///
/// Storing JSON rather than the state itself gives readers a deep copy and
/// exercises the same round trip as the database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<GameId, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn games(&self) -> Result<std::sync::MutexGuard<'_, HashMap<GameId, String>>, DbError> {
        self.games
            .lock()
            .map_err(|_| DbError::new("Memory store lock poisoned"))
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self, state), fields(game_id = %id))]
    fn save(&self, id: &GameId, state: &GameState) -> Result<GameId, DbError> {
        let document = serde_json::to_string(state)?;
        self.games()?.insert(id.clone(), document);
        debug!("Game saved in memory");
        Ok(id.clone())
    }

    #[instrument(skip(self), fields(game_id = %id))]
    fn load(&self, id: &GameId) -> Result<Option<GameState>, DbError> {
        let document = self.games()?.get(id).cloned();
        match document {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(game_id = %id))]
    fn exists(&self, id: &GameId) -> Result<bool, DbError> {
        Ok(self.games()?.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_baseball::{GameSetup, Player, StateMachine, Team};

    fn state() -> GameState {
        let home = Team::with_players("Home", vec![Player::new("Ana", None)]);
        let away = Team::with_players("Away", vec![Player::new("Beto", Some("12".into()))]);
        let mut machine = StateMachine::new(GameSetup::new(home, away).start().expect("Start failed"));
        machine.add_ball();
        machine.add_strike();
        machine.into_state()
    }

    #[test]
    fn test_memory_round_trip() {
        let store = MemoryStore::new();
        let id = GameId::from("abc1234");
        let original = state();

        assert!(!store.exists(&id).expect("Exists failed"));
        store.save(&id, &original).expect("Save failed");
        assert!(store.exists(&id).expect("Exists failed"));
        assert_eq!(store.load(&id).expect("Load failed"), Some(original));
    }

    #[test]
    fn test_memory_last_write_wins() {
        let store = MemoryStore::new();
        let id = GameId::from("abc1234");
        store.save(&id, &GameState::default()).expect("Save failed");
        let newer = state();
        store.save(&id, &newer).expect("Save failed");
        assert_eq!(store.load(&id).expect("Load failed"), Some(newer));
    }

    #[test]
    fn test_memory_load_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.load(&GameId::from("nope")).expect("Load failed"), None);
    }
}
