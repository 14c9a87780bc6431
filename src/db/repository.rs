//! Database repository for shared game snapshots.

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use strictly_baseball::{GameId, GameState};
use tracing::{debug, info, instrument};

use crate::db::{DbError, GameRecord, NewGameRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite-backed key-value store of games.
///
/// Opens a connection per call, so a clone can be moved into a blocking task.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a repository for the database at the given path.
    ///
    /// Use `":memory:"` for a throwaway database (each connection is fresh).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating GameRepository");
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Inserts or replaces the stored state for a game.
    ///
    /// The last write wins; `created_at` is kept from the first write.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if serialization or the write fails.
    #[instrument(skip(self, state), fields(game_id = %id))]
    pub fn save_game(&self, id: &GameId, state: &GameState) -> Result<GameId, DbError> {
        let record = NewGameRecord::from_state(id, state)?;
        let mut conn = self.connection()?;

        let rows = diesel::insert_into(schema::games::table)
            .values(&record)
            .on_conflict(schema::games::id)
            .do_update()
            .set((
                schema::games::game_state.eq(excluded(schema::games::game_state)),
                schema::games::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        debug!(rows, bytes = record.game_state().len(), "Game saved");
        Ok(id.clone())
    }

    /// Loads the stored state for a game. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails or the stored document does not parse.
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn load_game(&self, id: &GameId) -> Result<Option<GameState>, DbError> {
        let mut conn = self.connection()?;

        let record = schema::games::table
            .filter(schema::games::id.eq(id.as_str()))
            .select(GameRecord::as_select())
            .first::<GameRecord>(&mut conn)
            .optional()?;

        match record {
            Some(record) => {
                debug!(updated_at = %record.updated_at(), "Game found");
                record.parse_state().map(Some)
            }
            None => {
                debug!("Game not found");
                Ok(None)
            }
        }
    }

    /// Returns true if a game is stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn game_exists(&self, id: &GameId) -> Result<bool, DbError> {
        let mut conn = self.connection()?;
        let exists = diesel::select(diesel::dsl::exists(
            schema::games::table.filter(schema::games::id.eq(id.as_str())),
        ))
        .get_result::<bool>(&mut conn)?;
        debug!(exists, "Checked game existence");
        Ok(exists)
    }

    /// Lists stored game ids, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    #[instrument(skip(self))]
    pub fn list_game_ids(&self) -> Result<Vec<GameId>, DbError> {
        let mut conn = self.connection()?;
        let ids = schema::games::table
            .order(schema::games::updated_at.desc())
            .select(schema::games::id)
            .load::<String>(&mut conn)?;
        info!(count = ids.len(), "Games listed");
        Ok(ids.into_iter().map(GameId::from).collect())
    }
}
