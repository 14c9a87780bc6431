//! Transport straight onto a [`GameStore`], without HTTP.

use crate::db::DbError;
use crate::store::GameStore;
use crate::sync::SyncTransport;
use async_trait::async_trait;
use std::sync::Arc;
use strictly_baseball::{GameId, GameState};
use tracing::{instrument, warn};

/// In-process transport; used by tests and single-process deployments.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    store: Arc<dyn GameStore>,
}

impl LocalTransport {
    /// Wraps a store.
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }

    async fn run<T, F>(&self, f: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn GameStore) -> Result<T, DbError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || f(store.as_ref())).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                warn!(error = %e, "Store call failed");
                None
            }
            Err(e) => {
                warn!(error = %e, "Store task failed");
                None
            }
        }
    }
}

#[async_trait]
impl SyncTransport for LocalTransport {
    #[instrument(skip(self), fields(game_id = %id))]
    async fn fetch(&self, id: &GameId) -> Option<GameState> {
        let id = id.clone();
        self.run(move |store| store.load(&id)).await.flatten()
    }

    #[instrument(skip(self, state), fields(game_id = %id))]
    async fn push(&self, id: &GameId, state: &GameState) -> bool {
        let (id, state) = (id.clone(), state.clone());
        self.run(move |store| store.save(&id, &state)).await.is_some()
    }

    #[instrument(skip(self, state), fields(game_id = %id))]
    async fn create(&self, id: &GameId, state: &GameState) -> bool {
        self.push(id, state).await
    }

    #[instrument(skip(self), fields(game_id = %id))]
    async fn exists(&self, id: &GameId) -> bool {
        let id = id.clone();
        self.run(move |store| store.exists(&id)).await.unwrap_or(false)
    }
}
