//! HTTP API over a [`GameStore`].
//!
//! Routes:
//! - `POST /api/games` stores `{gameId, gameState}`
//! - `GET /api/games?gameId=` returns the stored state
//! - `GET /api/games/exists?gameId=` reports whether a game is stored
//! - `GET /health`

use crate::api::{
    ErrorResponse, ExistsResponse, GameIdQuery, GameResponse, SaveGameRequest, SaveGameResponse,
};
use crate::db::DbError;
use crate::store::GameStore;
use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use strictly_baseball::{GameId, GameState};
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument, warn};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<dyn GameStore>,
}

impl AppState {
    /// Wraps a store.
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }

    /// Runs a blocking store call off the async runtime.
    async fn with_store<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn GameStore) -> Result<T, DbError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| ApiError::Internal(format!("Store task failed: {}", e)))?
            .map_err(|e| ApiError::Internal(e.to_string()))
    }
}

/// Error returned by a handler.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// Malformed request.
    #[display("{}", _0)]
    BadRequest(String),
    /// No such game.
    #[display("Game not found")]
    NotFound,
    /// Store failure.
    #[display("{}", _0)]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Game store failure".to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Builds the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/games", get(get_game).post(save_game))
        .route("/api/games/exists", get(game_exists))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

/// Binds and serves until the process is stopped.
#[instrument(skip(state))]
pub async fn serve(host: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Scoreboard ready at http://{}:{}/", host, port);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

fn require_id(query: GameIdQuery) -> Result<GameId, ApiError> {
    match query.game_id {
        Some(id) if !id.trim().is_empty() => Ok(GameId::from(id)),
        _ => Err(ApiError::BadRequest("Game ID is required".to_string())),
    }
}

#[instrument(skip_all)]
async fn save_game(
    State(state): State<AppState>,
    Json(body): Json<SaveGameRequest>,
) -> Result<Json<SaveGameResponse>, ApiError> {
    let (Some(game_id), Some(document)) = (body.game_id, body.game_state) else {
        warn!("Save request missing id or state");
        return Err(ApiError::BadRequest(
            "Game ID and game state are required".to_string(),
        ));
    };
    let game_state: GameState = serde_json::from_value(document)
        .map_err(|e| ApiError::BadRequest(format!("Invalid game state: {}", e)))?;

    debug!(game_id = %game_id, "Saving game");
    let saved = state
        .with_store(move |store| store.save(&game_id, &game_state))
        .await?;
    Ok(Json(SaveGameResponse {
        success: true,
        game_id: saved,
    }))
}

#[instrument(skip_all)]
async fn get_game(
    State(state): State<AppState>,
    Query(query): Query<GameIdQuery>,
) -> Result<Json<GameResponse>, ApiError> {
    let game_id = require_id(query)?;
    let game_state = state
        .with_store(move |store| store.load(&game_id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(GameResponse {
        success: true,
        game_state,
    }))
}

#[instrument(skip_all)]
async fn game_exists(
    State(state): State<AppState>,
    Query(query): Query<GameIdQuery>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let game_id = require_id(query)?;
    let exists = state
        .with_store(move |store| store.exists(&game_id))
        .await?;
    Ok(Json(ExistsResponse {
        success: true,
        exists,
    }))
}
