//! Wire types for the `/api/games` HTTP API.
//!
//! Shared by the axum handlers and the reqwest transport.

use serde::{Deserialize, Serialize};
use strictly_baseball::{GameId, GameState};

/// Body of `POST /api/games`.
///
/// Both fields are optional on the wire so a missing one can be reported as
/// a 400 with a message rather than a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameRequest {
    /// Key to store under.
    #[serde(default)]
    pub game_id: Option<GameId>,
    /// State document.
    #[serde(default)]
    pub game_state: Option<serde_json::Value>,
}

impl SaveGameRequest {
    /// Builds a request for a state.
    pub fn new(game_id: GameId, game_state: &GameState) -> Result<Self, serde_json::Error> {
        Ok(Self {
            game_id: Some(game_id),
            game_state: Some(serde_json::to_value(game_state)?),
        })
    }
}

/// Response of `POST /api/games`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameResponse {
    /// Always true.
    pub success: bool,
    /// Key the state was stored under.
    pub game_id: GameId,
}

/// Query string carrying a game id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameIdQuery {
    /// Requested game.
    #[serde(default)]
    pub game_id: Option<String>,
}

/// Response of `GET /api/games`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    /// Always true.
    pub success: bool,
    /// Stored state.
    pub game_state: GameState,
}

/// Response of `GET /api/games/exists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    /// Always true.
    pub success: bool,
    /// Whether the game is stored.
    pub exists: bool,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}
