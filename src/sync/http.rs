//! Transport over the scoreboard HTTP API.

use crate::api::{ExistsResponse, GameResponse, SaveGameRequest, SaveGameResponse};
use crate::sync::SyncTransport;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use strictly_baseball::{GameId, GameState};
use tracing::{debug, info, instrument, warn};

/// HTTP client for `/api/games`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a client for the server at `base_url`.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!("Creating HTTP transport");
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base_url}{path}?gameId=…` with the id form-encoded.
    fn game_url(&self, path: &str, id: &GameId) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .with_context(|| format!("Invalid server URL '{}'", self.base_url))?;
        url.query_pairs_mut().append_pair("gameId", id.as_str());
        Ok(url)
    }

    async fn try_fetch(&self, id: &GameId) -> Result<Option<GameState>> {
        let url = self.game_url("/api/games", id)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("GET /api/games failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: GameResponse = response
            .error_for_status()?
            .json()
            .await
            .context("Invalid game response")?;
        Ok(Some(body.game_state))
    }

    async fn try_save(&self, id: &GameId, state: &GameState) -> Result<GameId> {
        let url = format!("{}/api/games", self.base_url);
        let request = SaveGameRequest::new(id.clone(), state)?;
        let body: SaveGameResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("POST /api/games failed")?
            .error_for_status()?
            .json()
            .await
            .context("Invalid save response")?;
        Ok(body.game_id)
    }

    async fn try_exists(&self, id: &GameId) -> Result<bool> {
        let url = self.game_url("/api/games/exists", id)?;
        let body: ExistsResponse = self
            .client
            .get(url)
            .send()
            .await
            .context("GET /api/games/exists failed")?
            .error_for_status()?
            .json()
            .await
            .context("Invalid exists response")?;
        Ok(body.exists)
    }
}

#[async_trait]
impl SyncTransport for HttpTransport {
    #[instrument(skip(self), fields(game_id = %id))]
    async fn fetch(&self, id: &GameId) -> Option<GameState> {
        match self.try_fetch(id).await {
            Ok(state) => {
                debug!(found = state.is_some(), "Fetched game");
                state
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch game");
                None
            }
        }
    }

    #[instrument(skip(self, state), fields(game_id = %id))]
    async fn push(&self, id: &GameId, state: &GameState) -> bool {
        match self.try_save(id, state).await {
            Ok(_) => {
                debug!("Pushed game");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to push game");
                false
            }
        }
    }

    #[instrument(skip(self, state), fields(game_id = %id))]
    async fn create(&self, id: &GameId, state: &GameState) -> bool {
        match self.try_save(id, state).await {
            Ok(saved) => {
                info!(saved = %saved, "Created game");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to create game");
                false
            }
        }
    }

    #[instrument(skip(self), fields(game_id = %id))]
    async fn exists(&self, id: &GameId) -> bool {
        self.try_exists(id).await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to check game existence");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_url_encodes_id() {
        let transport = HttpTransport::new("http://scores.local:3000/");
        let url = transport
            .game_url("/api/games", &GameId::from("a&b #c"))
            .expect("Valid URL");
        assert_eq!(url.as_str(), "http://scores.local:3000/api/games?gameId=a%26b+%23c");
        assert_eq!(
            url.query_pairs().collect::<Vec<_>>(),
            vec![("gameId".into(), "a&b #c".into())]
        );
    }

    #[test]
    fn test_game_url_rejects_bad_base() {
        let transport = HttpTransport::new("not a url");
        assert!(transport.game_url("/api/games", &GameId::from("abc1234")).is_err());
    }
}
