//! Strictly Scoreboard game store server (HTTP)
//!
//! Reads `PORT` (default 3000) and `DATABASE_PATH` (default
//! `strictly_scoreboard.db`) from the environment.

use anyhow::Result;
use std::sync::Arc;
use strictly_scoreboard::{AppState, GameRepository, serve};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let db_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "strictly_scoreboard.db".to_string());

    info!(port, db_path = %db_path, "Starting game store server");
    let repository = GameRepository::new(db_path)?;
    repository.run_migrations()?;

    serve("0.0.0.0", port, AppState::new(Arc::new(repository))).await
}
