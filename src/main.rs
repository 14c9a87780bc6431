//! Strictly Scoreboard - Unified CLI
//!
//! Game store server, admin scorekeeping, and spectator clients.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use std::sync::Arc;
use strictly_baseball::{Action, GameId, GameSummary, Phase};
use strictly_scoreboard::{
    AppState, GameRepository, GameStore, HttpTransport, MemoryStore, PollUpdate, RetryPolicy,
    RosterFile, Scorekeeper, ScoreboardConfig, SyncError, SyncTransport, generate_game_id,
    join_game, serve, spawn_admin_sync, spawn_spectator, status_line,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_scoreboard=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ScoreboardConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Serve {
            host,
            port,
            db_path,
            memory,
        } => run_server(&config, host, port, db_path, memory).await,
        Command::List { db_path } => run_list(&config, db_path),
        Command::Create { roster, server_url } => {
            run_create(&config, &roster, server_url).await
        }
        Command::Admin {
            game_id,
            server_url,
        } => run_admin(&config, GameId::from(game_id), server_url).await,
        Command::Watch {
            game_id,
            server_url,
        } => run_watch(&config, GameId::from(game_id), server_url).await,
        Command::Summary {
            game_id,
            server_url,
        } => run_summary(&config, GameId::from(game_id), server_url).await,
    }
}

fn transport(config: &ScoreboardConfig, server_url: Option<String>) -> Arc<dyn SyncTransport> {
    let url = server_url.unwrap_or_else(|| config.server_url().clone());
    Arc::new(HttpTransport::new(url))
}

/// Run the game store HTTP server
#[instrument(skip(config))]
async fn run_server(
    config: &ScoreboardConfig,
    host: String,
    port: u16,
    db_path: Option<String>,
    memory: bool,
) -> Result<()> {
    let store: Arc<dyn GameStore> = if memory {
        info!("Using in-memory game store");
        Arc::new(MemoryStore::new())
    } else {
        let path = db_path.unwrap_or_else(|| config.db_path().clone());
        let repository = GameRepository::new(path.clone())?;
        repository.run_migrations()?;
        info!(path = %path, "Using SQLite game store");
        Arc::new(repository)
    };

    serve(&host, port, AppState::new(store)).await
}

/// Print stored join codes
#[instrument(skip(config))]
fn run_list(config: &ScoreboardConfig, db_path: Option<String>) -> Result<()> {
    let path = db_path.unwrap_or_else(|| config.db_path().clone());
    let repository = GameRepository::new(path)?;
    repository.run_migrations()?;
    for id in repository.list_game_ids()? {
        println!("{}", id);
    }
    Ok(())
}

/// Create a game from a roster and print its join code
#[instrument(skip(config))]
async fn run_create(
    config: &ScoreboardConfig,
    roster: &Path,
    server_url: Option<String>,
) -> Result<()> {
    let roster = RosterFile::from_file(roster)?;
    let game_id = generate_game_id();
    let state = roster.to_setup()?.game_id(game_id.clone()).start()?;

    let transport = transport(config, server_url);
    if !transport.create(&game_id, &state).await {
        return Err(SyncError::CreateFailed(game_id).into());
    }

    info!(game_id = %game_id, "Game created");
    println!("{}", game_id);
    Ok(())
}

/// Score a game from stdin
#[instrument(skip(config))]
async fn run_admin(
    config: &ScoreboardConfig,
    game_id: GameId,
    server_url: Option<String>,
) -> Result<()> {
    let transport = transport(config, server_url);
    let state = join_game(transport.as_ref(), &game_id, RetryPolicy::from(config)).await?;

    if !state.is_game_active() {
        println!("Game {} is not in progress.", game_id);
        if matches!(state.phase(), Phase::Final(_)) {
            println!("{}", GameSummary::from_state(&state));
        }
        return Ok(());
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let sync = spawn_admin_sync(
        Arc::clone(&transport),
        game_id.clone(),
        config.poll_interval(),
        rx,
    );
    let mut keeper = Scorekeeper::new(game_id, state).with_updates(tx);
    println!("{}", status_line(keeper.state()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        match keeper.apply(action) {
            Ok(transition) if transition.is_applied() => {
                println!("{}", status_line(keeper.state()))
            }
            Ok(_) => println!("(no change)"),
            Err(e) => println!("{}", e),
        }
        if keeper.is_game_over() {
            println!("{}", keeper.summary());
            break;
        }
    }

    // Closing the channel lets the sync task flush the last snapshot.
    drop(keeper);
    sync.finished().await;
    Ok(())
}

/// Follow a game until it ends
#[instrument(skip(config))]
async fn run_watch(
    config: &ScoreboardConfig,
    game_id: GameId,
    server_url: Option<String>,
) -> Result<()> {
    let transport = transport(config, server_url);
    join_game(transport.as_ref(), &game_id, RetryPolicy::from(config)).await?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _poll = spawn_spectator(transport, game_id, config.poll_interval(), tx);

    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Some(PollUpdate::Snapshot(state)) => println!("{}", status_line(&state)),
                Some(PollUpdate::Missing) => println!("Waiting for game..."),
                Some(PollUpdate::Ended(state)) => {
                    println!("{}", status_line(&state));
                    println!("{}", GameSummary::from_state(&state));
                    break;
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted");
                break;
            }
        }
    }
    Ok(())
}

/// Print a stored game's line score
#[instrument(skip(config))]
async fn run_summary(
    config: &ScoreboardConfig,
    game_id: GameId,
    server_url: Option<String>,
) -> Result<()> {
    let transport = transport(config, server_url);
    let state = join_game(transport.as_ref(), &game_id, RetryPolicy::from(config)).await?;
    println!("{}", GameSummary::from_state(&state));
    Ok(())
}
