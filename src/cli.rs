//! Command-line interface for strictly_scoreboard.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Scoreboard - live baseball scorekeeping with polling spectators
#[derive(Parser, Debug)]
#[command(name = "strictly_scoreboard")]
#[command(about = "Live baseball scoreboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Client configuration file (defaults apply if missing)
    #[arg(short, long, global = true, default_value = "scoreboard.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the game store HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, env = "PORT", default_value = "3000")]
        port: u16,

        /// SQLite database file (overrides the config file)
        #[arg(long)]
        db_path: Option<String>,

        /// Keep games in memory instead of SQLite
        #[arg(long)]
        memory: bool,
    },

    /// List games stored in the local SQLite database, newest first
    List {
        /// SQLite database file (overrides the config file)
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Create a game from a roster file and print its join code
    Create {
        /// Roster TOML file
        #[arg(short, long)]
        roster: PathBuf,

        /// Server URL (overrides the config file)
        #[arg(long)]
        server_url: Option<String>,
    },

    /// Score a game interactively, one action per line on stdin
    Admin {
        /// Join code
        game_id: String,

        /// Server URL (overrides the config file)
        #[arg(long)]
        server_url: Option<String>,
    },

    /// Follow a game as a spectator
    Watch {
        /// Join code
        game_id: String,

        /// Server URL (overrides the config file)
        #[arg(long)]
        server_url: Option<String>,
    },

    /// Print the line score of a stored game
    Summary {
        /// Join code
        game_id: String,

        /// Server URL (overrides the config file)
        #[arg(long)]
        server_url: Option<String>,
    },
}
