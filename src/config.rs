//! Scoreboard configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings shared by the server, the admin client and spectators.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
pub struct ScoreboardConfig {
    /// Base URL of the scoreboard HTTP API.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// SQLite database file used by `serve`.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Seconds between polls (and periodic admin pushes).
    #[serde(default = "default_poll_interval_secs")]
    poll_interval_secs: u64,

    /// Attempts made to find a game before giving up.
    #[serde(default = "default_join_attempts")]
    join_attempts: u32,

    /// Delay before the second join attempt; doubles after each failure.
    #[serde(default = "default_join_backoff_ms")]
    join_backoff_ms: u64,
}

#[instrument]
fn default_server_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

#[instrument]
fn default_db_path() -> String {
    "strictly_scoreboard.db".to_string()
}

#[instrument]
fn default_poll_interval_secs() -> u64 {
    5
}

#[instrument]
fn default_join_attempts() -> u32 {
    3
}

#[instrument]
fn default_join_backoff_ms() -> u64 {
    1000
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            db_path: default_db_path(),
            poll_interval_secs: default_poll_interval_secs(),
            join_attempts: default_join_attempts(),
            join_backoff_ms: default_join_backoff_ms(),
        }
    }
}

impl ScoreboardConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Poll interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Initial join backoff as a duration.
    pub fn join_backoff(&self) -> Duration {
        Duration::from_millis(self.join_backoff_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "server_url = \"http://scores.local:8080\"\npoll_interval_secs = 2")
            .expect("Write failed");

        let config = ScoreboardConfig::from_file(file.path()).expect("Load failed");
        assert_eq!(config.server_url(), "http://scores.local:8080");
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert_eq!(*config.join_attempts(), 3);
        assert_eq!(config.db_path(), "strictly_scoreboard.db");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config =
            ScoreboardConfig::load_or_default(dir.path().join("absent.toml")).expect("Load failed");
        assert_eq!(config, ScoreboardConfig::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "poll_interval_secs = \"soon\"").expect("Write failed");
        let err = ScoreboardConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_setters_override() {
        let config = ScoreboardConfig::default().with_server_url("http://other:9000");
        assert_eq!(config.server_url(), "http://other:9000");
    }
}
