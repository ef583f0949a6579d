//! Referee configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for one refereed match.
///
/// Every key is optional in the TOML file; missing keys take the defaults
/// below. Command-line flags are applied on top with the `with_*` setters.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct RefereeConfig {
    /// Per-move deadline in milliseconds, measured from send to a complete line.
    move_timeout_ms: u64,
    /// Render the board to stdout after every move.
    visual: bool,
    /// Serve the web visualizer.
    web: bool,
    /// Port for the web visualizer.
    port: u16,
    /// Randomly decide which command plays blue.
    random_colors: bool,
    /// Pass the players' stderr through instead of discarding it.
    forward_stderr: bool,
    /// Pause after each accepted move, in milliseconds.
    move_delay_ms: u64,
    /// Draw after this many consecutive moves without a capture.
    quiet_move_limit: Option<u32>,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            move_timeout_ms: 5000,
            visual: true,
            web: false,
            port: 8000,
            random_colors: true,
            forward_stderr: false,
            move_delay_ms: 0,
            quiet_move_limit: None,
        }
    }
}

impl RefereeConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(timeout_ms = config.move_timeout_ms, "Config loaded successfully");
        Ok(config)
    }

    /// Rejects settings the referee cannot run with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_timeout_ms == 0 {
            return Err(ConfigError::new(
                "move_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.quiet_move_limit == Some(0) {
            return Err(ConfigError::new(
                "quiet_move_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-move deadline.
    pub fn move_timeout(&self) -> Duration {
        Duration::from_millis(self.move_timeout_ms)
    }

    /// Pause after each accepted move.
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
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
