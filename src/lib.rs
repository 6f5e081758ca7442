//! TapReflex - terminal reaction-time mini-game
//!
//! The player clicks a moving target as many times as possible within a
//! fixed number of rounds; the game reports per-tap latency, the fastest
//! tap and the average.

use std::fmt;
use std::time::Duration;

// Public re-exports
pub mod app;
pub mod config;
pub mod game;
pub mod logging;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum TapError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Log sink could not be installed
    LoggingError(String),
}

impl fmt::Display for TapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TapError::IoError(err) => write!(f, "I/O error: {}", err),
            TapError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TapError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            TapError::LoggingError(msg) => write!(f, "Logging error: {}", msg),
        }
    }
}

impl std::error::Error for TapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TapError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TapError {
    fn from(err: std::io::Error) -> Self {
        TapError::IoError(err)
    }
}

impl From<toml::de::Error> for TapError {
    fn from(err: toml::de::Error) -> Self {
        TapError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for TapError {
    fn from(err: toml::ser::Error) -> Self {
        TapError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for TapReflex operations
pub type Result<T> = std::result::Result<T, TapError>;

/// Error handling utilities
pub mod error {
    use super::TapError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &TapError) -> String {
        match error {
            TapError::ConfigError(msg) => {
                format!("Configuration error: {}. Fix or delete the config file.", msg)
            }
            TapError::TuiError(_) => {
                "The terminal could not be prepared. Try a different terminal emulator."
                    .to_string()
            }
            TapError::LoggingError(_) => {
                "Failed to open the log file. Check permissions on the data directory."
                    .to_string()
            }
            TapError::IoError(_) => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "tapreflex";
pub const CONFIG_FILE: &str = "tapreflex.toml";
pub const LOG_FILE: &str = "tapreflex.log";
/// Environment variable holding the tracing filter directive
pub const LOG_ENV_VAR: &str = "TAPREFLEX_LOG";
/// Number of taps in one round sequence
pub const TOTAL_ROUNDS: usize = 5;
/// Target diameter in layout units
pub const TARGET_DIAMETER: f64 = 96.0;
/// Delay before an untapped target moves on its own
pub const AUTO_RELOCATE_DELAY: Duration = Duration::from_millis(3000);
