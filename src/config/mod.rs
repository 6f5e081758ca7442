//! Configuration management module
//!
//! Handles loading, saving, and validation of the game tunables.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::{
    TapError, Result, APP_NAME, AUTO_RELOCATE_DELAY, CONFIG_FILE, TARGET_DIAMETER, TOTAL_ROUNDS,
};

/// Game configuration containing all tunable parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of taps in one round sequence
    pub total_rounds: usize,
    /// Target diameter in layout units
    pub target_diameter: f64,
    /// Delay before an untapped target relocates itself
    #[serde(with = "duration_serde")]
    pub auto_relocate_delay: Duration,
    /// Redraw/input polling interval of the terminal UI
    #[serde(with = "duration_serde")]
    pub tick_rate: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_rounds: TOTAL_ROUNDS,
            target_diameter: TARGET_DIAMETER,
            auto_relocate_delay: AUTO_RELOCATE_DELAY,
            tick_rate: Duration::from_millis(50),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        const MAX_ROUNDS: usize = 50;
        if self.total_rounds == 0 {
            return Err(TapError::ConfigError(
                "Total rounds must be greater than 0".to_string()
            ));
        }
        if self.total_rounds > MAX_ROUNDS {
            return Err(TapError::ConfigError(
                format!("Too many rounds: {} (max: {})", self.total_rounds, MAX_ROUNDS)
            ));
        }

        if !self.target_diameter.is_finite() || self.target_diameter <= 0.0 {
            return Err(TapError::ConfigError(
                "Target diameter must be a positive number".to_string()
            ));
        }

        const MAX_DELAY: Duration = Duration::from_secs(60);
        if self.auto_relocate_delay.is_zero() {
            return Err(TapError::ConfigError(
                "Auto-relocate delay must be greater than 0".to_string()
            ));
        }
        if self.auto_relocate_delay > MAX_DELAY {
            return Err(TapError::ConfigError(
                format!("Auto-relocate delay too long: {}s (max: {}s)",
                    self.auto_relocate_delay.as_secs(), MAX_DELAY.as_secs())
            ));
        }

        const MAX_TICK: Duration = Duration::from_secs(1);
        if self.tick_rate.is_zero() || self.tick_rate > MAX_TICK {
            return Err(TapError::ConfigError(
                format!("Tick rate must be between 1ms and {}ms", MAX_TICK.as_millis())
            ));
        }

        Ok(())
    }

    /// Set the number of rounds
    pub fn with_total_rounds(mut self, rounds: usize) -> Self {
        self.total_rounds = rounds;
        self
    }

    /// Set the target diameter
    pub fn with_target_diameter(mut self, diameter: f64) -> Self {
        self.target_diameter = diameter;
        self
    }

    /// Set the auto-relocate delay
    pub fn with_auto_relocate_delay(mut self, delay: Duration) -> Self {
        self.auto_relocate_delay = delay;
        self
    }

    /// Set the UI tick rate
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| TapError::ConfigError(
                format!("Failed to read config file {}: {}", config_path.display(), e)
            ))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| TapError::ConfigError(
                format!("Failed to parse config file {}: {}", config_path.display(), e)
            ))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| TapError::ConfigError(
                    format!("Failed to create config directory {}: {}", parent.display(), e)
                ))?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content)
            .map_err(|e| TapError::ConfigError(
                format!("Failed to write config file {}: {}", config_path.display(), e)
            ))?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/tapreflex/tapreflex.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TapError::ConfigError(
                "Unable to determine config directory".to_string()
            ))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

/// Serialize durations as human-readable strings such as "3s" or "50ms"
mod duration_serde {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(D::Error::custom)
    }
}
