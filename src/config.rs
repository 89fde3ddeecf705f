use std::path::Path;

use crate::error::ConfigError;
use crate::game::{Shape, CONNECT, DEFAULT_SIZE};

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board dimension (the grid is board_size × board_size).
    pub board_size: usize,
    /// Shape preselected for the human's first drop.
    pub starting_shape: Shape,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Pause before the computer's move is applied. Presentation pacing only;
    /// the engine itself searches instantly.
    pub delay_ms: u64,
    /// Fixed RNG seed for reproducible games. Random when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_SIZE,
            starting_shape: Shape::Circle,
            ai: AiConfig::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            delay_ms: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < CONNECT {
            return Err(ConfigError::Validation(format!(
                "board_size must be >= {CONNECT}"
            )));
        }
        if self.board_size > 32 {
            return Err(ConfigError::Validation(
                "board_size must be <= 32".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&GameConfig::default()).expect("default config serializes")
    }
}
