//! Session configuration
//!
//! Everything the menus let a player pick (speed, colour) and the rules of the
//! attempts meta-game live here, so independent sessions never share state.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::GameConfig;

/// Fastest selectable speed; one step per millisecond
pub const MAX_SPEED: u32 = 1000;

/// A selectable game speed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub name: String,
    /// Simulation steps per second
    pub speed: u32,
}

impl Difficulty {
    pub fn new(name: impl Into<String>, speed: u32) -> Self {
        Self {
            name: name.into(),
            speed,
        }
    }

    /// Time between two simulation steps
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed.clamp(1, MAX_SPEED)))
    }
}

/// A selectable snake colour, as RGB triples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeColor {
    pub name: String,
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
}

impl SnakeColor {
    pub fn new(name: impl Into<String>, primary: [u8; 3], secondary: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            primary,
            secondary,
        }
    }
}

/// Configuration for one interactive session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Playthroughs allowed before the session refuses to start another
    pub max_attempts: u32,
    /// Length of the pre-start countdown
    pub countdown_secs: u64,
    pub difficulties: Vec<Difficulty>,
    pub default_difficulty: usize,
    pub colors: Vec<SnakeColor>,
    pub default_color: usize,
    /// Optional seed for food placement
    pub seed: Option<u64>,
    pub game: GameConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            countdown_secs: 3,
            difficulties: vec![
                Difficulty::new("Very easy", 10),
                Difficulty::new("Easy", 15),
                Difficulty::new("Normal", 20),
                Difficulty::new("Hard", 25),
                Difficulty::new("Very hard", 30),
            ],
            default_difficulty: 2,
            colors: vec![
                SnakeColor::new("Blue", [0, 0, 255], [0, 100, 255]),
                SnakeColor::new("Green", [0, 200, 0], [0, 255, 0]),
                SnakeColor::new("Red", [200, 0, 0], [255, 0, 0]),
                SnakeColor::new("Purple", [128, 0, 128], [180, 0, 180]),
                SnakeColor::new("Orange", [255, 140, 0], [255, 165, 0]),
                SnakeColor::new("Cyan", [0, 180, 180], [0, 255, 255]),
            ],
            default_color: 0,
            seed: None,
            game: GameConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Read a JSON config file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;

        if self.difficulties.is_empty() {
            return Err(ConfigError::EmptyTable("difficulties"));
        }
        if self.colors.is_empty() {
            return Err(ConfigError::EmptyTable("colors"));
        }
        if let Some(bad) = self.difficulties.iter().find(|d| d.speed == 0) {
            return Err(ConfigError::InvalidSpeed(bad.speed));
        }
        if let Some(bad) = self.difficulties.iter().find(|d| d.speed > MAX_SPEED) {
            return Err(ConfigError::SpeedTooHigh {
                speed: bad.speed,
                max: MAX_SPEED,
            });
        }
        check_index("default_difficulty", self.default_difficulty, self.difficulties.len())?;
        check_index("default_color", self.default_color, self.colors.len())?;

        Ok(())
    }
}

fn check_index(field: &'static str, index: usize, len: usize) -> Result<(), ConfigError> {
    if index >= len {
        return Err(ConfigError::IndexOutOfRange { field, index, len });
    }
    Ok(())
}
