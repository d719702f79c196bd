use serde::{Deserialize, Serialize};

use super::food::DEFAULT_RETRY_LIMIT;
use super::geometry::GridGeometry;
use crate::error::ConfigError;

/// Configuration for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in pixels
    pub board_width: u32,
    /// Board height in pixels
    pub board_height: u32,
    /// Side of one cell in pixels
    pub cell_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Rewards (for agents)
    /// Reward for eating food
    pub food_reward: f32,
    /// Reward for a step that neither eats nor ends the episode
    pub step_reward: f32,
    /// Penalty for dying
    pub death_penalty: f32,

    /// Agent episodes end once steps exceed this many times the snake length
    pub stagnation_factor: u32,
    /// Random draws before food placement falls back to a scan
    pub food_retry_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 640,
            board_height: 480,
            cell_size: 20,
            initial_snake_length: 3,
            food_reward: 10.0,
            step_reward: 0.0,
            death_penalty: -10.0,
            stagnation_factor: 100,
            food_retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size in pixels
    pub fn new(board_width: u32, board_height: u32) -> Self {
        Self {
            board_width,
            board_height,
            ..Default::default()
        }
    }

    /// A 10x10 cell board for testing
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Board geometry, validated
    pub fn geometry(&self) -> Result<GridGeometry, ConfigError> {
        GridGeometry::new(self.board_width, self.board_height, self.cell_size)
    }

    /// Check that the board is well formed and the starting snake fits on it
    pub fn validate(&self) -> Result<GridGeometry, ConfigError> {
        let board = self.geometry()?;

        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        // The snake starts at the centre and extends to the left
        let tail_x = board.center().x - (self.initial_snake_length as i32 - 1);
        if tail_x < 0 || self.initial_snake_length >= board.cell_count() {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                columns: board.columns(),
            });
        }

        Ok(board)
    }
}
