//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The same engine drives keyboard play and agents; only the direction policy differs.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod geometry;
pub mod policy;
pub mod state;

// Re-export commonly used types
pub use action::{Heading, RelativeTurn};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::FoodPlacer;
pub use geometry::GridGeometry;
pub use policy::{AbsolutePolicy, DirectionBuffer, DirectionPolicy, RelativePolicy};
pub use state::{Cell, EpisodeEnd, GameState, Snake};
