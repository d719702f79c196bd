//! Grid Snake - a grid-based Snake simulation for keyboard play and agents
//!
//! This library provides:
//! - Core game logic shared by both drivers (game module)
//! - Interactive session with menus, countdown and attempts (session module)
//! - Headless environment and built-in agents (agent module)
//! - TUI rendering and keyboard input (render, input modules)
//! - Score tracking (metrics module)
//! - Execution modes (human, agent)

pub mod agent;
pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;

pub use error::ConfigError;
