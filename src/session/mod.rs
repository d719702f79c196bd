//! Interactive session: menus, countdown and the attempts budget

pub mod config;
pub mod machine;

pub use config::{Difficulty, SessionConfig, SnakeColor, MAX_SPEED};
pub use machine::{Session, SessionAction, SessionSnapshot, SessionState, TickOutcome};
