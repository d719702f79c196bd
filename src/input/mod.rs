//! Keyboard input for the human driver

pub mod handler;

pub use handler::{InputHandler, KeyAction};
