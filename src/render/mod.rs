//! Terminal presentation of a session snapshot

pub mod renderer;

pub use renderer::Renderer;
