//! Headless, action-driven interface to the engine
//!
//! Provides:
//! - `AgentEnvironment`: reset/step over one-hot relative turn actions
//! - An 11-feature observation vector for external learners
//! - Built-in `GreedyAgent` and `RandomAgent` controllers

pub mod environment;
pub mod observation;
pub mod policy;

pub use environment::AgentEnvironment;
pub use observation::{create_observation, Observation, OBSERVATION_SIZE};
pub use policy::{Agent, GreedyAgent, RandomAgent};
