pub mod agent;
pub mod human;

pub use agent::{AgentConfig, AgentKind, AgentMode};
pub use human::HumanMode;
