use super::observation::{create_observation, Observation};
use crate::error::ConfigError;
use crate::game::{GameConfig, GameEngine, GameState, RelativePolicy, RelativeTurn, StepResult};

/// Headless Snake environment for automated control
///
/// Wraps the game engine with the relative-turn policy and provides:
/// - Discrete action space (one-hot `[straight, right, left]`)
/// - Standard episode interface (reset, step)
/// - The stagnation guard that ends episodes which never resolve
pub struct AgentEnvironment {
    engine: GameEngine<RelativePolicy>,
    state: GameState,
    episode_reward: f32,
}

impl AgentEnvironment {
    /// Create a new environment
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_engine(GameEngine::new(config, RelativePolicy)?))
    }

    /// Create an environment with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::from_engine(GameEngine::with_seed(
            config,
            RelativePolicy,
            seed,
        )?))
    }

    fn from_engine(mut engine: GameEngine<RelativePolicy>) -> Self {
        let state = engine.reset();
        Self {
            engine,
            state,
            episode_reward: 0.0,
        }
    }

    /// Start a new episode and return its first observation
    pub fn reset(&mut self) -> Observation {
        self.state = self.engine.reset();
        self.episode_reward = 0.0;
        create_observation(&self.state)
    }

    /// Step the environment with a one-hot action
    ///
    /// - `[1, 0, 0]`: keep going straight
    /// - `[0, 1, 0]`: turn right
    /// - `[0, 0, 1]`: turn left
    ///
    /// Any other vector keeps the snake going straight.
    pub fn step(&mut self, action: [u8; 3]) -> StepResult {
        self.step_turn(RelativeTurn::from_one_hot(action))
    }

    /// Step the environment with an already decoded turn
    pub fn step_turn(&mut self, turn: RelativeTurn) -> StepResult {
        let result = self.engine.step(&mut self.state, turn);
        self.episode_reward += result.reward;
        result
    }

    /// Get current observation without stepping
    pub fn observation(&self) -> Observation {
        create_observation(&self.state)
    }

    /// Sum of rewards since the last reset
    pub fn episode_reward(&self) -> f32 {
        self.episode_reward
    }

    pub fn is_done(&self) -> bool {
        !self.state.is_alive
    }

    /// Get reference to current game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, EpisodeEnd, Heading};

    fn env() -> AgentEnvironment {
        AgentEnvironment::with_seed(GameConfig::small(), 9).unwrap()
    }

    #[test]
    fn test_environment_creation() {
        let env = env();

        assert!(env.state().is_alive);
        assert!(!env.is_done());
        assert_eq!(env.state().score, 0);
        assert_eq!(env.state().steps, 0);
        assert_eq!(env.episode_reward(), 0.0);
    }

    #[test]
    fn test_step_straight() {
        let mut env = env();
        env.state.food = Cell::new(0, 9);
        let head = env.state().snake.head();

        let result = env.step([1, 0, 0]);

        assert!(!result.terminated);
        assert_eq!(result.reward, 0.0);
        assert_eq!(env.state().snake.head(), head.moved_in(Heading::Right));
        assert_eq!(env.state().steps, 1);
    }

    #[test]
    fn test_one_hot_turns() {
        let mut env = env();

        env.step([0, 1, 0]);
        assert_eq!(env.state().heading(), Heading::Down);

        env.step([0, 0, 1]);
        assert_eq!(env.state().heading(), Heading::Right);

        // Not one-hot: keep going
        env.step([1, 1, 1]);
        assert_eq!(env.state().heading(), Heading::Right);
    }

    #[test]
    fn test_food_reward() {
        let mut env = env();

        // Place food directly in front of snake
        let head = env.state().snake.head();
        env.state.food = head.moved_in(env.state().heading());

        let result = env.step([1, 0, 0]);

        assert_eq!(result.reward, 10.0);
        assert_eq!(result.score, 1);
        assert_eq!(env.state().snake.len(), 4);
        assert_eq!(env.episode_reward(), 10.0);
    }

    #[test]
    fn test_terminal_state_handling() {
        let mut env = env();

        // Run straight into the right wall
        let mut result = env.step([1, 0, 0]);
        while !result.terminated {
            result = env.step([1, 0, 0]);
        }

        assert!(env.is_done());
        assert_eq!(result.reward, -10.0);
        assert_eq!(result.info.end, Some(EpisodeEnd::Wall));

        // Further steps are inert
        let after = env.step([1, 0, 0]);
        assert!(after.terminated);
        assert_eq!(after.reward, 0.0);
    }

    #[test]
    fn test_circling_hits_stagnation_guard() {
        let mut env = env();
        env.state.food = Cell::new(0, 0);

        // Turning right every step circles a 2x2 block forever
        let mut steps = 0;
        let mut result = env.step([0, 1, 0]);
        while !result.terminated {
            steps += 1;
            assert!(steps < 10_000, "stagnation guard never fired");
            result = env.step([0, 1, 0]);
        }

        assert_eq!(result.info.end, Some(EpisodeEnd::Stagnation));
        assert_eq!(env.state().steps, 401);
    }

    #[test]
    fn test_reset_starts_new_episode() {
        let mut env = env();
        env.step([0, 1, 0]);
        env.step([0, 1, 0]);

        let obs = env.reset();

        assert_eq!(env.state().steps, 0);
        assert_eq!(env.state().heading(), Heading::Right);
        assert_eq!(env.episode_reward(), 0.0);
        assert_eq!(obs, env.observation());
    }
}
