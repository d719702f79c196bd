use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{
    action::Heading,
    config::GameConfig,
    food::FoodPlacer,
    geometry::GridGeometry,
    policy::DirectionPolicy,
    state::{Cell, EpisodeEnd, GameState, Snake},
};
use crate::error::ConfigError;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the episode ended, if it did
    pub end: Option<EpisodeEnd>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for agents)
    pub reward: f32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Score after the step
    pub score: u32,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
///
/// Generic over the input modality: `GameEngine<AbsolutePolicy>` for
/// keyboard play, `GameEngine<RelativePolicy>` for agents.
pub struct GameEngine<P: DirectionPolicy> {
    config: GameConfig,
    board: GridGeometry,
    policy: P,
    placer: FoodPlacer,
    rng: StdRng,
}

impl<P: DirectionPolicy> GameEngine<P> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig, policy: P) -> Result<Self, ConfigError> {
        Self::with_rng(config, policy, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, policy: P, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, policy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, policy: P, rng: StdRng) -> Result<Self, ConfigError> {
        let board = config.validate()?;
        let placer = FoodPlacer::new(config.food_retry_limit);

        Ok(Self {
            config,
            board,
            policy,
            placer,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> GridGeometry {
        self.board
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            self.board.center(),
            Heading::Right,
            self.config.initial_snake_length,
        );

        // A validated config always leaves at least one free cell
        let food = self.place_food(&snake).unwrap_or_else(|| snake.tail());

        GameState::new(snake, food, self.board)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, input: P::Input) -> StepResult {
        if !state.is_alive {
            return StepResult {
                reward: 0.0,
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    end: None,
                },
            };
        }

        state.steps += 1;

        let heading = self.policy.resolve(state.snake.heading, input);
        state.snake.heading = heading;

        // Grow tentatively; the tail is dropped below unless food is eaten
        let new_head = state.snake.head().moved_in(heading);
        state.snake.advance(new_head, true);

        if let Some(end) = self.check_end(state) {
            return self.finish(state, end, self.config.death_penalty, false);
        }

        if new_head != state.food {
            state.snake.retract_tail();
            return StepResult {
                reward: self.config.step_reward,
                terminated: false,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    end: None,
                },
            };
        }

        state.score += 1;
        let reward = self.config.food_reward;

        match self.place_food(&state.snake) {
            Some(food) => {
                state.food = food;
                StepResult {
                    reward,
                    terminated: false,
                    score: state.score,
                    info: StepInfo {
                        ate_food: true,
                        end: None,
                    },
                }
            }
            None => self.finish(state, EpisodeEnd::BoardFull, reward, true),
        }
    }

    /// Check the freshly advanced head against walls, the body and the step cap
    fn check_end(&self, state: &GameState) -> Option<EpisodeEnd> {
        if state.snake.collides_with_wall(&self.board) {
            return Some(EpisodeEnd::Wall);
        }

        if state.snake.collides_with_self() {
            return Some(EpisodeEnd::SelfCollision);
        }

        let cap = u64::from(self.config.stagnation_factor) * state.snake.len() as u64;
        if self.policy.stagnation_guard() && u64::from(state.steps) > cap {
            return Some(EpisodeEnd::Stagnation);
        }

        None
    }

    fn finish(
        &self,
        state: &mut GameState,
        end: EpisodeEnd,
        reward: f32,
        ate_food: bool,
    ) -> StepResult {
        state.is_alive = false;
        debug!(
            "episode ended after {} steps: {:?}, score {}",
            state.steps, end, state.score
        );

        StepResult {
            reward,
            terminated: true,
            score: state.score,
            info: StepInfo {
                ate_food,
                end: Some(end),
            },
        }
    }

    /// Spawn food at a random cell the snake does not cover
    fn place_food(&mut self, snake: &Snake) -> Option<Cell> {
        self.placer
            .place(&mut self.rng, &self.board, &snake.occupied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{AbsolutePolicy, RelativePolicy, RelativeTurn};

    fn human_engine() -> GameEngine<AbsolutePolicy> {
        GameEngine::with_seed(GameConfig::small(), AbsolutePolicy, 11).unwrap()
    }

    fn agent_engine() -> GameEngine<RelativePolicy> {
        GameEngine::with_seed(GameConfig::small(), RelativePolicy, 11).unwrap()
    }

    fn board() -> GridGeometry {
        GameConfig::small().geometry().unwrap()
    }

    #[test]
    fn test_reset() {
        let mut engine = human_engine();
        let state = engine.reset();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Cell::new(5, 5));
        assert_eq!(state.heading(), Heading::Right);
        assert!(!state.snake.contains(state.food));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            cell_size: 0,
            ..GameConfig::default()
        };
        assert!(GameEngine::new(config, AbsolutePolicy).is_err());
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = human_engine();
        let mut state = engine.reset();
        state.food = Cell::new(0, 0);
        let initial_head = state.snake.head();

        let result = engine.step(&mut state, None);

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(result.reward, 0.0);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.head(), initial_head.moved_in(Heading::Right));
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = agent_engine();
        let mut state = engine.reset();

        // Place food directly in front of snake
        state.food = state.snake.head().moved_in(state.heading());
        let initial_length = state.snake.len();

        let result = engine.step(&mut state, RelativeTurn::Straight);

        assert!(result.info.ate_food);
        assert_eq!(result.score, 1);
        assert_eq!(state.score, 1);
        assert_eq!(result.reward, 10.0);
        assert_eq!(state.snake.len(), initial_length + 1);
        assert!(!state.snake.contains(state.food));
        assert!(state.snake.is_well_formed());
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = agent_engine();
        let mut state = GameState::new(
            Snake::new(Cell::new(0, 5), Heading::Left, 3),
            Cell::new(5, 5),
            board(),
        );
        state.score = 4;

        let result = engine.step(&mut state, RelativeTurn::Straight);

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(result.reward, -10.0);
        assert_eq!(result.score, 4);
        assert_eq!(result.info.end, Some(EpisodeEnd::Wall));
        assert_eq!(state.food, Cell::new(5, 5));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = human_engine();

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Cell::new(5, 5), Heading::Right, 5);
        let mut state = GameState::new(snake, Cell::new(8, 8), board());

        // Down: (5,6), (5,5), (4,5), (3,5), (2,5)
        engine.step(&mut state, Some(Heading::Down));
        // Left: (4,6), (5,6), (5,5), (4,5), (3,5)
        engine.step(&mut state, Some(Heading::Left));
        // Up: (4,5) is still occupied
        let result = engine.step(&mut state, Some(Heading::Up));

        assert!(result.terminated);
        assert_eq!(result.info.end, Some(EpisodeEnd::SelfCollision));
    }

    #[test]
    fn test_moving_into_current_tail_cell_collides() {
        let mut engine = human_engine();
        // Head (5,5) heading left, tail at (5,6) directly below the head
        let snake = Snake::from_cells(
            [
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6),
            ],
            Heading::Left,
        )
        .unwrap();
        let mut state = GameState::new(snake, Cell::new(0, 0), board());

        let result = engine.step(&mut state, Some(Heading::Down));

        assert!(result.terminated);
        assert_eq!(result.info.end, Some(EpisodeEnd::SelfCollision));
    }

    #[test]
    fn test_following_vacated_tail_cell_is_legal() {
        let mut engine = human_engine();
        let snake = Snake::from_cells(
            [
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6),
            ],
            Heading::Left,
        )
        .unwrap();
        let mut state = GameState::new(snake, Cell::new(0, 0), board());

        // Tail leaves (5,6) this step while the head goes to (4,5)
        let first = engine.step(&mut state, None);
        assert!(!first.terminated);

        // Loop round; the head keeps entering cells the tail has already left
        for heading in [Heading::Down, Heading::Right, Heading::Right, Heading::Up] {
            let result = engine.step(&mut state, Some(heading));
            assert!(!result.terminated, "collided heading {heading:?}");
            assert!(state.snake.is_well_formed());
        }
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = human_engine();
        let mut state = engine.reset();
        let head = state.snake.head();

        let result = engine.step(&mut state, Some(Heading::Left));

        assert!(!result.terminated);
        assert_eq!(state.heading(), Heading::Right);
        assert_eq!(state.snake.head(), head.moved_in(Heading::Right));
    }

    #[test]
    fn test_relative_turn_changes_heading() {
        let mut engine = agent_engine();
        let mut state = engine.reset();

        engine.step(&mut state, RelativeTurn::TurnRight);
        assert_eq!(state.heading(), Heading::Down);

        engine.step(&mut state, RelativeTurn::TurnLeft);
        assert_eq!(state.heading(), Heading::Right);
    }

    #[test]
    fn test_stagnation_guard_agent_only() {
        let snake = Snake::from_cells(
            [
                Cell::new(4, 4),
                Cell::new(3, 4),
                Cell::new(3, 5),
                Cell::new(4, 5),
            ],
            Heading::Right,
        )
        .unwrap();

        let mut agent = agent_engine();
        let mut state = GameState::new(snake.clone(), Cell::new(9, 9), board());
        state.steps = 100 * 5;
        let result = agent.step(&mut state, RelativeTurn::Straight);
        assert!(result.terminated);
        assert_eq!(result.info.end, Some(EpisodeEnd::Stagnation));
        assert_eq!(result.reward, -10.0);

        let mut human = human_engine();
        let mut state = GameState::new(snake, Cell::new(9, 9), board());
        state.steps = 100 * 5;
        let result = human.step(&mut state, None);
        assert!(!result.terminated);
    }

    #[test]
    fn test_board_full_ends_episode() {
        let config = GameConfig {
            board_width: 60,
            board_height: 20,
            cell_size: 20,
            initial_snake_length: 2,
            ..GameConfig::default()
        };
        let mut engine = GameEngine::with_seed(config, AbsolutePolicy, 3).unwrap();
        let mut state = engine.reset();
        assert_eq!(state.snake.head(), Cell::new(1, 0));
        assert_eq!(state.food, Cell::new(2, 0));

        let result = engine.step(&mut state, None);

        assert!(result.terminated);
        assert!(result.info.ate_food);
        assert_eq!(result.info.end, Some(EpisodeEnd::BoardFull));
        assert_eq!(result.reward, 10.0);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = human_engine();
        let mut state = engine.reset();
        state.is_alive = false;
        let steps_before = state.steps;
        let snake_before = state.snake.clone();

        let result = engine.step(&mut state, None);

        assert!(result.terminated);
        assert_eq!(result.reward, 0.0);
        assert_eq!(state.steps, steps_before);
        assert_eq!(state.snake, snake_before);
    }
}
