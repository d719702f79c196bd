use std::time::{Duration, Instant};

use log::debug;

use super::config::{Difficulty, SessionConfig, SnakeColor};
use crate::error::ConfigError;
use crate::game::{
    AbsolutePolicy, Cell, DirectionBuffer, GameEngine, GameState, GridGeometry, Heading, Snake,
    StepResult,
};

/// Screen the session is currently on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Menu,
    Countdown,
    Playing,
    GameOver,
    DifficultySelect,
    ColorSelect,
}

/// Discrete user intents fed into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Play,
    OpenDifficulty,
    OpenColors,
    Back,
    SelectDifficulty(usize),
    SelectColor(usize),
    Steer(Heading),
    Escape,
    Restart,
    Menu,
}

/// What a call to [`Session::tick`] did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing to simulate on this screen
    Idle,
    /// Still counting down
    CountingDown { remaining_secs: u64 },
    /// One simulation step ran and the game goes on
    Stepped(StepResult),
    /// One simulation step ran and ended the playthrough
    GameOver(StepResult),
    /// No attempts left, so play was abandoned
    ReturnedToMenu,
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone)]
pub struct SessionSnapshot<'a> {
    pub state: SessionState,
    pub board: GridGeometry,
    pub snake: &'a Snake,
    pub food: Cell,
    pub score: u32,
    pub heading: Heading,
    pub is_alive: bool,
    pub attempts_remaining: u32,
    pub max_attempts: u32,
    /// Whole seconds left, only while counting down
    pub countdown_remaining: Option<u64>,
    pub difficulties: &'a [Difficulty],
    pub difficulty: usize,
    pub colors: &'a [SnakeColor],
    pub color: usize,
}

impl SessionSnapshot<'_> {
    pub fn selected_color(&self) -> &SnakeColor {
        &self.colors[self.color]
    }

    pub fn selected_difficulty(&self) -> &Difficulty {
        &self.difficulties[self.difficulty]
    }
}

/// Interactive meta-game around a keyboard-driven engine
///
/// Owns the menus, the countdown, and the attempts budget. Time is passed in
/// by the caller so the countdown can be polled without blocking.
pub struct Session {
    config: SessionConfig,
    engine: GameEngine<AbsolutePolicy>,
    game: GameState,
    buffer: DirectionBuffer,
    state: SessionState,
    attempts_remaining: u32,
    difficulty: usize,
    color: usize,
    countdown_started: Instant,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = match config.seed {
            Some(seed) => GameEngine::with_seed(config.game.clone(), AbsolutePolicy, seed)?,
            None => GameEngine::new(config.game.clone(), AbsolutePolicy)?,
        };
        let game = engine.reset();

        Ok(Self {
            attempts_remaining: config.max_attempts,
            difficulty: config.default_difficulty,
            color: config.default_color,
            config,
            engine,
            game,
            buffer: DirectionBuffer::new(),
            state: SessionState::Menu,
            countdown_started: Instant::now(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.config.difficulties[self.difficulty]
    }

    pub fn color(&self) -> &SnakeColor {
        &self.config.colors[self.color]
    }

    /// Time between simulation steps at the selected difficulty
    pub fn tick_interval(&self) -> Duration {
        self.difficulty().tick_interval()
    }

    /// Apply a user action; returns whether anything changed.
    ///
    /// Actions that make no sense on the current screen, or that need an
    /// attempt when none are left, are ignored.
    pub fn handle(&mut self, action: SessionAction, now: Instant) -> bool {
        use SessionAction as A;
        use SessionState as S;

        match (self.state, action) {
            (S::Menu, A::Play) | (S::GameOver, A::Restart) => {
                if self.attempts_remaining == 0 {
                    debug!("no attempts left, ignoring {:?}", action);
                    return false;
                }
                self.start_playthrough(now);
                true
            }
            (S::Menu, A::OpenDifficulty) => self.transition(S::DifficultySelect),
            (S::Menu, A::OpenColors) => self.transition(S::ColorSelect),
            (S::DifficultySelect, A::SelectDifficulty(index))
                if index < self.config.difficulties.len() =>
            {
                self.difficulty = index;
                true
            }
            (S::ColorSelect, A::SelectColor(index)) if index < self.config.colors.len() => {
                self.color = index;
                true
            }
            (S::DifficultySelect | S::ColorSelect, A::Back) => self.transition(S::Menu),
            (S::Countdown | S::Playing, A::Escape) => {
                self.buffer.clear();
                self.transition(S::Menu)
            }
            (S::Playing, A::Steer(heading)) => self.buffer.push(heading, self.game.heading()),
            (S::GameOver, A::Menu) => self.transition(S::Menu),
            _ => false,
        }
    }

    /// Advance the session by one tick: poll the countdown, then run at most
    /// one simulation step.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        match self.state {
            SessionState::Countdown | SessionState::Playing if self.attempts_remaining == 0 => {
                self.transition(SessionState::Menu);
                TickOutcome::ReturnedToMenu
            }
            SessionState::Countdown => match self.countdown_remaining(now) {
                Some(remaining_secs) => TickOutcome::CountingDown { remaining_secs },
                None => {
                    self.transition(SessionState::Playing);
                    self.step()
                }
            },
            SessionState::Playing => self.step(),
            _ => TickOutcome::Idle,
        }
    }

    pub fn snapshot(&self, now: Instant) -> SessionSnapshot<'_> {
        let countdown_remaining = match self.state {
            SessionState::Countdown => self.countdown_remaining(now),
            _ => None,
        };

        SessionSnapshot {
            state: self.state,
            board: self.engine.board(),
            snake: &self.game.snake,
            food: self.game.food,
            score: self.game.score,
            heading: self.game.heading(),
            is_alive: self.game.is_alive,
            attempts_remaining: self.attempts_remaining,
            max_attempts: self.config.max_attempts,
            countdown_remaining,
            difficulties: &self.config.difficulties,
            difficulty: self.difficulty,
            colors: &self.config.colors,
            color: self.color,
        }
    }

    fn start_playthrough(&mut self, now: Instant) {
        self.game = self.engine.reset();
        self.buffer.clear();
        self.countdown_started = now;
        self.transition(SessionState::Countdown);
    }

    fn step(&mut self) -> TickOutcome {
        let input = self.buffer.take();
        let result = self.engine.step(&mut self.game, input);

        if !result.terminated {
            return TickOutcome::Stepped(result);
        }

        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        debug!(
            "playthrough over with score {}, {} attempts left",
            result.score, self.attempts_remaining
        );
        self.transition(SessionState::GameOver);
        TickOutcome::GameOver(result)
    }

    /// Whole seconds left on the countdown, or `None` once it has expired
    fn countdown_remaining(&self, now: Instant) -> Option<u64> {
        let elapsed = now.saturating_duration_since(self.countdown_started);
        let total = Duration::from_secs(self.config.countdown_secs);

        if elapsed >= total {
            None
        } else {
            Some(self.config.countdown_secs - elapsed.as_secs())
        }
    }

    fn transition(&mut self, to: SessionState) -> bool {
        debug!("session {:?} -> {:?}", self.state, to);
        self.state = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    fn config() -> SessionConfig {
        SessionConfig {
            seed: Some(42),
            game: GameConfig::small(),
            ..SessionConfig::default()
        }
    }

    fn session() -> Session {
        Session::new(config()).unwrap()
    }

    /// Start a playthrough and run past the countdown
    fn start_playing(session: &mut Session, now: Instant) -> Instant {
        assert!(session.handle(SessionAction::Play, now));
        let later = now + Duration::from_secs(session.config().countdown_secs);
        // First tick after expiry also runs a step
        session.tick(later);
        later
    }

    fn crash(session: &mut Session, mut now: Instant) -> StepResult {
        loop {
            now += Duration::from_millis(50);
            match session.tick(now) {
                TickOutcome::GameOver(result) => return result,
                TickOutcome::Stepped(_) => {}
                other => panic!("unexpected outcome {other:?}"),
            }
        }
    }

    #[test]
    fn test_starts_in_menu() {
        let session = session();
        assert_eq!(session.state(), SessionState::Menu);
        assert_eq!(session.attempts_remaining(), 6);
        assert_eq!(session.difficulty().name, "Normal");
        assert_eq!(session.color().name, "Blue");
    }

    #[test]
    fn test_menu_navigation() {
        let mut session = session();
        let now = Instant::now();

        assert!(session.handle(SessionAction::OpenDifficulty, now));
        assert_eq!(session.state(), SessionState::DifficultySelect);
        assert!(session.handle(SessionAction::SelectDifficulty(4), now));
        assert!(!session.handle(SessionAction::SelectDifficulty(5), now));
        assert_eq!(session.difficulty().speed, 30);
        assert_eq!(session.tick_interval(), Duration::from_millis(33));
        assert!(session.handle(SessionAction::Back, now));
        assert_eq!(session.state(), SessionState::Menu);

        assert!(session.handle(SessionAction::OpenColors, now));
        assert!(session.handle(SessionAction::SelectColor(3), now));
        assert_eq!(session.color().name, "Purple");
        assert!(!session.handle(SessionAction::SelectDifficulty(0), now));
        assert!(session.handle(SessionAction::Back, now));
        assert_eq!(session.state(), SessionState::Menu);
    }

    #[test]
    fn test_countdown_ignores_steering() {
        let mut session = session();
        let now = Instant::now();
        session.handle(SessionAction::Play, now);
        assert_eq!(session.state(), SessionState::Countdown);

        assert!(!session.handle(SessionAction::Steer(Heading::Up), now));
        assert_eq!(
            session.tick(now + Duration::from_millis(500)),
            TickOutcome::CountingDown { remaining_secs: 3 }
        );
        assert_eq!(
            session.tick(now + Duration::from_millis(2500)),
            TickOutcome::CountingDown { remaining_secs: 1 }
        );
        assert_eq!(
            session.snapshot(now + Duration::from_millis(1500)).countdown_remaining,
            Some(2)
        );

        let head = session.game().snake.head();
        let outcome = session.tick(now + Duration::from_secs(3));
        assert!(matches!(outcome, TickOutcome::Stepped(_)));
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.game().snake.head(), head.moved_in(Heading::Right));
    }

    #[test]
    fn test_steering_during_play() {
        let mut session = session();
        let now = start_playing(&mut session, Instant::now());

        assert!(session.handle(SessionAction::Steer(Heading::Up), now));
        assert!(!session.handle(SessionAction::Steer(Heading::Left), now));
        session.tick(now);

        assert_eq!(session.game().heading(), Heading::Up);
    }

    #[test]
    fn test_escape_keeps_attempts() {
        let mut session = session();
        let now = start_playing(&mut session, Instant::now());

        assert!(session.handle(SessionAction::Escape, now));
        assert_eq!(session.state(), SessionState::Menu);
        assert_eq!(session.attempts_remaining(), 6);
        assert_eq!(session.tick(now), TickOutcome::Idle);
    }

    #[test]
    fn test_collision_consumes_one_attempt() {
        let mut session = session();
        let now = start_playing(&mut session, Instant::now());

        let result = crash(&mut session, now);

        assert!(result.terminated);
        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(session.attempts_remaining(), 5);
        assert_eq!(session.tick(now), TickOutcome::Idle);
        assert_eq!(session.attempts_remaining(), 5);
    }

    #[test]
    fn test_restart_and_menu_from_game_over() {
        let mut session = session();
        let now = start_playing(&mut session, Instant::now());
        crash(&mut session, now);

        assert!(session.handle(SessionAction::Restart, now));
        assert_eq!(session.state(), SessionState::Countdown);
        assert_eq!(session.game().score, 0);
        assert_eq!(session.game().snake.len(), 3);
        assert_eq!(session.game().heading(), Heading::Right);

        let now = now + Duration::from_secs(3);
        session.tick(now);
        crash(&mut session, now);
        assert!(session.handle(SessionAction::Menu, now));
        assert_eq!(session.state(), SessionState::Menu);
        assert_eq!(session.attempts_remaining(), 4);
    }

    #[test]
    fn test_exhausted_budget_blocks_play() {
        let mut session = Session::new(SessionConfig {
            max_attempts: 1,
            ..config()
        })
        .unwrap();
        let now = start_playing(&mut session, Instant::now());
        crash(&mut session, now);

        assert_eq!(session.attempts_remaining(), 0);
        assert!(!session.handle(SessionAction::Restart, now));
        assert_eq!(session.state(), SessionState::GameOver);

        assert!(session.handle(SessionAction::Menu, now));
        assert!(!session.handle(SessionAction::Play, now));
        assert_eq!(session.state(), SessionState::Menu);
    }

    #[test]
    fn test_playing_without_attempts_returns_to_menu() {
        let mut session = session();
        let now = start_playing(&mut session, Instant::now());
        session.attempts_remaining = 0;

        assert_eq!(session.tick(now), TickOutcome::ReturnedToMenu);
        assert_eq!(session.state(), SessionState::Menu);
    }

    #[test]
    fn test_snapshot_reflects_game() {
        let mut session = session();
        let now = Instant::now();
        session.handle(SessionAction::Play, now);

        let snapshot = session.snapshot(now);
        assert_eq!(snapshot.state, SessionState::Countdown);
        assert_eq!(snapshot.countdown_remaining, Some(3));
        assert_eq!(snapshot.snake.head(), session.game().snake.head());
        assert_eq!(snapshot.food, session.game().food);
        assert_eq!(snapshot.heading, Heading::Right);
        assert_eq!(snapshot.attempts_remaining, 6);
        assert_eq!(snapshot.selected_color().name, "Blue");
        assert_eq!(snapshot.selected_difficulty().speed, 20);
    }
}
