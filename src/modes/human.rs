use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::session::{Session, SessionAction, SessionConfig, SessionState, TickOutcome};

pub struct HumanMode {
    session: Session,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let session = Session::new(config).context("Invalid session configuration")?;

        Ok(Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at the selected difficulty's speed
        let mut tick_period = self.session.tick_interval();
        let mut tick_timer = tick_timer_for(tick_period);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, Instant::now());
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game(Instant::now());
                }

                // Render frame
                _ = render_timer.tick() => {
                    let now = Instant::now();
                    self.metrics.update(now);
                    let snapshot = self.session.snapshot(now);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Difficulty may have changed from the menu
            let period = self.session.tick_interval();
            if period != tick_period {
                tick_period = period;
                tick_timer = tick_timer_for(period);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key, self.session.state()) {
                KeyAction::Session(action) => self.apply(action, now),
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn apply(&mut self, action: SessionAction, now: Instant) {
        let before = self.session.state();
        if !self.session.handle(action, now) {
            return;
        }

        match (before, self.session.state()) {
            (_, SessionState::Countdown) => self.metrics.on_game_start(now),
            (SessionState::Countdown | SessionState::Playing, SessionState::Menu) => {
                self.metrics.on_game_abandoned();
            }
            _ => {}
        }
    }

    fn update_game(&mut self, now: Instant) {
        match self.session.tick(now) {
            TickOutcome::GameOver(result) => self.metrics.on_game_over(result.score),
            TickOutcome::ReturnedToMenu => self.metrics.on_game_abandoned(),
            TickOutcome::Idle | TickOutcome::CountingDown { .. } | TickOutcome::Stepped(_) => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn tick_timer_for(period: Duration) -> Interval {
    let mut timer = interval(period);
    // A slow frame should not cause a burst of catch-up steps
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Heading};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode {
        let config = SessionConfig {
            seed: Some(3),
            game: GameConfig::small(),
            ..SessionConfig::default()
        };
        HumanMode::new(config).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.session.state(), SessionState::Menu);
        assert_eq!(mode.session.game().score, 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SessionConfig {
            max_attempts: 1,
            difficulties: Vec::new(),
            ..SessionConfig::default()
        };
        assert!(HumanMode::new(config).is_err());
    }

    #[test]
    fn test_play_runs_countdown_then_steps() {
        let mut mode = mode();
        let now = Instant::now();

        mode.handle_event(key(KeyCode::Enter), now);
        assert_eq!(mode.session.state(), SessionState::Countdown);

        let head = mode.session.game().snake.head();
        mode.update_game(now + Duration::from_secs(3));
        assert_eq!(mode.session.state(), SessionState::Playing);
        assert_eq!(mode.session.game().snake.head().x, head.x + 1);

        mode.handle_event(key(KeyCode::Up), now);
        mode.update_game(now + Duration::from_secs(4));
        assert_eq!(mode.session.game().heading(), Heading::Up);
    }

    #[test]
    fn test_game_over_updates_metrics() {
        let mut mode = mode();
        let now = Instant::now();
        mode.handle_event(key(KeyCode::Enter), now);

        let mut later = now + Duration::from_secs(3);
        while mode.session.state() != SessionState::GameOver {
            mode.update_game(later);
            later += Duration::from_millis(50);
        }

        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.last_score, Some(mode.session.game().score));
        assert_eq!(mode.session.attempts_remaining(), 5);
    }

    #[test]
    fn test_quit_keys() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')), Instant::now());
        assert!(mode.should_quit);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut mode = mode();
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        mode.handle_event(Event::Key(release), Instant::now());
        assert_eq!(mode.session.state(), SessionState::Menu);
    }
}
