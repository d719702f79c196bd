use std::time::{Duration, Instant};

/// Per-session numbers shown next to the board in human mode
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub last_score: Option<u32>,
    pub games_played: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            last_score: None,
            games_played: 0,
            running: false,
        }
    }

    /// Refresh the playthrough clock; frozen outside active play
    pub fn update(&mut self, now: Instant) {
        if self.running {
            self.elapsed_time = now.saturating_duration_since(self.start_time);
        }
    }

    pub fn on_game_start(&mut self, now: Instant) {
        self.start_time = now;
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    /// Playthrough abandoned without a collision
    pub fn on_game_abandoned(&mut self) {
        self.running = false;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.running = false;
        self.games_played += 1;
        self.last_score = Some(final_score);
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
