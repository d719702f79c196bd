//! Per-episode score tracking for the headless driver
//!
//! Keeps the two series an external plotter draws (raw scores and the running
//! mean) plus a rolling window for smoothed progress reports.

use serde::Serialize;
use std::collections::VecDeque;

/// The raw and running-mean score series, ready for export
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSeries<'a> {
    pub scores: &'a [u32],
    pub mean_scores: &'a [f32],
}

/// Episode score history with rolling averages
///
/// # Example
///
/// ```rust
/// use grid_snake::metrics::ScoreHistory;
///
/// let mut history = ScoreHistory::new(100);
/// history.record_episode(4, 120, -2.0);
/// history.record_episode(8, 300, 70.0);
///
/// assert_eq!(history.scores(), &[4, 8]);
/// assert_eq!(history.mean_scores(), &[4.0, 6.0]);
/// assert_eq!(history.best_score(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct ScoreHistory {
    /// Every episode score, in order
    scores: Vec<u32>,

    /// Mean of all scores so far, one entry per episode
    mean_scores: Vec<f32>,

    /// Episode rewards (rolling window)
    recent_rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    recent_lengths: VecDeque<u32>,

    /// Episode scores (rolling window)
    recent_scores: VecDeque<u32>,

    total_score: u64,
    total_steps: u64,
    best_score: u32,
    window_size: usize,
}

impl ScoreHistory {
    /// Create a tracker keeping `window_size` episodes for rolling averages
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            scores: Vec::new(),
            mean_scores: Vec::new(),
            recent_rewards: VecDeque::with_capacity(window_size),
            recent_lengths: VecDeque::with_capacity(window_size),
            recent_scores: VecDeque::with_capacity(window_size),
            total_score: 0,
            total_steps: 0,
            best_score: 0,
            window_size,
        }
    }

    /// Record the end of an episode
    pub fn record_episode(&mut self, score: u32, length: u32, reward: f32) {
        self.scores.push(score);
        self.total_score += u64::from(score);
        self.total_steps += u64::from(length);
        self.mean_scores
            .push(self.total_score as f32 / self.scores.len() as f32);
        self.best_score = self.best_score.max(score);

        Self::push_deque(&mut self.recent_rewards, reward, self.window_size);
        Self::push_deque(&mut self.recent_lengths, length, self.window_size);
        Self::push_deque(&mut self.recent_scores, score, self.window_size);
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Running mean after each episode
    pub fn mean_scores(&self) -> &[f32] {
        &self.mean_scores
    }

    /// Borrow both series for serialization
    pub fn series(&self) -> ScoreSeries<'_> {
        ScoreSeries {
            scores: &self.scores,
            mean_scores: &self.mean_scores,
        }
    }

    pub fn total_episodes(&self) -> usize {
        self.scores.len()
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Mean score over every recorded episode
    pub fn mean_score(&self) -> f32 {
        self.mean_scores.last().copied().unwrap_or(0.0)
    }

    /// Mean score over the rolling window
    pub fn recent_mean_score(&self) -> f32 {
        let sum: u32 = self.recent_scores.iter().sum();
        if self.recent_scores.is_empty() {
            0.0
        } else {
            sum as f32 / self.recent_scores.len() as f32
        }
    }

    /// Mean episode length over the rolling window
    pub fn recent_mean_length(&self) -> f32 {
        let sum: u32 = self.recent_lengths.iter().sum();
        if self.recent_lengths.is_empty() {
            0.0
        } else {
            sum as f32 / self.recent_lengths.len() as f32
        }
    }

    /// Mean episode reward over the rolling window
    pub fn recent_mean_reward(&self) -> f32 {
        if self.recent_rewards.is_empty() {
            0.0
        } else {
            self.recent_rewards.iter().sum::<f32>() / self.recent_rewards.len() as f32
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Best: {} | Mean: {:.2} | Recent: {:.2} | Len: {:.1} | Reward: {:.2}",
            self.total_episodes(),
            self.total_steps,
            self.best_score,
            self.mean_score(),
            self.recent_mean_score(),
            self.recent_mean_length(),
            self.recent_mean_reward(),
        )
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
