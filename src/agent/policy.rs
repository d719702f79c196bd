//! Built-in controllers for the headless driver

use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::game::{Cell, GameState, RelativeTurn};

/// Something that picks a turn for every step
pub trait Agent {
    fn act(&mut self, state: &GameState) -> RelativeTurn;
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn distance(a: Cell, b: Cell) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Uniformly random turns
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: make_rng(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, _state: &GameState) -> RelativeTurn {
        RelativeTurn::ALL[self.rng.gen_range(0..RelativeTurn::ALL.len())]
    }
}

/// Heads for the food along the shortest safe move
///
/// Only looks one step ahead, so it can still trap itself. With probability
/// `epsilon` it picks any safe move instead of the closest one.
#[derive(Debug, Clone)]
pub struct GreedyAgent {
    rng: StdRng,
    epsilon: f64,
}

impl GreedyAgent {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: make_rng(seed),
            epsilon: 0.0,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.clamp(0.0, 1.0);
        self
    }
}

impl Agent for GreedyAgent {
    fn act(&mut self, state: &GameState) -> RelativeTurn {
        let head = state.snake.head();
        let heading = state.heading();

        let safe: Vec<(RelativeTurn, i32)> = RelativeTurn::ALL
            .iter()
            .map(|&turn| (turn, head.moved_in(turn.apply(heading))))
            .filter(|&(_, target)| !state.is_danger(target))
            .map(|(turn, target)| (turn, distance(target, state.food)))
            .collect();

        if safe.is_empty() {
            trace!("no safe move from {:?}", head);
            return RelativeTurn::Straight;
        }

        if self.epsilon > 0.0 && self.rng.gen_bool(self.epsilon) {
            if let Some(&(turn, _)) = safe.choose(&mut self.rng) {
                return turn;
            }
        }

        let best = safe.iter().map(|&(_, d)| d).min().unwrap_or(0);
        let candidates: Vec<RelativeTurn> = safe
            .iter()
            .filter(|&&(_, d)| d == best)
            .map(|&(turn, _)| turn)
            .collect();

        candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(RelativeTurn::Straight)
    }
}
