//! Headless mode driving the engine with a built-in agent
//!
//! Runs a fixed number of episodes through [`AgentEnvironment`], records every
//! episode in a [`ScoreHistory`] and reports progress through the `log` facade.
//!
//! # Example
//!
//! ```rust,no_run
//! use grid_snake::modes::{AgentConfig, AgentMode};
//!
//! let config = AgentConfig::new(500);
//! let mut mode = AgentMode::new(config)?;
//! mode.run()?;
//! println!("{}", mode.history().format_summary());
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

use crate::agent::{Agent, AgentEnvironment, GreedyAgent, RandomAgent};
use crate::game::GameConfig;
use crate::metrics::ScoreHistory;

/// Which built-in controller plays the episodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    /// Shortest safe move towards the food
    Greedy,
    /// Uniformly random turns
    Random,
}

/// Configuration for agent mode
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Number of episodes to run
    pub num_episodes: usize,

    /// Log progress every N episodes
    pub log_frequency: usize,

    /// Seed for food placement and the agent's own choices
    pub seed: Option<u64>,

    pub agent: AgentKind,

    /// Exploration rate for the greedy agent
    pub epsilon: f64,

    /// Where to write the score series as JSON once all episodes are done
    pub history_path: Option<PathBuf>,

    /// Game configuration (board, rewards)
    pub game_config: GameConfig,
}

impl AgentConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            log_frequency: 100,
            seed: None,
            agent: AgentKind::Greedy,
            epsilon: 0.0,
            history_path: None,
            game_config: GameConfig::default(),
        }
    }
}

pub struct AgentMode {
    agent: Box<dyn Agent>,
    env: AgentEnvironment,
    history: ScoreHistory,
    config: AgentConfig,
}

impl AgentMode {
    pub fn new(config: AgentConfig) -> Result<Self> {
        let env = match config.seed {
            Some(seed) => AgentEnvironment::with_seed(config.game_config.clone(), seed),
            None => AgentEnvironment::new(config.game_config.clone()),
        }
        .context("Invalid game configuration")?;

        // Keep the agent's stream independent of food placement
        let agent_seed = config.seed.map(|seed| seed.wrapping_add(1));
        let agent: Box<dyn Agent> = match config.agent {
            AgentKind::Greedy => {
                Box::new(GreedyAgent::new(agent_seed).with_epsilon(config.epsilon))
            }
            AgentKind::Random => Box::new(RandomAgent::new(agent_seed)),
        };

        Ok(Self {
            agent,
            env,
            history: ScoreHistory::new(100),
            config,
        })
    }

    /// Run every configured episode
    pub fn run(&mut self) -> Result<()> {
        self.log_header();

        for episode in 0..self.config.num_episodes {
            let (score, steps, reward) = self.run_episode();
            self.history.record_episode(score, steps, reward);
            debug!(
                "episode {} finished: score {}, {} steps, reward {:.1}",
                episode + 1,
                score,
                steps,
                reward
            );

            if self.config.log_frequency > 0 && (episode + 1) % self.config.log_frequency == 0 {
                info!(
                    "[Episode {}/{}] {}",
                    episode + 1,
                    self.config.num_episodes,
                    self.history.format_summary()
                );
            }
        }

        if let Some(path) = &self.config.history_path {
            let json = serde_json::to_string_pretty(&self.history.series())
                .context("Failed to serialize score history")?;
            fs::write(path, json)
                .with_context(|| format!("Failed to write score history to {:?}", path))?;
            info!("Score history saved to {:?}", path);
        }

        info!("Finished: {}", self.history.format_summary());

        Ok(())
    }

    /// Play one episode to termination; returns (score, steps, total reward)
    fn run_episode(&mut self) -> (u32, u32, f32) {
        self.env.reset();

        while !self.env.is_done() {
            let turn = self.agent.act(self.env.state());
            self.env.step_turn(turn);
        }

        let state = self.env.state();
        (state.score, state.steps, self.env.episode_reward())
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    fn log_header(&self) {
        let game = &self.config.game_config;
        info!(
            "Agent mode: {} episodes, {:?} agent, {}x{} px board, cell {}",
            self.config.num_episodes,
            self.config.agent,
            game.board_width,
            game.board_height,
            game.cell_size
        );
        if let Some(seed) = self.config.seed {
            info!("Seed: {}", seed);
        }
    }
}
