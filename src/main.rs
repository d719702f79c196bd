use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use grid_snake::modes::{AgentConfig, AgentKind, AgentMode, HumanMode};
use grid_snake::session::SessionConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid-based Snake for keyboard play and automated agents")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON session configuration; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Board height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Playthroughs allowed per session (human mode)
    #[arg(long)]
    attempts: Option<u32>,

    /// Initial difficulty, 1-based index into the difficulty table
    #[arg(long, value_parser = one_based())]
    difficulty: Option<usize>,

    /// Initial snake color, 1-based index into the color table
    #[arg(long, value_parser = one_based())]
    color: Option<usize>,

    /// Seed for food placement and agent choices
    #[arg(long)]
    seed: Option<u64>,

    /// Number of episodes to run (agent mode)
    #[arg(long, default_value = "1000")]
    episodes: usize,

    /// Log progress every N episodes (agent mode)
    #[arg(long, default_value = "100")]
    log_frequency: usize,

    /// Built-in agent to run (agent mode)
    #[arg(long, default_value = "greedy")]
    agent: AgentKind,

    /// Exploration rate of the greedy agent
    #[arg(long, default_value = "0.0")]
    epsilon: f64,

    /// Write the per-episode score series here as JSON (agent mode)
    #[arg(long)]
    history: Option<PathBuf>,
}

fn one_based() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..)
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Run a built-in agent headless
    Agent,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => SessionConfig::default(),
        };

        if let Some(width) = self.width {
            config.game.board_width = width;
        }
        if let Some(height) = self.height {
            config.game.board_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.game.cell_size = cell_size;
        }
        if let Some(attempts) = self.attempts {
            config.max_attempts = attempts;
        }
        if let Some(difficulty) = self.difficulty {
            config.default_difficulty = difficulty - 1;
        }
        if let Some(color) = self.color {
            config.default_color = color - 1;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the TUI in human mode
    let default_filter = match cli.mode {
        Mode::Human => "off",
        Mode::Agent => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = cli.session_config()?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Agent => {
            let agent_config = AgentConfig {
                num_episodes: cli.episodes,
                log_frequency: cli.log_frequency,
                seed: config.seed,
                agent: cli.agent,
                epsilon: cli.epsilon,
                history_path: cli.history.clone(),
                game_config: config.game,
            };
            let mut agent_mode = AgentMode::new(agent_config)?;
            agent_mode.run()?;
            println!("{}", agent_mode.history().format_summary());
        }
    }

    Ok(())
}
