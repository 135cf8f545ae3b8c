//! Shared configuration types for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::{
    adapters::{JsonRepository, MsgPackRepository},
    app::{AgentConfig, DEFAULT_PERSISTENCE_PATH},
    q_learning::QLearningAgent,
    tictactoe::{Geometry, Player},
};

/// On-disk format of the Q-table file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum QTableFormat {
    /// Nested JSON object (state -> move -> value)
    #[default]
    Json,
    /// Same mapping as MessagePack
    Msgpack,
}

/// Agent options shared by every command that builds an agent
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    /// Symbol the agent plays (x or o)
    #[arg(long, short = 'p', default_value = "x")]
    pub player: Player,

    /// Board side length
    #[arg(long, default_value_t = 3)]
    pub size: usize,

    /// Marks in a row needed to win
    #[arg(long, default_value_t = 3)]
    pub win_length: usize,

    /// Exploration rate ε
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Learning rate α
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Q-table file
    #[arg(long, short = 'q', default_value = DEFAULT_PERSISTENCE_PATH)]
    pub q_table: PathBuf,

    /// Q-table file format
    #[arg(long, value_enum, default_value_t)]
    pub format: QTableFormat,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the minimax evaluator (for boards too large to search)
    #[arg(long)]
    pub no_minimax: bool,
}

impl AgentArgs {
    pub fn geometry(&self) -> Result<Geometry> {
        Geometry::new(self.size, self.win_length).context("invalid board geometry")
    }

    pub fn agent_config(&self) -> Result<AgentConfig> {
        let mut config = AgentConfig::new(self.player)
            .with_geometry(self.geometry()?)
            .with_epsilon(self.epsilon)
            .with_learning_rate(self.alpha)
            .with_discount_factor(self.gamma)
            .with_persistence_path(&self.q_table)
            .with_minimax(!self.no_minimax);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.validate()?;
        Ok(config)
    }

    /// Build the agent, loading the Q-table file if it exists.
    pub fn build_agent(&self) -> Result<QLearningAgent> {
        let config = self.agent_config()?;
        let agent = match self.format {
            QTableFormat::Json => QLearningAgent::with_repository(config, JsonRepository::new()),
            QTableFormat::Msgpack => {
                QLearningAgent::with_repository(config, MsgPackRepository::new())
            }
        };
        agent.context("failed to create agent")
    }
}
