//! Configuration types for agent creation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    q_learning::LearningRule,
    tictactoe::{Geometry, Player},
};

/// Default file the agent reads its Q-table from and writes it to
pub const DEFAULT_PERSISTENCE_PATH: &str = "agent_q_values.json";

/// Configuration for creating a Q-learning agent.
///
/// Collects every hyperparameter in one place so drivers do not repeat
/// default literals.
///
/// # Examples
///
/// ```
/// use tactician::app::AgentConfig;
/// use tactician::tictactoe::Player;
///
/// let config = AgentConfig::new(Player::O)
///     .with_epsilon(0.0)
///     .with_seed(42)
///     .with_persistence_path("o_values.json");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Symbol the agent plays and learns for
    pub symbol: Player,
    /// Board size and win length
    pub geometry: Geometry,
    /// ε: probability of a uniformly random move in training mode
    pub epsilon: f64,
    /// α: step size of Q-value updates
    pub learning_rate: f64,
    /// γ: weight of the successor state's best value
    pub discount_factor: f64,
    /// Where the Q-table is loaded from and saved to
    pub persistence_path: PathBuf,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Whether move selection consults the minimax evaluator
    pub minimax: bool,
}

impl AgentConfig {
    /// Create a configuration for `symbol` with default values:
    /// - Geometry: 3×3, three in a row
    /// - ε = 0.1, α = 0.1, γ = 0.9
    /// - Persistence path: `agent_q_values.json`
    /// - Seed: None (non-deterministic)
    /// - Minimax: enabled
    pub fn new(symbol: Player) -> Self {
        Self {
            symbol,
            geometry: Geometry::classic(),
            epsilon: 0.1,
            learning_rate: 0.1,
            discount_factor: 0.9,
            persistence_path: PathBuf::from(DEFAULT_PERSISTENCE_PATH),
            seed: None,
            minimax: true,
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_persistence_path(mut self, path: impl AsRef<Path>) -> Self {
        self.persistence_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Turn the minimax evaluator on or off.
    pub fn with_minimax(mut self, enabled: bool) -> Self {
        self.minimax = enabled;
        self
    }

    /// The update rule these hyperparameters describe
    pub fn learning_rule(&self) -> LearningRule {
        LearningRule::new(self.learning_rate, self.discount_factor)
    }

    /// Check hyperparameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when ε or γ lie outside
    /// `[0, 1]` or α lies outside `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        check_range("epsilon", self.epsilon, 0.0..=1.0)?;
        check_range("discount_factor", self.discount_factor, 0.0..=1.0)?;
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "learning_rate must be in (0, 1], got {}",
                    self.learning_rate
                ),
            });
        }
        Ok(())
    }
}

fn check_range(name: &str, value: f64, range: std::ops::RangeInclusive<f64>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!(
                "{name} must be in [{}, {}], got {value}",
                range.start(),
                range.end()
            ),
        })
    }
}
