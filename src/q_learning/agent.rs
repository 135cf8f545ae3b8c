//! Q-learning agent blending minimax lookahead with learned values
//!
//! The agent owns everything it mutates: the Q-table, the minimax memo, the
//! per-game trajectory and its random number generator. Drivers hold one
//! agent per concurrent game and call [`QLearningAgent::select_move`] for each
//! of its turns and [`QLearningAgent::record_outcome`] once the game is over.

use std::path::Path;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Result,
    adapters::JsonRepository,
    app::AgentConfig,
    error::Error,
    minimax::MinimaxEvaluator,
    ports::QTableRepository,
    q_learning::{q_table::QTable, trajectory::Trajectory},
    tictactoe::{Board, Player},
};

/// Boards above this many cells make exhaustive search noticeably slow
pub const EXHAUSTIVE_SEARCH_CELL_LIMIT: usize = 9;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent for one symbol
#[derive(Debug)]
pub struct QLearningAgent {
    config: AgentConfig,
    q_table: QTable,
    evaluator: MinimaxEvaluator,
    trajectory: Trajectory,
    rng: StdRng,
    repository: Box<dyn QTableRepository>,
}

impl QLearningAgent {
    /// Create an agent persisting its Q-table as JSON at
    /// `config.persistence_path`, loading whatever is already stored there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for out-of-range
    /// hyperparameters. A missing or unreadable Q-table file is not an error.
    pub fn new(config: AgentConfig) -> Result<Self> {
        Self::with_repository(config, JsonRepository::new())
    }

    /// Create an agent backed by a custom repository.
    pub fn with_repository(
        config: AgentConfig,
        repository: impl QTableRepository + 'static,
    ) -> Result<Self> {
        config.validate()?;

        if config.minimax && config.geometry.cell_count() > EXHAUSTIVE_SEARCH_CELL_LIMIT {
            warn!(
                "minimax search on a {} board explores the full game tree and may be very slow; \
                 consider disabling it",
                config.geometry
            );
        }

        let mut agent = Self {
            q_table: QTable::new(),
            evaluator: MinimaxEvaluator::new(config.symbol),
            trajectory: Trajectory::new(),
            rng: build_rng(config.seed),
            repository: Box::new(repository),
            config,
        };
        agent.load();
        Ok(agent)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.config.seed = Some(seed);
    }

    pub fn symbol(&self) -> Player {
        self.config.symbol
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn evaluator_mut(&mut self) -> &mut MinimaxEvaluator {
        &mut self.evaluator
    }

    /// Exploration rate currently in effect
    pub fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        let candidate = self.config.clone().with_epsilon(epsilon);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Pick the agent's next move on `board`.
    ///
    /// 1. If some move forces a win under perfect play, one of those moves is
    ///    played at once.
    /// 2. In training mode, with probability ε a uniformly random available
    ///    move is played.
    /// 3. Otherwise the moves with the highest Q-value are candidates. When
    ///    that highest value is still the untrained `0.0`, the candidates are
    ///    the minimax-best moves instead (all available moves when minimax is
    ///    disabled). Ties are broken uniformly at random.
    ///
    /// Every move chosen in training mode is appended to the trajectory.
    /// Unseen states and moves are entered into the Q-table at `0.0`.
    ///
    /// Returns `None` when the board is terminal (no empty cell, or already
    /// won); the caller must treat that as game over.
    pub fn select_move(&mut self, board: &Board, training: bool) -> Option<usize> {
        if board.is_terminal() {
            return None;
        }
        let available = board.available_moves();

        let minimax_best = if self.config.minimax {
            self.evaluator.best_moves(board)
        } else {
            None
        };

        let chosen = match &minimax_best {
            Some(best) if best.score == 1 => *best.moves.choose(&mut self.rng)?,
            _ if training && self.rng.random::<f64>() < self.config.epsilon => {
                *available.choose(&mut self.rng)?
            }
            _ => {
                let state = board.state_key();
                let values = self.q_table.ensure_actions(&state, &available);
                let max_q = available
                    .iter()
                    .map(|action| values.get(action).copied().unwrap_or(QTable::INITIAL_VALUE))
                    .fold(f64::NEG_INFINITY, f64::max);

                let candidates: Vec<usize> = if max_q == QTable::INITIAL_VALUE {
                    minimax_best
                        .as_ref()
                        .map_or_else(|| available.clone(), |best| best.moves.clone())
                } else {
                    available
                        .iter()
                        .copied()
                        .filter(|action| values.get(action) == Some(&max_q))
                        .collect()
                };

                *candidates.choose(&mut self.rng)?
            }
        };

        if training {
            self.trajectory.record(board.state_key(), chosen);
        }
        Some(chosen)
    }

    /// Apply the end-of-game update with `final_reward` from this agent's
    /// perspective (+1 win, 0 draw, -1 loss) and clear the trajectory.
    pub fn record_outcome(&mut self, final_reward: f64) {
        debug!(
            "{} agent learning from {} steps with reward {final_reward}",
            self.config.symbol,
            self.trajectory.len()
        );
        self.config
            .learning_rule()
            .apply_terminal_reward(&mut self.q_table, &mut self.trajectory, final_reward);
    }

    /// Prepare for a new game: forget the trajectory of an abandoned game
    /// and optionally drop the minimax memo.
    pub fn begin_game(&mut self, clear_memo: bool) {
        self.trajectory.clear();
        if clear_memo {
            self.evaluator.clear();
        }
    }

    pub fn persistence_path(&self) -> &Path {
        &self.config.persistence_path
    }

    /// Write the Q-table to the configured path.
    pub fn save(&self) -> Result<()> {
        self.repository
            .save(&self.q_table, &self.config.persistence_path)?;
        info!(
            "saved {} states to {}",
            self.q_table.len(),
            self.config.persistence_path.display()
        );
        Ok(())
    }

    /// Like [`QLearningAgent::save`], but logs a failure instead of returning
    /// it. Returns whether the table was written.
    pub fn save_or_warn(&self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(err) => {
                warn!("Q-table not saved, learned values from this session are lost: {err}");
                false
            }
        }
    }

    /// Read the Q-table stored at the configured path.
    pub fn try_load(&self) -> Result<QTable> {
        self.repository.load(&self.config.persistence_path)
    }

    /// Replace the in-memory Q-table with the stored one.
    ///
    /// A missing file leaves an empty table. An unreadable or malformed file
    /// is logged as a warning and also leaves an empty table.
    pub fn load(&mut self) {
        let path = self.config.persistence_path.display();
        self.q_table = match self.try_load() {
            Ok(q_table) => {
                info!("loaded {} states from {path}", q_table.len());
                q_table
            }
            Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                info!("no Q-table at {path}, starting empty");
                QTable::new()
            }
            Err(err) => {
                warn!("ignoring stored Q-table: {err}");
                QTable::new()
            }
        };
    }
}
