//! Per-game record of the agent's own decisions

use crate::types::StateKey;

/// One decision: the state the agent saw and the move it chose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: StateKey,
    pub action: usize,
}

/// Ordered (state, move) pairs taken by the agent during one game.
///
/// Filled by move selection in training mode and consumed once by the
/// terminal-reward update, which leaves it empty.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    steps: Vec<Step>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state: StateKey, action: usize) {
        self.steps.push(Step { state, action });
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Take all recorded steps, leaving the trajectory empty.
    pub fn drain(&mut self) -> Vec<Step> {
        std::mem::take(&mut self.steps)
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}
