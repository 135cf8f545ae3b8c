//! End-of-game Q-value update

use serde::{Deserialize, Serialize};

use super::{q_table::QTable, trajectory::Trajectory};

/// Step size and discount for the terminal-reward backward pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningRule {
    /// α
    pub learning_rate: f64,
    /// γ
    pub discount_factor: f64,
}

impl LearningRule {
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
        }
    }

    /// Propagate a terminal reward backward through a game's trajectory.
    ///
    /// Steps are processed newest first. The newest step bootstraps from
    /// nothing; every earlier step bootstraps from the largest value recorded
    /// for the state of the step after it, which has already been updated by
    /// then. `final_reward` is used as the reward term at every step, not only
    /// the last one:
    ///
    /// ```text
    /// target    = final_reward + γ * next_max
    /// Q(s, a) += α * (target - Q(s, a))
    /// ```
    ///
    /// Missing entries start at `0.0`. The trajectory is empty afterwards.
    pub fn apply_terminal_reward(
        &self,
        q_table: &mut QTable,
        trajectory: &mut Trajectory,
        final_reward: f64,
    ) {
        let steps = trajectory.drain();

        for (i, step) in steps.iter().enumerate().rev() {
            let next_max = steps
                .get(i + 1)
                .map_or(0.0, |next| q_table.max_value(&next.state));

            let target = final_reward + self.discount_factor * next_max;
            let value = q_table.value_mut(&step.state, step.action);
            *value += self.learning_rate * (target - *value);
        }
    }
}

impl Default for LearningRule {
    fn default() -> Self {
        Self::new(0.1, 0.9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateKey;

    fn trajectory(steps: &[(&str, usize)]) -> Trajectory {
        let mut trajectory = Trajectory::new();
        for &(state, action) in steps {
            trajectory.record(StateKey::new(state), action);
        }
        trajectory
    }

    #[test]
    fn single_step_win_sets_alpha() {
        let rule = LearningRule::new(0.1, 0.9);
        let mut q_table = QTable::new();
        let mut steps = trajectory(&[("XX OO    ", 2)]);

        rule.apply_terminal_reward(&mut q_table, &mut steps, 1.0);

        assert_eq!(q_table.get(&StateKey::new("XX OO    "), 2), 0.1);
        assert!(steps.is_empty());
    }

    #[test]
    fn earlier_steps_bootstrap_from_updated_successor() {
        let rule = LearningRule::new(0.5, 0.9);
        let mut q_table = QTable::new();
        let mut steps = trajectory(&[("         ", 4), ("X   X    ", 0)]);

        rule.apply_terminal_reward(&mut q_table, &mut steps, 1.0);

        // last: 0 + 0.5 * (1 + 0.9 * 0 - 0) = 0.5
        let last = q_table.get(&StateKey::new("X   X    "), 0);
        assert_eq!(last, 0.5);
        // first: 0 + 0.5 * (1 + 0.9 * 0.5 - 0) = 0.725
        let first = q_table.get(&StateKey::new("         "), 4);
        assert!((first - 0.725).abs() < 1e-12);
    }

    /// The terminal reward is replayed at every step instead of being
    /// discounted back from the end of the game. A loss therefore pushes the
    /// opening move down by the full α, not by α·γⁿ.
    #[test]
    fn terminal_reward_is_replayed_at_every_step() {
        let rule = LearningRule::new(0.1, 0.9);
        let mut q_table = QTable::new();
        let mut steps = trajectory(&[("         ", 0), ("XO       ", 4), ("XO OX    ", 8)]);

        rule.apply_terminal_reward(&mut q_table, &mut steps, -1.0);

        let last = q_table.get(&StateKey::new("XO OX    "), 8);
        let middle = q_table.get(&StateKey::new("XO       "), 4);
        let opening = q_table.get(&StateKey::new("         "), 0);

        assert!((last + 0.1).abs() < 1e-12);
        // -1 + 0.9 * max(-0.1) = -1.09 -> 0.1 * -1.09
        assert!((middle + 0.109).abs() < 1e-12);
        assert!(opening < -0.1);
    }

    #[test]
    fn successor_max_considers_all_recorded_moves() {
        let rule = LearningRule::new(1.0, 0.5);
        let mut q_table = QTable::new();
        q_table.set(&StateKey::new("X   O    "), 8, 0.6);
        let mut steps = trajectory(&[("         ", 0), ("X   O    ", 2)]);

        rule.apply_terminal_reward(&mut q_table, &mut steps, 0.0);

        // successor after its own update: max(0.6, 0.0 + 1.0 * (0 - 0)) = 0.6
        assert_eq!(q_table.get(&StateKey::new("         "), 0), 0.3);
    }

    #[test]
    fn empty_trajectory_is_a_no_op() {
        let rule = LearningRule::default();
        let mut q_table = QTable::new();
        let mut steps = Trajectory::new();
        rule.apply_terminal_reward(&mut q_table, &mut steps, 1.0);
        assert!(q_table.is_empty());
    }
}
