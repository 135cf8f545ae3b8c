//! Q-table implementation for temporal difference learning

use std::collections::{HashMap, hash_map};

use serde::{Deserialize, Serialize};

use crate::types::StateKey;

/// Learned action values for one state: move index -> Q-value
pub type ActionValues = HashMap<usize, f64>;

/// Q-table mapping board states to per-move value estimates
///
/// Entries are created lazily with a value of `0.0` on first access through
/// the inserting accessors ([`QTable::value_mut`], [`QTable::ensure_actions`])
/// and are never removed. Read-only lookups ([`QTable::get`]) report the same
/// `0.0` baseline without inserting anything.
///
/// Serializes as a nested mapping `{state: {move: value}}`; in JSON the move
/// indices become decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QTable {
    values: HashMap<StateKey, ActionValues>,
}

impl QTable {
    /// Value of the untouched baseline
    pub const INITIAL_VALUE: f64 = 0.0;

    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get Q-value for a state-action pair, `0.0` if never recorded
    pub fn get(&self, state: &StateKey, action: usize) -> f64 {
        self.values
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or(Self::INITIAL_VALUE)
    }

    /// All recorded values for a state
    pub fn actions(&self, state: &StateKey) -> Option<&ActionValues> {
        self.values.get(state)
    }

    /// Mutable access to a Q-value, inserting the state and action at `0.0` first if absent
    pub fn value_mut(&mut self, state: &StateKey, action: usize) -> &mut f64 {
        self.values
            .entry(state.clone())
            .or_default()
            .entry(action)
            .or_insert(Self::INITIAL_VALUE)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: &StateKey, action: usize, value: f64) {
        *self.value_mut(state, action) = value;
    }

    /// Make sure every action in `actions` has an entry for `state`,
    /// inserting missing ones at `0.0`, and return the state's values.
    pub fn ensure_actions(&mut self, state: &StateKey, actions: &[usize]) -> &ActionValues {
        let values = self.values.entry(state.clone()).or_default();
        for &action in actions {
            values.entry(action).or_insert(Self::INITIAL_VALUE);
        }
        values
    }

    /// Largest value recorded for a state, or `0.0` when it has none.
    pub fn max_value(&self, state: &StateKey) -> f64 {
        self.values
            .get(state)
            .and_then(|actions| actions.values().copied().reduce(f64::max))
            .unwrap_or(Self::INITIAL_VALUE)
    }

    /// Number of states with at least an (possibly empty) entry
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total number of state-action values stored
    pub fn entry_count(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, StateKey, ActionValues> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a QTable {
    type Item = (&'a StateKey, &'a ActionValues);
    type IntoIter = hash_map::Iter<'a, StateKey, ActionValues>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
