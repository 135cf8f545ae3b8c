//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Board;

/// Canonical encoding of a board, used as the key into both the minimax memo
/// and the Q-table.
///
/// One character per cell in row-major order: `X`, `O`, or a space for an
/// empty cell. No symmetry folding is applied, so rotations and reflections of
/// a position are distinct keys.
///
/// # Examples
///
/// ```
/// use tactician::tictactoe::{Board, Geometry, Player};
/// use tactician::types::StateKey;
///
/// let board = Board::empty(Geometry::classic()).apply_move(4, Player::X).unwrap();
/// let key = StateKey::from(&board);
/// assert_eq!(key.as_str(), "    X    ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    /// Wrap an already-encoded key.
    ///
    /// Keys read back from storage are taken as-is; the Q-table does not
    /// require them to decode into a legal board.
    pub fn new(encoded: impl Into<String>) -> Self {
        StateKey(encoded.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&Board> for StateKey {
    fn from(board: &Board) -> Self {
        StateKey(board.cells().iter().map(|cell| cell.to_char()).collect())
    }
}
