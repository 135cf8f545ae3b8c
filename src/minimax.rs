//! Exhaustive minimax search with memoization
//!
//! Scores are from a fixed perspective player: +1 forced win, 0 draw under
//! perfect play, -1 forced loss. The memo is keyed on board contents alone,
//! which is sound as long as the geometry, the perspective and the opening
//! player stay fixed: together they decide whose turn every board is. The
//! evaluator owns its perspective and drops the memo whenever it sees a board
//! of a different geometry or a side to move implying a different opener.
//!
//! The search visits the whole game tree below the given position. That is
//! instant on 3×3 and grows combinatorially beyond it; on larger boards the
//! agent can run with search disabled (see [`crate::app::AgentConfig::minimax`]).

use std::collections::HashMap;

use crate::{
    tictactoe::{Board, Geometry, Player},
    types::StateKey,
};

/// Moves tied for the best minimax score after the perspective player moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMoves {
    pub score: i8,
    pub moves: Vec<usize>,
}

/// Memoized perfect-play evaluator for one perspective player
#[derive(Debug, Clone)]
pub struct MinimaxEvaluator {
    perspective: Player,
    geometry: Option<Geometry>,
    opener: Option<Player>,
    memo: HashMap<StateKey, i8>,
}

impl MinimaxEvaluator {
    pub fn new(perspective: Player) -> Self {
        Self {
            perspective,
            geometry: None,
            opener: None,
            memo: HashMap::new(),
        }
    }

    pub fn perspective(&self) -> Player {
        self.perspective
    }

    /// Perfect-play score of `board` with `to_move` to play.
    pub fn evaluate(&mut self, board: &Board, to_move: Player) -> i8 {
        let opener = if board.occupied_count().is_multiple_of(2) {
            to_move
        } else {
            to_move.opponent()
        };
        if self.geometry != Some(board.geometry()) || self.opener != Some(opener) {
            self.memo.clear();
            self.geometry = Some(board.geometry());
            self.opener = Some(opener);
        }
        self.search(board, to_move)
    }

    /// Score every move available to the perspective player and keep the
    /// best-scoring ones, in ascending move order.
    ///
    /// Returns `None` when the board has no empty cell.
    pub fn best_moves(&mut self, board: &Board) -> Option<BestMoves> {
        let mut best: Option<BestMoves> = None;

        for pos in board.available_moves() {
            let next = board.place(pos, self.perspective);
            let score = self.evaluate(&next, self.perspective.opponent());

            match &mut best {
                Some(current) if score < current.score => {}
                Some(current) if score == current.score => current.moves.push(pos),
                _ => {
                    best = Some(BestMoves {
                        score,
                        moves: vec![pos],
                    })
                }
            }
        }

        best
    }

    /// Forget all cached scores.
    pub fn clear(&mut self) {
        self.memo.clear();
    }

    /// Number of cached positions
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    fn search(&mut self, board: &Board, to_move: Player) -> i8 {
        let key = board.state_key();
        if let Some(&score) = self.memo.get(&key) {
            return score;
        }

        if board.is_terminal() {
            return board.outcome(self.perspective);
        }

        let maximizing = to_move == self.perspective;
        let mut best = if maximizing { i8::MIN } else { i8::MAX };

        for pos in board.available_moves() {
            let score = self.search(&board.place(pos, to_move), to_move.opponent());
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
            // Scores are bounded by ±1, so reaching the bound settles the node exactly.
            if (maximizing && best == 1) || (!maximizing && best == -1) {
                break;
            }
        }

        self.memo.insert(key, best);
        best
    }
}
