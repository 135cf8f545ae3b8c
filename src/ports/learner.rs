//! Learner port - abstraction over everything that can take a seat at the board
//!
//! Implemented by the Q-learning agent (in training and frozen form) and by
//! the fixed-policy opponents it trains against.

use crate::{
    Result,
    tictactoe::{Board, GameOutcome, Player},
};

/// Unified interface for players driven by the training pipeline
///
/// This trait represents a **port** in hexagonal architecture: the pipeline
/// only talks to players through it, and each playing strategy is an
/// adapter.
///
/// # Examples
///
/// ```no_run
/// use tactician::{ports::Learner, tictactoe::{Board, Player}};
///
/// fn opening_move<L: Learner>(learner: &mut L) -> tactician::Result<usize> {
///     learner.select_move(&Board::default(), Player::X)
/// }
/// ```
pub trait Learner: Send {
    /// Select a move for `to_move` on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] if the board is terminal.
    fn select_move(&mut self, board: &Board, to_move: Player) -> Result<usize>;

    /// Called before the first move of every game.
    ///
    /// `clear_caches` asks learners with search caches to drop them.
    fn begin_game(&mut self, _clear_caches: bool) -> Result<()> {
        Ok(())
    }

    /// Update the learner after a game completes.
    ///
    /// `role` is the symbol this learner played. The default does nothing,
    /// suitable for fixed policies.
    fn learn(&mut self, _outcome: GameOutcome, _role: Player) -> Result<()> {
        Ok(())
    }

    /// Name used in logs and summaries
    fn name(&self) -> &str;

    /// Seed the learner's internal random number generator.
    ///
    /// Training pipelines call this when supplied with a deterministic seed.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
