//! Tabular Q-learning with a minimax-guided move selector
//!
//! - [`QTable`]: lazily populated state → move → value mapping
//! - [`Trajectory`]: the agent's own (state, move) decisions in one game
//! - [`LearningRule`]: terminal-reward backward pass applied at game end
//! - [`QLearningAgent`]: ties the above to a [`crate::minimax::MinimaxEvaluator`]
//!
//! ## Usage Example
//!
//! ```no_run
//! use tactician::app::AgentConfig;
//! use tactician::q_learning::QLearningAgent;
//! use tactician::tictactoe::{Board, GameOutcome, Player};
//!
//! let mut agent = QLearningAgent::new(AgentConfig::new(Player::X))?;
//! let mut board = Board::default();
//! let mut to_move = Player::X;
//!
//! while !board.is_terminal() {
//!     let pos = if to_move == agent.symbol() {
//!         agent.select_move(&board, true).expect("board is not terminal")
//!     } else {
//!         board.available_moves()[0]
//!     };
//!     board = board.apply_move(pos, to_move)?;
//!     to_move = to_move.opponent();
//! }
//!
//! if let Some(outcome) = GameOutcome::of(&board) {
//!     agent.record_outcome(outcome.reward_for(agent.symbol()));
//! }
//! agent.save()?;
//! # Ok::<(), tactician::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod trajectory;
pub mod update;

// Public re-exports
pub use agent::{EXHAUSTIVE_SEARCH_CELL_LIMIT, QLearningAgent};
pub use q_table::{ActionValues, QTable};
pub use trajectory::{Step, Trajectory};
pub use update::LearningRule;
