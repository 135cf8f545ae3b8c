//! Tic-Tac-Toe board model for N×N boards with a K-in-a-row win condition

pub mod board;
pub mod game;
pub mod game_tree;
pub mod lines;

pub use board::{Board, Cell, EMPTY_MARKER, Geometry, Player};
pub use game::GameOutcome;
pub use game_tree::{GameCounts, ReachableState, count_games, reachable_states};
pub use lines::{Line, LineAnalyzer};
