//! Tic-Tac-Toe Q-learning agent with minimax guidance
//!
//! This crate provides:
//! - An N×N, K-in-a-row board model
//! - A memoized minimax evaluator
//! - A tabular Q-learning agent that takes forced wins, explores with ε and
//!   otherwise exploits learned values, falling back to perfect play in
//!   untrained positions
//! - Q-table persistence (JSON, MessagePack, in-memory)
//! - A training pipeline with random and perfect-play opponents, plus a CLI

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod minimax;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use app::AgentConfig;
pub use error::{Error, Result};
pub use minimax::{BestMoves, MinimaxEvaluator};
pub use q_learning::{LearningRule, QLearningAgent, QTable, Trajectory};
pub use tictactoe::{Board, GameOutcome, Geometry, Player};
pub use types::StateKey;
