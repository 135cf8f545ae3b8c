//! Application layer: agent configuration.
//!
//! Drivers (the CLI, tests, an interactive front-end) build an
//! [`AgentConfig`] and hand it to [`crate::QLearningAgent::new`]. The agent
//! owns its collaborators; nothing here is process-wide.
//!
//! ```
//! use tactician::app::AgentConfig;
//! use tactician::tictactoe::Player;
//! use tactician::QLearningAgent;
//! use tactician::adapters::InMemoryRepository;
//!
//! let config = AgentConfig::new(Player::X).with_seed(7);
//! let agent = QLearningAgent::with_repository(config, InMemoryRepository::new())?;
//! assert!(agent.q_table().is_empty());
//! # Ok::<(), tactician::Error>(())
//! ```

pub mod config;

pub use config::{AgentConfig, DEFAULT_PERSISTENCE_PATH};
