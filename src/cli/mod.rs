//! CLI infrastructure for the tactician toolkit
//!
//! This module provides the command-line interface for training, evaluating
//! and analyzing Q-learning agents.

pub mod commands;
pub mod config;
pub mod output;
