//! Training and evaluation pipeline abstractions
//!
//! This module provides:
//! - Learner adapters for the Q-learning agent and its opponents
//! - A pipeline playing full games between two learners
//! - Observers reporting on a run

pub mod learners;
pub mod observers;
pub mod training;

pub use learners::{FrozenLearner, MinimaxLearner, OpponentKind, RandomLearner, TrainingLearner};
pub use observers::{BatchReportObserver, MetricsObserver, MetricsSummary, ProgressObserver, Tally};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer};
