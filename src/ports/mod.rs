//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the learning core and the
//! code driving it. Following hexagonal architecture, these traits are owned
//! by the core and implemented by adapters.

pub mod learner;
pub mod observer;
pub mod repository;

pub use learner::Learner;
pub use observer::Observer;
pub use repository::QTableRepository;
