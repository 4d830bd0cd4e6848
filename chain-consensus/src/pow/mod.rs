//! Proof of Work consensus implementation

pub mod config;
pub mod engine;

pub use config::{PowConfig, DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
pub use engine::ProofOfWork;
