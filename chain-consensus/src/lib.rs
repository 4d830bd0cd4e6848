//! Ledger consensus engine
//!
//! This crate provides the proof-of-work search that seals candidate blocks
//! and the proof predicate that gates appends to the chain.

pub mod error;
pub mod pow;
pub mod traits;

pub use error::{ConsensusError, ConsensusResult};
pub use pow::{PowConfig, ProofOfWork, DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
pub use traits::{Engine, SealOutcome};
