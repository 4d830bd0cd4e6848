//! Consensus error types

use chain_core::BlockHash;
use thiserror::Error;

/// Consensus error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    /// Proof lacks the required zero prefix
    #[error("Insufficient work: {hash} does not have {difficulty} leading zeros")]
    InsufficientWork { difficulty: usize, hash: BlockHash },

    /// Proof is not the hash of the block it claims to seal
    #[error("Proof mismatch: claimed {claimed}, block hashes to {computed}")]
    ProofMismatch {
        claimed: BlockHash,
        computed: BlockHash,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for consensus operations
pub type ConsensusResult<T> = Result<T, ConsensusError>;
