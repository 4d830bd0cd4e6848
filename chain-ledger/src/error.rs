//! Ledger error types

use chain_consensus::ConsensusError;
use chain_core::{BlockHash, BlockIndex};
use thiserror::Error;

/// Why the chain refused a candidate block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("previous hash {actual} does not match last block hash {expected}")]
    LinkMismatch {
        expected: BlockHash,
        actual: BlockHash,
    },

    #[error("block index {actual} does not follow last block (expected {expected})")]
    IndexMismatch {
        expected: BlockIndex,
        actual: BlockIndex,
    },

    #[error("invalid proof: {0}")]
    InvalidProof(#[from] ConsensusError),
}

/// Ledger error type
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Candidate failed the append protocol; the chain is unchanged
    #[error("Rejected append: {0}")]
    RejectedAppend(#[from] RejectReason),

    /// Proof search hit its bound; retryable
    #[error("Proof search exhausted after {attempts} attempts")]
    ProofSearchExhausted { attempts: u64 },

    /// The ledger's own candidate/proof pair failed validation
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    /// A block sequence does not form a valid chain
    #[error("Invalid chain: {0}")]
    InvalidChain(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Blocking worker failed to complete
    #[error("Worker error: {0}")]
    Worker(String),

    #[error("Consensus error: {0}")]
    Consensus(#[from] ConsensusError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for LedgerError {
    fn from(err: config::ConfigError) -> Self {
        LedgerError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for LedgerError {
    fn from(err: toml::ser::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}

impl LedgerError {
    /// Whether retrying the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LedgerError::ProofSearchExhausted { .. } | LedgerError::RejectedAppend(_)
        )
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
