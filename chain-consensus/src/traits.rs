//! Consensus engine traits and types

use crate::ConsensusResult;
use chain_core::{Block, BlockHash, Nonce};

/// Result of a seal attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SealOutcome {
    /// A satisfying nonce was found and left on the block
    Sealed {
        /// Hash of the block with `nonce` applied
        hash: BlockHash,
        /// Winning nonce
        nonce: Nonce,
        /// Hashes computed during the search
        attempts: u64,
    },
    /// The search bound ran out before a proof was found
    Exhausted {
        /// Hashes computed before giving up
        attempts: u64,
    },
}

impl SealOutcome {
    /// Number of hashes computed
    pub fn attempts(&self) -> u64 {
        match self {
            SealOutcome::Sealed { attempts, .. } | SealOutcome::Exhausted { attempts } => *attempts,
        }
    }

    pub fn is_sealed(&self) -> bool {
        matches!(self, SealOutcome::Sealed { .. })
    }
}

/// Main consensus engine trait
pub trait Engine: Send + Sync {
    /// Search for a proof for `block`, mutating its nonce
    fn seal(&self, block: &mut Block) -> SealOutcome;

    /// Check that `proof` is an acceptable hash for `block`
    fn verify_proof(&self, block: &Block, proof: &BlockHash) -> ConsensusResult<()>;

    /// Required number of leading zero characters
    fn difficulty(&self) -> usize;
}
