//! PoW consensus engine implementation

use crate::pow::PowConfig;
use crate::traits::{Engine, SealOutcome};
use crate::{ConsensusError, ConsensusResult};
use chain_core::{Block, BlockHash, Nonce};
use tracing::{debug, info, warn};

/// Leading-zero proof-of-work engine
#[derive(Debug, Clone)]
pub struct ProofOfWork {
    /// Configuration
    config: PowConfig,
}

impl ProofOfWork {
    /// Create a new PoW engine
    pub fn new(config: PowConfig) -> ConsensusResult<Self> {
        config.validate()?;

        info!(
            "PoW engine ready (difficulty {}, max attempts {:?})",
            config.difficulty, config.max_attempts
        );

        Ok(Self { config })
    }

    /// Unbounded engine with the given difficulty
    pub fn with_difficulty(difficulty: usize) -> ConsensusResult<Self> {
        Self::new(PowConfig::new(difficulty))
    }

    /// Get the configuration
    pub fn config(&self) -> &PowConfig {
        &self.config
    }

    /// Boolean form of [`Engine::verify_proof`]
    pub fn is_valid_proof(&self, block: &Block, proof: &BlockHash) -> bool {
        self.verify_proof(block, proof).is_ok()
    }
}

impl Engine for ProofOfWork {
    fn seal(&self, block: &mut Block) -> SealOutcome {
        let difficulty = self.config.difficulty;
        let mut nonce: Nonce = 0;
        let mut attempts: u64 = 0;

        debug!("Sealing block #{} at difficulty {}", block.index, difficulty);

        loop {
            if self.config.max_attempts.is_some_and(|max| attempts >= max) {
                break;
            }

            block.nonce = Some(nonce);
            let hash = block.compute_hash();
            attempts += 1;

            if hash.meets_difficulty(difficulty) {
                debug!(
                    "Block #{} sealed with nonce {} after {} attempts ({})",
                    block.index,
                    nonce,
                    attempts,
                    hash.short()
                );
                return SealOutcome::Sealed {
                    hash,
                    nonce,
                    attempts,
                };
            }

            nonce = match nonce.checked_add(1) {
                Some(next) => next,
                None => break,
            };
        }

        // A half-searched nonce must not look like a proof
        block.nonce = None;
        warn!(
            "Proof search for block #{} exhausted after {} attempts",
            block.index, attempts
        );
        SealOutcome::Exhausted { attempts }
    }

    fn verify_proof(&self, block: &Block, proof: &BlockHash) -> ConsensusResult<()> {
        if !proof.meets_difficulty(self.config.difficulty) {
            return Err(ConsensusError::InsufficientWork {
                difficulty: self.config.difficulty,
                hash: proof.clone(),
            });
        }

        let computed = block.compute_hash();
        if computed != *proof {
            return Err(ConsensusError::ProofMismatch {
                claimed: proof.clone(),
                computed,
            });
        }

        Ok(())
    }

    fn difficulty(&self) -> usize {
        self.config.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_core::Transaction;
    use proptest::prelude::*;

    fn candidate() -> Block {
        let tx = Transaction::new()
            .with_field("author", "a")
            .with_field("content", "hi");
        Block::candidate(1, vec![tx], 1_700_000_000_000, BlockHash::from("00ab"))
    }

    fn create_test_engine() -> ProofOfWork {
        ProofOfWork::with_difficulty(2).unwrap()
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        assert!(ProofOfWork::with_difficulty(100).is_err());
        assert!(ProofOfWork::new(PowConfig::default().with_max_attempts(0)).is_err());
    }

    #[test]
    fn test_seal_finds_proof() {
        let engine = create_test_engine();
        let mut block = candidate();

        let outcome = engine.seal(&mut block);
        let SealOutcome::Sealed {
            hash,
            nonce,
            attempts,
        } = outcome
        else {
            panic!("unbounded search must succeed");
        };

        assert!(hash.as_str().starts_with("00"));
        assert_eq!(block.nonce, Some(nonce));
        assert_eq!(block.compute_hash(), hash);
        // Nonces are tried from zero upwards
        assert_eq!(attempts, nonce + 1);
        assert!(engine.verify_proof(&block, &hash).is_ok());
    }

    #[test]
    fn test_seal_is_deterministic() {
        let engine = create_test_engine();
        let mut block1 = candidate();
        let mut block2 = candidate();
        assert_eq!(engine.seal(&mut block1), engine.seal(&mut block2));
    }

    #[test]
    fn test_zero_difficulty_seals_first_nonce() {
        let engine = ProofOfWork::with_difficulty(0).unwrap();
        let mut block = candidate();
        let outcome = engine.seal(&mut block);
        assert!(outcome.is_sealed());
        assert_eq!(outcome.attempts(), 1);
        assert_eq!(block.nonce, Some(0));
    }

    #[test]
    fn test_seal_exhausted() {
        // 64 leading zeros is unreachable in a handful of tries
        let engine = ProofOfWork::new(PowConfig::new(64).with_max_attempts(5)).unwrap();
        let mut block = candidate();

        let outcome = engine.seal(&mut block);
        assert_eq!(outcome, SealOutcome::Exhausted { attempts: 5 });
        assert!(!outcome.is_sealed());
        assert!(block.nonce.is_none());
    }

    #[test]
    fn test_verify_insufficient_work() {
        let engine = create_test_engine();
        let mut block = candidate();
        block.nonce = Some(0);

        let proof = BlockHash::from("ff".repeat(32));
        let err = engine.verify_proof(&block, &proof).unwrap_err();
        assert!(matches!(err, ConsensusError::InsufficientWork { difficulty: 2, .. }));
    }

    #[test]
    fn test_verify_proof_mismatch() {
        let engine = create_test_engine();
        let mut block = candidate();
        let SealOutcome::Sealed { hash, .. } = engine.seal(&mut block) else {
            panic!("unbounded search must succeed");
        };

        // Same proof, different content
        block.transactions.clear();
        let err = engine.verify_proof(&block, &hash).unwrap_err();
        assert!(matches!(err, ConsensusError::ProofMismatch { .. }));
        assert!(!engine.is_valid_proof(&block, &hash));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_sealed_hash_meets_difficulty(index in 1u64..1_000, timestamp in any::<u64>(), difficulty in 0usize..3) {
            let engine = ProofOfWork::with_difficulty(difficulty).unwrap();
            let mut block = Block::candidate(index, Vec::new(), timestamp, BlockHash::from("0"));

            match engine.seal(&mut block) {
                SealOutcome::Sealed { hash, .. } => {
                    prop_assert!(hash.meets_difficulty(difficulty));
                    prop_assert!(engine.is_valid_proof(&block, &hash));
                }
                SealOutcome::Exhausted { .. } => prop_assert!(false, "unbounded search exhausted"),
            }
        }
    }
}
