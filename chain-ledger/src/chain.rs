//! Validated block sequence and the append protocol

use crate::{LedgerError, LedgerResult, RejectReason};
use chain_consensus::Engine;
use chain_core::{now_millis, Block, BlockHash, BlockIndex, Timestamp};
use tracing::{debug, warn};

/// Ordered sequence of validated blocks, starting at genesis.
///
/// Never empty. [`Chain::append`] is the only way to grow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    blocks: Vec<Block>,
    /// Hash of the last block, kept alongside so linking never has to
    /// unwrap the optional hash on `Block`
    tip: BlockHash,
}

impl Chain {
    /// Create a chain holding a freshly stamped genesis block
    pub fn new() -> Self {
        Self::with_genesis_timestamp(now_millis())
    }

    /// Create a chain whose genesis carries a fixed timestamp
    pub fn with_genesis_timestamp(timestamp: Timestamp) -> Self {
        let genesis = Block::genesis(timestamp);
        let tip = genesis.compute_hash();
        Self {
            blocks: vec![genesis],
            tip,
        }
    }

    /// Rebuild a chain from a block sequence, re-running genesis checks and
    /// the full append protocol for every later block.
    pub fn from_blocks<E: Engine + ?Sized>(blocks: Vec<Block>, engine: &E) -> LedgerResult<Self> {
        let mut iter = blocks.into_iter();

        let genesis = iter
            .next()
            .ok_or_else(|| LedgerError::InvalidChain("no genesis block".to_string()))?;

        if !genesis.is_genesis() || !genesis.transactions.is_empty() || genesis.nonce.is_some() {
            return Err(LedgerError::InvalidChain(
                "first block is not a genesis block".to_string(),
            ));
        }
        if !genesis.verify_hash() {
            return Err(LedgerError::InvalidChain(
                "genesis hash does not match its content".to_string(),
            ));
        }

        let tip = genesis.compute_hash();
        let mut chain = Self {
            blocks: vec![genesis],
            tip,
        };

        for mut block in iter {
            let index = block.index;
            let proof = block.hash.take().ok_or_else(|| {
                LedgerError::InvalidChain(format!("block #{} carries no hash", index))
            })?;

            chain
                .append(block, proof, engine)
                .map_err(|err| LedgerError::InvalidChain(format!("block #{}: {}", index, err)))?;
        }

        debug!("Rebuilt chain of {} blocks", chain.len());
        Ok(chain)
    }

    /// Check a candidate and its claimed proof, then append it.
    ///
    /// On rejection the chain is left untouched.
    pub fn append<E: Engine + ?Sized>(
        &mut self,
        mut block: Block,
        proof: BlockHash,
        engine: &E,
    ) -> LedgerResult<&Block> {
        if let Err(reason) = self.check_candidate(&block, &proof, engine) {
            warn!("Rejected block #{}: {}", block.index, reason);
            return Err(reason.into());
        }

        block.hash = Some(proof.clone());
        self.tip = proof;
        self.blocks.push(block);

        Ok(self.last_block())
    }

    /// Link, index and proof checks for a candidate
    pub fn check_candidate<E: Engine + ?Sized>(
        &self,
        block: &Block,
        proof: &BlockHash,
        engine: &E,
    ) -> Result<(), RejectReason> {
        if block.previous_hash != self.tip {
            return Err(RejectReason::LinkMismatch {
                expected: self.tip.clone(),
                actual: block.previous_hash.clone(),
            });
        }

        let expected = self.next_index();
        if block.index != expected {
            return Err(RejectReason::IndexMismatch {
                expected,
                actual: block.index,
            });
        }

        engine.verify_proof(block, proof)?;
        Ok(())
    }

    /// Re-validate the whole chain against `engine`
    pub fn validate<E: Engine + ?Sized>(&self, engine: &E) -> LedgerResult<()> {
        Self::from_blocks(self.blocks.clone(), engine).map(|_| ())
    }

    /// Boolean form of [`Chain::validate`]
    pub fn is_valid<E: Engine + ?Sized>(&self, engine: &E) -> bool {
        self.validate(engine).is_ok()
    }

    /// The most recent block
    pub fn last_block(&self) -> &Block {
        // Non-empty by construction
        &self.blocks[self.blocks.len() - 1]
    }

    /// Hash of the most recent block
    pub fn last_hash(&self) -> &BlockHash {
        &self.tip
    }

    /// Index the next appended block must carry
    pub fn next_index(&self) -> BlockIndex {
        self.last_block().index + 1
    }

    /// The genesis block
    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    /// Get block by index
    pub fn get(&self, index: BlockIndex) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; a chain holds at least its genesis block
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Consume into the block sequence
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}
