//! Ledger facade
//!
//! [`Ledger`] owns the chain, the pending pool and the consensus engine.
//! One `RwLock` guards chain and pool together: submissions and mining take
//! the write side, reads take the read side, so no reader ever sees a block
//! appended without its transactions having left the pool, or the reverse.

use crate::{Chain, ChainSnapshot, LedgerConfig, LedgerError, LedgerResult, PendingPool};
use chain_consensus::{Engine, ProofOfWork, SealOutcome};
use chain_core::{now_millis, Block, BlockIndex, Transaction};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Result of a mining request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineOutcome {
    /// The pending pool was empty; nothing changed
    NothingToMine,
    /// A block holding the whole pool was appended
    Mined { index: BlockIndex },
}

impl MineOutcome {
    /// Index of the new block, if one was mined
    pub fn index(&self) -> Option<BlockIndex> {
        match self {
            MineOutcome::NothingToMine => None,
            MineOutcome::Mined { index } => Some(*index),
        }
    }
}

#[derive(Debug)]
struct LedgerState {
    chain: Chain,
    pool: PendingPool,
}

/// Chain + pending pool + proof-of-work engine
pub struct Ledger<E = ProofOfWork> {
    engine: E,
    state: RwLock<LedgerState>,
}

impl Ledger<ProofOfWork> {
    /// Create a fresh ledger from configuration
    pub fn from_config(config: &LedgerConfig) -> LedgerResult<Self> {
        config.validate()?;
        let engine = ProofOfWork::new(config.pow_config())?;
        Ok(Self::new(engine))
    }
}

impl<E: Engine> Ledger<E> {
    /// Create a ledger with a new genesis block
    pub fn new(engine: E) -> Self {
        Self::with_chain(engine, Chain::new())
    }

    /// Create a ledger around an already validated chain
    pub fn with_chain(engine: E, chain: Chain) -> Self {
        info!(
            "Ledger opened at block #{} (difficulty {})",
            chain.last_block().index,
            engine.difficulty()
        );
        Self {
            engine,
            state: RwLock::new(LedgerState {
                chain,
                pool: PendingPool::new(),
            }),
        }
    }

    /// Restore a ledger from a snapshot, re-validating every block
    pub fn from_snapshot(engine: E, snapshot: ChainSnapshot) -> LedgerResult<Self> {
        if snapshot.difficulty != engine.difficulty() {
            return Err(LedgerError::InvalidChain(format!(
                "snapshot was mined at difficulty {}, engine requires {}",
                snapshot.difficulty,
                engine.difficulty()
            )));
        }

        let chain = Chain::from_blocks(snapshot.blocks, &engine)?;
        Ok(Self::with_chain(engine, chain))
    }

    /// Queue a record for the next block
    pub fn submit_transaction(&self, tx: Transaction) {
        let mut state = self.state.write();
        state.pool.push(tx);
        debug!("Transaction queued ({} pending)", state.pool.len());
    }

    /// Promote the whole pending pool into a new block.
    ///
    /// The write lock is held from reading the pool until it is cleared, so
    /// no second mine and no submission can interleave.
    pub fn mine(&self) -> LedgerResult<MineOutcome> {
        let mut state = self.state.write();

        if state.pool.is_empty() {
            debug!("Nothing to mine");
            return Ok(MineOutcome::NothingToMine);
        }

        let last = state.chain.last_block();
        let mut candidate = Block::candidate(
            last.index + 1,
            state.pool.snapshot(),
            now_millis(),
            state.chain.last_hash().clone(),
        );

        let (proof, nonce, attempts) = match self.engine.seal(&mut candidate) {
            SealOutcome::Sealed {
                hash,
                nonce,
                attempts,
            } => (hash, nonce, attempts),
            SealOutcome::Exhausted { attempts } => {
                return Err(LedgerError::ProofSearchExhausted { attempts });
            }
        };

        let index = candidate.index;
        let tx_count = candidate.transactions.len();

        if let Err(err) = state.chain.append(candidate, proof, &self.engine) {
            error!(
                "Self-mined block #{} failed validation; hashing and proof checks disagree: {}",
                index, err
            );
            return Err(LedgerError::InternalInconsistency(format!(
                "self-mined block #{} rejected: {}",
                index, err
            )));
        }

        state.pool.clear();

        info!(
            "Block #{} mined with {} transactions (nonce {}, {} attempts, {})",
            index,
            tx_count,
            nonce,
            attempts,
            state.chain.last_hash().short()
        );

        Ok(MineOutcome::Mined { index })
    }

    /// Every block from genesis to tip
    pub fn get_chain(&self) -> Vec<Block> {
        self.state.read().chain.blocks().to_vec()
    }

    /// Records waiting for the next block, in submission order
    pub fn get_pending(&self) -> Vec<Transaction> {
        self.state.read().pool.snapshot()
    }

    pub fn chain_len(&self) -> usize {
        self.state.read().chain.len()
    }

    pub fn pending_len(&self) -> usize {
        self.state.read().pool.len()
    }

    /// Copy of the most recent block
    pub fn last_block(&self) -> Block {
        self.state.read().chain.last_block().clone()
    }

    pub fn difficulty(&self) -> usize {
        self.engine.difficulty()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Capture the chain for export
    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot::new(self.engine.difficulty(), &self.state.read().chain)
    }

    /// Re-validate the whole chain
    pub fn validate(&self) -> LedgerResult<()> {
        self.state.read().chain.validate(&self.engine)
    }
}

impl<E: Engine + 'static> Ledger<E> {
    /// Run [`Ledger::mine`] on a blocking worker so async tasks sharing the
    /// runtime keep running during the proof search.
    pub async fn mine_async(self: Arc<Self>) -> LedgerResult<MineOutcome> {
        tokio::task::spawn_blocking(move || self.mine())
            .await
            .map_err(|e| LedgerError::Worker(e.to_string()))?
    }
}
