//! Chain snapshot export and import
//!
//! A snapshot is the full ordered block sequence plus the difficulty it was
//! mined at. Blocks are written field by field, so re-hashing a loaded block
//! reproduces the stored digest.

use crate::{Chain, LedgerResult};
use chain_core::{Block, BlockHash};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Serialized chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Difficulty the blocks were sealed at
    pub difficulty: usize,
    /// Blocks from genesis to tip
    pub blocks: Vec<Block>,
}

impl ChainSnapshot {
    /// Capture a chain
    pub fn new(difficulty: usize, chain: &Chain) -> Self {
        Self {
            difficulty,
            blocks: chain.blocks().to_vec(),
        }
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Hash of the last block, if any
    pub fn tip(&self) -> Option<&BlockHash> {
        self.blocks.last().and_then(Block::hash)
    }

    pub fn to_json(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> LedgerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save snapshot to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> LedgerResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!("Saved {} blocks to {}", self.len(), path.display());
        Ok(())
    }

    /// Load snapshot from file. The blocks are not validated here;
    /// see [`Ledger::from_snapshot`](crate::Ledger::from_snapshot).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();
        let snapshot = Self::from_json(&fs::read_to_string(path)?)?;
        debug!("Read {} blocks from {}", snapshot.len(), path.display());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LedgerError;
    use tempfile::tempdir;

    #[test]
    fn test_snapshot_of_new_chain() {
        let chain = Chain::with_genesis_timestamp(7);
        let snapshot = ChainSnapshot::new(2, &chain);

        assert_eq!(snapshot.len(), 1);
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.tip(), Some(chain.last_hash()));
    }

    #[test]
    fn test_file_operations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chain.json");

        let chain = Chain::with_genesis_timestamp(7);
        let snapshot = ChainSnapshot::new(2, &chain);
        snapshot.save_to_file(&path).unwrap();

        let loaded = ChainSnapshot::load_from_file(&path).unwrap();
        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.blocks[0].compute_hash(), *chain.last_hash());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = ChainSnapshot::load_from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)));
    }

    #[test]
    fn test_load_garbage() {
        let err = ChainSnapshot::from_json("{\"difficulty\": 2}").unwrap_err();
        assert!(matches!(err, LedgerError::Json(_)));
    }
}
