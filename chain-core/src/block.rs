//! Block data structure and canonical hashing

use crate::{BlockHash, BlockIndex, Nonce, Timestamp, Transaction};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// One ledger entry, linked to its predecessor by hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (genesis is 0)
    pub index: BlockIndex,
    /// Transactions committed by this block, in submission order
    pub transactions: Vec<Transaction>,
    /// Construction time in milliseconds
    pub timestamp: Timestamp,
    /// Hash of the preceding block, `"0"` for genesis
    pub previous_hash: BlockHash,
    /// Proof-of-work nonce, unset until mining completes
    pub nonce: Option<Nonce>,
    /// Own hash, unset until the block is accepted into a chain
    pub hash: Option<BlockHash>,
}

impl Block {
    /// Build an unmined candidate block
    pub fn candidate(
        index: BlockIndex,
        transactions: Vec<Transaction>,
        timestamp: Timestamp,
        previous_hash: BlockHash,
    ) -> Self {
        Self {
            index,
            transactions,
            timestamp,
            previous_hash,
            nonce: None,
            hash: None,
        }
    }

    /// Build the genesis block. Its hash is assigned immediately; genesis
    /// never goes through proof-of-work.
    pub fn genesis(timestamp: Timestamp) -> Self {
        let mut block = Self::candidate(0, Vec::new(), timestamp, BlockHash::genesis_parent());
        block.hash = Some(block.compute_hash());
        block
    }

    /// Canonical JSON form of every field except `hash`.
    ///
    /// Object keys are emitted in sorted order, both at the top level and
    /// inside each transaction record. `nonce` is omitted while unset.
    pub fn canonical_json(&self) -> String {
        let mut fields = Map::new();
        fields.insert("index".to_string(), Value::from(self.index));
        if let Some(nonce) = self.nonce {
            fields.insert("nonce".to_string(), Value::from(nonce));
        }
        fields.insert(
            "previous_hash".to_string(),
            Value::from(self.previous_hash.as_str()),
        );
        fields.insert("timestamp".to_string(), Value::from(self.timestamp));
        fields.insert(
            "transactions".to_string(),
            Value::Array(
                self.transactions
                    .iter()
                    .map(|tx| Value::Object(tx.as_map().clone()))
                    .collect(),
            ),
        );
        Value::Object(fields).to_string()
    }

    /// SHA-256 of the canonical form, hex encoded
    pub fn compute_hash(&self) -> BlockHash {
        let digest = Sha256::digest(self.canonical_json().as_bytes());
        BlockHash::from_digest(&digest)
    }

    /// Stored hash, if the block has been accepted
    pub fn hash(&self) -> Option<&BlockHash> {
        self.hash.as_ref()
    }

    /// Check that the stored hash matches the block's content
    pub fn verify_hash(&self) -> bool {
        match &self.hash {
            Some(hash) => *hash == self.compute_hash(),
            None => false,
        }
    }

    /// Check if block is genesis
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash.as_str() == crate::GENESIS_PREVIOUS_HASH
    }
}
