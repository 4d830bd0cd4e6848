//! Basic ledger types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Block index type (position in the chain, genesis is 0)
pub type BlockIndex = u64;

/// Timestamp in milliseconds since Unix epoch
pub type Timestamp = u64;

/// Proof-of-work nonce
pub type Nonce = u64;

/// Sentinel stored as the genesis block's `previous_hash`
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Hex-encoded block digest.
///
/// Kept as text rather than raw bytes: the genesis block links to the
/// one-character sentinel `"0"`, and the difficulty predicate counts leading
/// `'0'` characters of the hex form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHash(String);

impl BlockHash {
    /// Encode a raw SHA-256 digest as lowercase hex
    pub fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode(digest))
    }

    /// The sentinel parent hash of the genesis block
    pub fn genesis_parent() -> Self {
        Self(GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Borrow the hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of leading `'0'` characters
    pub fn leading_zeros(&self) -> usize {
        self.0.chars().take_while(|c| *c == '0').count()
    }

    /// Check the difficulty predicate: at least `difficulty` leading zeros
    pub fn meets_difficulty(&self, difficulty: usize) -> bool {
        self.leading_zeros() >= difficulty
    }

    /// Short prefix for log lines
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        self.0.get(..end).unwrap_or(&self.0)
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BlockHash {
    fn from(hex: String) -> Self {
        Self(hex)
    }
}

impl From<&str> for BlockHash {
    fn from(hex: &str) -> Self {
        Self(hex.to_string())
    }
}

impl AsRef<str> for BlockHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Current wall-clock time in milliseconds
pub fn now_millis() -> Timestamp {
    // Pre-epoch clocks clamp to zero
    chrono::Utc::now().timestamp_millis().max(0) as Timestamp
}
