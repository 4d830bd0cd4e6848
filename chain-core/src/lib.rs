//! Core ledger data structures
//!
//! This crate provides the fundamental building blocks for the ledger:
//! - Basic types (BlockHash, BlockIndex, Timestamp)
//! - Opaque transaction records
//! - The Block structure and its canonical SHA-256 hash

pub mod block;
pub mod error;
pub mod transaction;
pub mod types;

// Re-export commonly used types
pub use block::*;
pub use error::*;
pub use transaction::*;
pub use types::*;
