//! Proof-of-work ledger
//!
//! This crate composes the validated [`Chain`], the [`PendingPool`] and a
//! consensus [`Engine`](chain_consensus::Engine) into the [`Ledger`] facade:
//! `submit_transaction`, `mine`, `get_chain` and `get_pending`.

pub mod chain;
pub mod config;
pub mod error;
pub mod ledger;
pub mod pool;
pub mod snapshot;

pub use chain::Chain;
pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult, RejectReason};
pub use ledger::{Ledger, MineOutcome};
pub use pool::PendingPool;
pub use snapshot::ChainSnapshot;
