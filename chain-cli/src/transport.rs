//! Line transport
//!
//! Each input line is one JSON request tagged by `op`; each produces one JSON
//! response. Submissions are checked for their required fields and stamped
//! with a submission time before they reach the ledger, which never looks
//! inside a record.

use chain_core::{now_millis, Transaction};
use chain_ledger::{Ledger, MineOutcome};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Fields every submitted record must carry with a non-empty value
pub const REQUIRED_FIELDS: [&str; 2] = ["author", "content"];

/// A decoded request line
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Queue a transaction; every field besides `op` is kept
    Submit {
        #[serde(flatten)]
        fields: Map<String, Value>,
    },
    /// Mine the pending pool
    Mine,
    /// Dump the whole chain
    Chain,
    /// Dump the pending pool
    Pending,
}

/// Check required fields and stamp the submission time
pub fn prepare_transaction(mut fields: Map<String, Value>) -> Option<Transaction> {
    let complete = REQUIRED_FIELDS
        .iter()
        .all(|field| fields.get(*field).is_some_and(is_present));
    if !complete {
        return None;
    }

    fields.insert("timestamp".to_string(), Value::from(now_millis()));
    Some(Transaction::from(fields))
}

/// Null, `false`, zero and empty values count as missing
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn error_response(message: impl Into<String>) -> Value {
    json!({"status": "error", "message": message.into()})
}

/// Decode and serve one request line
pub async fn handle_line(ledger: &Arc<Ledger>, line: &str, snapshot_path: Option<&Path>) -> Value {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(ledger, request, snapshot_path).await,
        Err(e) => {
            warn!("Malformed request: {}", e);
            error_response(format!("Malformed request: {}", e))
        }
    }
}

/// Serve one request
pub async fn handle(ledger: &Arc<Ledger>, request: Request, snapshot_path: Option<&Path>) -> Value {
    match request {
        Request::Submit { fields } => match prepare_transaction(fields) {
            Some(tx) => {
                ledger.submit_transaction(tx);
                json!({"status": "success"})
            }
            None => {
                debug!("Submission missing required fields");
                error_response("Invalid transaction data")
            }
        },
        Request::Mine => match Arc::clone(ledger).mine_async().await {
            Ok(MineOutcome::NothingToMine) => json!({"message": "No transaction to mine"}),
            Ok(MineOutcome::Mined { index }) => {
                if let Some(path) = snapshot_path {
                    if let Err(e) = ledger.snapshot().save_to_file(path) {
                        error!("Failed to save snapshot to {}: {}", path.display(), e);
                    }
                }
                json!({"message": format!("Block #{} is mined", index), "index": index})
            }
            Err(e) => error_response(e.to_string()),
        },
        Request::Chain => {
            let chain = ledger.get_chain();
            json!({"length": chain.len(), "chain": chain})
        }
        Request::Pending => json!(ledger.get_pending()),
    }
}
