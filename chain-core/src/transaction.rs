//! Transaction records
//!
//! The ledger treats a transaction as an opaque key/value payload. Callers
//! are responsible for checking required fields and stamping a submission
//! time before a record reaches the ledger.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque transaction record stored by value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction(Map<String, Value>);

impl Transaction {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterate over fields
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying JSON object
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Transaction {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Transaction {
    type Error = CoreError;

    fn try_from(value: Value) -> CoreResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let tx = Transaction::new()
            .with_field("author", "a")
            .with_field("content", "hi");

        assert_eq!(tx.len(), 2);
        assert_eq!(tx.get("author"), Some(&json!("a")));
        assert_eq!(tx.get("missing"), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut tx = Transaction::new().with_field("content", "old");
        let previous = tx.insert("content", "new");
        assert_eq!(previous, Some(json!("old")));
        assert_eq!(tx.get("content"), Some(&json!("new")));
    }

    #[test]
    fn test_try_from_object() {
        let tx = Transaction::try_from(json!({"author": "a", "content": "hi"})).unwrap();
        assert_eq!(tx.len(), 2);
    }

    #[test]
    fn test_try_from_non_object() {
        let err = Transaction::try_from(json!(["a", "b"])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let tx = Transaction::new().with_field("content", "hi").with_field("author", "a");
        let json = serde_json::to_string(&tx).unwrap();
        // Keys come out sorted
        assert_eq!(json, r#"{"author":"a","content":"hi"}"#);
    }
}
