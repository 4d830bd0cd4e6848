//! Pending transaction pool

use chain_core::Transaction;

/// Ordered buffer of transactions awaiting inclusion in a block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingPool {
    transactions: Vec<Transaction>,
}

impl PendingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the end of the pool
    pub fn push(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Pending records in submission order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Copy of the pending records, leaving the pool intact
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Drop every pending record
    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(content: &str) -> Transaction {
        Transaction::new().with_field("content", content)
    }

    #[test]
    fn test_push_keeps_order() {
        let mut pool = PendingPool::new();
        pool.push(tx("first"));
        pool.push(tx("second"));

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.transactions(), &[tx("first"), tx("second")]);
    }

    #[test]
    fn test_snapshot_leaves_pool() {
        let mut pool = PendingPool::new();
        pool.push(tx("only"));

        let snapshot = pool.snapshot();
        assert_eq!(snapshot, vec![tx("only")]);
        assert_eq!(pool.len(), 1);

        pool.clear();
        assert!(pool.is_empty());
    }
}
