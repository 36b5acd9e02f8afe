// ledger/src/lib.rs
pub mod account;
pub mod adapters;
pub mod address;
pub mod asset;
pub mod error;
pub mod group;
pub mod params;
pub mod transaction;

pub use account::{Account, Holding};
pub use address::Address;
pub use asset::{Asset, AssetId, AssetParams};
pub use error::LedgerError;
pub use group::{Operation, TransactionGroup};
pub use params::LedgerParams;
pub use transaction::{GroupReceipt, Transaction, TransactionKind};

use async_trait::async_trait;
use metrics::{counter, histogram};
use std::sync::Arc;
use uuid::Uuid;

/// Host ledger interface
#[async_trait]
pub trait LedgerAdapter: Send + Sync {
    /// Apply a transaction group atomically.
    /// Implementors MUST:
    /// 1. Reject empty or oversized groups
    /// 2. Check pooled fees against `min_fee` per transaction, inner ones included
    /// 3. Apply every operation in order, inner transactions right after their call
    /// 4. Check every touched account still covers its minimum balance
    /// 5. Commit all effects on success, none on any error
    async fn execute_group(&self, group: &TransactionGroup) -> Result<GroupReceipt, LedgerError>;

    // READ OPERATIONS
    async fn get_asset(&self, asset_id: AssetId) -> Result<Asset, LedgerError>;
    async fn get_account(&self, address: &Address) -> Result<Account, LedgerError>;
    async fn get_holding(&self, address: &Address, asset_id: AssetId)
    -> Result<Holding, LedgerError>;
    async fn get_transaction(&self, tx_id: Uuid) -> Result<Transaction, LedgerError>;

    fn params(&self) -> &LedgerParams;
}

/// Owns the host adapter
pub struct LedgerSystem {
    adapter: Arc<dyn LedgerAdapter>,
}

impl LedgerSystem {
    pub fn new(adapter: Box<dyn LedgerAdapter>) -> Self {
        Self {
            adapter: adapter.into(),
        }
    }

    /// Get adapter reference
    pub fn adapter(&self) -> &dyn LedgerAdapter {
        self.adapter.as_ref()
    }

    /// Get adapter Arc (for creating contexts)
    pub fn adapter_arc(&self) -> Arc<dyn LedgerAdapter> {
        Arc::clone(&self.adapter)
    }

    pub fn context(&self) -> LedgerContext {
        LedgerContext::new(self.adapter_arc())
    }
}

#[derive(Clone)]
pub struct LedgerContext {
    adapter: Arc<dyn LedgerAdapter>,
}

impl LedgerContext {
    pub fn new(adapter: Arc<dyn LedgerAdapter>) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &dyn LedgerAdapter {
        self.adapter.as_ref()
    }

    pub fn params(&self) -> &LedgerParams {
        self.adapter.params()
    }

    /// Submit a group and wait for it to commit or abort.
    pub async fn submit(&self, group: &TransactionGroup) -> Result<GroupReceipt, LedgerError> {
        histogram!("ledger.group.size").record(group.transaction_count() as f64);

        let result = self.adapter.execute_group(group).await;

        counter!("ledger.groups.total",
            "status" => if result.is_ok() { "committed" } else { "aborted" }
        )
        .increment(1);

        match &result {
            Ok(receipt) => tracing::debug!(
                group = %receipt.group,
                transactions = receipt.transactions.len(),
                "group committed"
            ),
            Err(err) => tracing::debug!(error = %err, "group aborted"),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryAdapter;

    #[tokio::test]
    async fn test_system_hands_out_shared_contexts() {
        let system = LedgerSystem::new(Box::new(MemoryAdapter::new()));
        let ctx = system.context();

        assert_eq!(ctx.params(), &LedgerParams::default());
        assert!(Arc::ptr_eq(&system.adapter_arc(), &ctx.adapter));
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_group() {
        let system = LedgerSystem::new(Box::new(MemoryAdapter::new()));
        let result = system.context().submit(&TransactionGroup::new()).await;
        assert_eq!(result.unwrap_err(), LedgerError::EmptyGroup);
    }
}
