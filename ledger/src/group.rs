// ledger/src/group.rs
use serde::{Deserialize, Serialize};

use crate::{Address, AssetId, AssetParams, TransactionKind};

/// One transaction in a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Operation {
    Payment {
        sender: Address,
        receiver: Address,
        amount: u64,
        fee: u64,
    },
    AssetCreate {
        sender: Address,
        params: AssetParams,
        fee: u64,
    },
    AssetOptIn {
        sender: Address,
        asset_id: AssetId,
        fee: u64,
    },
    /// Moves units of an asset. With `clawback_target` set, the units are
    /// pulled from that account and `sender` must be the asset's clawback.
    AssetTransfer {
        sender: Address,
        receiver: Address,
        asset_id: AssetId,
        amount: u64,
        clawback_target: Option<Address>,
        fee: u64,
    },
    /// Application call. `inner` transactions are issued by the application's
    /// escrow account and commit or abort with the call.
    AppCall {
        sender: Address,
        app_id: u64,
        fee: u64,
        inner: Vec<Operation>,
    },
}

impl Operation {
    pub fn sender(&self) -> Address {
        match self {
            Operation::Payment { sender, .. }
            | Operation::AssetCreate { sender, .. }
            | Operation::AssetOptIn { sender, .. }
            | Operation::AssetTransfer { sender, .. }
            | Operation::AppCall { sender, .. } => *sender,
        }
    }

    pub fn fee(&self) -> u64 {
        match self {
            Operation::Payment { fee, .. }
            | Operation::AssetCreate { fee, .. }
            | Operation::AssetOptIn { fee, .. }
            | Operation::AssetTransfer { fee, .. }
            | Operation::AppCall { fee, .. } => *fee,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Operation::Payment { .. } => TransactionKind::Payment,
            Operation::AssetCreate { .. } => TransactionKind::AssetCreate,
            Operation::AssetOptIn { .. } => TransactionKind::AssetOptIn,
            Operation::AssetTransfer { .. } => TransactionKind::AssetTransfer,
            Operation::AppCall { .. } => TransactionKind::AppCall,
        }
    }

    pub fn inner(&self) -> &[Operation] {
        match self {
            Operation::AppCall { inner, .. } => inner,
            _ => &[],
        }
    }
}

/// Ordered list of transactions the host applies all-or-nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionGroup {
    operations: Vec<Operation>,
}

impl TransactionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, op: Operation) -> Self {
        self.add(op);
        self
    }

    pub fn add(&mut self, op: Operation) {
        self.operations.push(op);
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Top-level and inner transactions together.
    pub fn transaction_count(&self) -> usize {
        self.operations.iter().map(|op| 1 + op.inner().len()).sum()
    }

    /// Fees are pooled across the whole group.
    pub fn total_fees(&self) -> u64 {
        self.operations
            .iter()
            .map(|op| {
                op.inner()
                    .iter()
                    .fold(op.fee(), |acc, inner| acc.saturating_add(inner.fee()))
            })
            .fold(0u64, u64::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_fees_include_inner_transactions() {
        let caller = Address::from_seed("caller");
        let app = Address::for_application(42);

        let group = TransactionGroup::new()
            .with(Operation::AppCall {
                sender: caller,
                app_id: 42,
                fee: 2_000,
                inner: vec![Operation::AssetCreate {
                    sender: app,
                    params: AssetParams::unique("A", "A", "", caller),
                    fee: 0,
                }],
            })
            .with(Operation::AssetOptIn {
                sender: caller,
                asset_id: 1001,
                fee: 1_000,
            });

        assert_eq!(group.len(), 2);
        assert_eq!(group.transaction_count(), 3);
        assert_eq!(group.total_fees(), 3_000);
        assert_eq!(group.operations()[0].kind(), TransactionKind::AppCall);
        assert_eq!(group.operations()[1].sender(), caller);
    }
}
