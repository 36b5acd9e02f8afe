// ledger/src/transaction.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Address, AssetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Payment,
    AssetCreate,
    AssetOptIn,
    AssetTransfer,
    AppCall,
}

/// A committed transaction. Inner transactions issued by an application call
/// carry `inner = true` and share the group id of their parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub group: Uuid,
    pub sender: Address,
    pub kind: TransactionKind,
    pub fee: u64,
    pub created_asset: Option<AssetId>,
    pub inner: bool,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        group: Uuid,
        sender: Address,
        kind: TransactionKind,
        fee: u64,
        created_asset: Option<AssetId>,
        inner: bool,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            group,
            sender,
            kind,
            fee,
            created_asset,
            inner,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of a committed group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReceipt {
    pub group: Uuid,
    pub transactions: Vec<Transaction>,
    /// Assets created by the group, in creation order
    pub created_assets: Vec<AssetId>,
}

impl GroupReceipt {
    pub fn new(group: Uuid) -> Self {
        Self {
            group,
            transactions: Vec::new(),
            created_assets: Vec::new(),
        }
    }

    pub fn push(&mut self, transaction: Transaction) {
        if let Some(asset_id) = transaction.created_asset {
            self.created_assets.push(asset_id);
        }
        self.transactions.push(transaction);
    }

    /// The single asset created by this group, if exactly one was.
    pub fn created_asset(&self) -> Option<AssetId> {
        match self.created_assets.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }
}
