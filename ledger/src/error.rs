// ledger/src/error.rs
use uuid::Uuid;

use crate::{Address, AssetId};

/// Errors raised by the host ledger. Any of them aborts the whole group.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("{field} is {len} bytes, the ledger allows at most {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("Asset total must be at least 1")]
    InvalidTotal,
    #[error("Asset decimals {0} exceed the ledger maximum")]
    InvalidDecimals(u32),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Account not found: {0}")]
    AccountNotFound(Address),
    #[error("Insufficient balance on {address}: requires {required}, has {available}")]
    InsufficientBalance {
        address: Address,
        required: u64,
        available: u64,
    },
    #[error("Fee too low: group requires {required}, provided {provided}")]
    FeeTooLow { required: u64, provided: u64 },
    #[error("Asset not found: {0}")]
    AssetNotFound(AssetId),
    #[error("Account {address} is not opted in to asset {asset_id}")]
    NotOptedIn { address: Address, asset_id: AssetId },
    #[error("Account {address} holds {available} of asset {asset_id}, needs {required}")]
    InsufficientHolding {
        address: Address,
        asset_id: AssetId,
        required: u64,
        available: u64,
    },
    #[error("{sender} is not the clawback address of asset {asset_id}")]
    UnauthorizedClawback { sender: Address, asset_id: AssetId },
    #[error("Asset {asset_id} is frozen for {address}")]
    AssetFrozen { address: Address, asset_id: AssetId },
    #[error("Invalid inner transaction: {0}")]
    InvalidInnerTransaction(String),
    #[error("Transaction group is empty")]
    EmptyGroup,
    #[error("Transaction group holds {len} transactions, the ledger allows at most {max}")]
    GroupTooLarge { len: usize, max: usize },
    #[error("Asset id space exhausted")]
    AssetIdsExhausted,
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
}
