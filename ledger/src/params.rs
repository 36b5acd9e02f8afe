// ledger/src/params.rs
use serde::{Deserialize, Serialize};

/// Consensus parameters the host enforces on every group.
///
/// Amounts are in micro-units of the native currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerParams {
    /// Minimum fee per transaction, inner transactions included
    pub min_fee: u64,
    /// Balance every account must keep
    pub min_balance: u64,
    /// Extra locked balance per created or opted-in asset
    pub asset_min_balance: u64,
    pub max_group_size: usize,
    pub max_inner_transactions: usize,
    /// Id handed to the first asset created on a fresh ledger
    pub first_asset_id: u64,
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            min_fee: 1_000,
            min_balance: 100_000,
            asset_min_balance: 100_000,
            max_group_size: 16,
            max_inner_transactions: 256,
            first_asset_id: 1_001,
        }
    }
}
