// ledger/src/account.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Address, AssetId, LedgerParams};

/// An account's position in one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub asset_id: AssetId,
    pub amount: u64,
    pub frozen: bool,
}

impl Holding {
    pub fn new(asset_id: AssetId, amount: u64, frozen: bool) -> Self {
        Self {
            asset_id,
            amount,
            frozen,
        }
    }
}

/// Host-side account state: native balance, created assets and opted-in holdings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    /// Native balance in micro-units
    pub balance: u64,
    pub total_assets_created: u64,
    pub holdings: BTreeMap<AssetId, Holding>,
}

impl Account {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            balance: 0,
            total_assets_created: 0,
            holdings: BTreeMap::new(),
        }
    }

    /// Balance the account must keep locked given what it created and holds.
    ///
    /// A created asset also occupies a holding slot on its creator, so the
    /// reserve is charged per holding and not again per creation.
    pub fn min_balance(&self, params: &LedgerParams) -> u64 {
        params.min_balance.saturating_add(
            params
                .asset_min_balance
                .saturating_mul(self.holdings.len() as u64),
        )
    }

    pub fn holding(&self, asset_id: AssetId) -> Option<&Holding> {
        self.holdings.get(&asset_id)
    }
}
