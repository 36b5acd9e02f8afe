// ledger/src/asset.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, LedgerError};

/// Numeric asset identifier allocated by the host ledger.
pub type AssetId = u64;

pub const MAX_ASSET_NAME_BYTES: usize = 32;
pub const MAX_UNIT_NAME_BYTES: usize = 8;
pub const MAX_URL_BYTES: usize = 96;
pub const MAX_DECIMALS: u32 = 19;

/// Parameters of an asset-creation request.
///
/// Role addresses left as `None` are permanently disabled on the asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParams {
    pub total: u64,
    pub decimals: u32,
    pub default_frozen: bool,
    pub asset_name: String,
    pub unit_name: String,
    pub url: String,
    pub manager: Option<Address>,
    pub reserve: Option<Address>,
    pub freeze: Option<Address>,
    pub clawback: Option<Address>,
}

impl AssetParams {
    /// A single indivisible unit whose four roles all belong to `authority`.
    pub fn unique(
        asset_name: impl Into<String>,
        unit_name: impl Into<String>,
        url: impl Into<String>,
        authority: Address,
    ) -> Self {
        Self {
            total: 1,
            decimals: 0,
            default_frozen: false,
            asset_name: asset_name.into(),
            unit_name: unit_name.into(),
            url: url.into(),
            manager: Some(authority),
            reserve: Some(authority),
            freeze: Some(authority),
            clawback: Some(authority),
        }
    }

    /// Check the request against the host's field limits.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.total == 0 {
            return Err(LedgerError::InvalidTotal);
        }
        if self.decimals > MAX_DECIMALS {
            return Err(LedgerError::InvalidDecimals(self.decimals));
        }
        check_len("asset_name", &self.asset_name, MAX_ASSET_NAME_BYTES)?;
        check_len("unit_name", &self.unit_name, MAX_UNIT_NAME_BYTES)?;
        check_len("url", &self.url, MAX_URL_BYTES)?;
        Ok(())
    }

    pub fn is_unique(&self) -> bool {
        self.total == 1 && self.decimals == 0
    }
}

pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), LedgerError> {
    if value.len() > max {
        return Err(LedgerError::FieldTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

/// An asset as recorded by the host after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub creator: Address,
    pub params: AssetParams,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(id: AssetId, creator: Address, params: AssetParams) -> Self {
        Self {
            id,
            creator,
            params,
            created_at: Utc::now(),
        }
    }
}
