use ledger::asset::{MAX_ASSET_NAME_BYTES, MAX_UNIT_NAME_BYTES, MAX_URL_BYTES};
use ledger::{Address, AssetParams};
use serde::{Deserialize, Serialize};

use crate::MintError;

/// Identity and fee of the account invoking the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub sender: Address,
    /// Overrides the configured outer-call fee
    pub fee: Option<u64>,
}

impl CallContext {
    pub fn new(sender: Address) -> Self {
        Self { sender, fee: None }
    }

    pub fn with_fee(mut self, fee: u64) -> Self {
        self.fee = Some(fee);
        self
    }
}

/// Arguments of the `mint` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    pub asset_name: String,
    pub unit_name: String,
    /// Where the certificate's off-chain metadata lives
    pub url: String,
}

impl MintRequest {
    pub fn new(
        asset_name: impl Into<String>,
        unit_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            asset_name: asset_name.into(),
            unit_name: unit_name.into(),
            url: url.into(),
        }
    }

    /// Check every field against the host's byte limits.
    pub fn validate(&self) -> Result<(), MintError> {
        for (field, value, max) in [
            ("asset_name", &self.asset_name, MAX_ASSET_NAME_BYTES),
            ("unit_name", &self.unit_name, MAX_UNIT_NAME_BYTES),
            ("url", &self.url, MAX_URL_BYTES),
        ] {
            if value.len() > max {
                return Err(MintError::Rejected {
                    field,
                    len: value.len(),
                    max,
                });
            }
        }
        Ok(())
    }

    /// Creation parameters for a one-of-one certificate controlled by `issuer`.
    pub fn into_params(self, issuer: Address) -> AssetParams {
        AssetParams::unique(self.asset_name, self.unit_name, self.url, issuer)
    }
}
