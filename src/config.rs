use ledger::Address;
use serde::{Deserialize, Serialize};

use crate::MintError;

/// What to do with request fields the host would reject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Submit as-is and let the host ledger abort the call
    #[default]
    Delegate,
    /// Check host field limits locally and never submit an oversized request
    FailFast,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MintConfig {
    pub validation: ValidationPolicy,
    /// Only this account may mint when set
    pub authorized_issuer: Option<Address>,
    /// Fee paid by the outer call. Defaults to two minimum fees so the inner
    /// asset creation is covered.
    pub fee: Option<u64>,
}

impl MintConfig {
    pub fn from_json(json: &str) -> Result<Self, MintError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn fail_fast(mut self) -> Self {
        self.validation = ValidationPolicy::FailFast;
        self
    }

    pub fn authorized_issuer(mut self, issuer: Address) -> Self {
        self.authorized_issuer = Some(issuer);
        self
    }
}
