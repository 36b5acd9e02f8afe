use ledger::{Address, LedgerError};

#[derive(Debug, thiserror::Error)]
pub enum MintError {
    /// Raised by the host ledger and passed through unchanged.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// Local fail-fast rejection, only under `ValidationPolicy::FailFast`.
    #[error("{field} is {len} bytes, at most {max} are accepted")]
    Rejected {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("{0} is not authorized to mint certificates")]
    Unauthorized(Address),
    #[error("Ledger committed the call without creating an asset")]
    NoAssetCreated,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MintError {
    /// The host-ledger error behind this failure, if any.
    pub fn ledger_error(&self) -> Option<&LedgerError> {
        match self {
            MintError::Ledger(err) => Some(err),
            _ => None,
        }
    }
}
