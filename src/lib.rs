//! # Certify
//!
//! Certify mints academic certificates as one-of-one assets on a host ledger.
//! A single contract call asks the ledger to create a new asset with a supply
//! of exactly one and no decimals, and hands every administrative role on it
//! to the account that made the call.
//!
//! ## What's inside
//!
//! ### The mint call
//! `CertificateMinter::mint` takes an asset name, a unit name and a metadata
//! URL, and returns the numeric id the ledger allocated. The call and the
//! asset creation it triggers commit or abort together.
//!
//! ```rust,ignore
//! let minter = CertificateMinter::new(app_id, system.context());
//! let call = CallContext::new(issuer);
//!
//! let asset_id = minter
//!     .mint(&call, MintRequest::new("Diploma 2024", "DIP24", "https://example.org/cert/1"))
//!     .await?;
//! ```
//!
//! ### Roles
//! Manager, reserve, freeze and clawback are all bound to the caller. The
//! unit starts in the application's escrow; `claim` opts the caller in and
//! claws it back in one atomic group.
//!
//! ### Host ledger
//! The ledger is an injected `ledger::LedgerAdapter`. `ledger::adapters::MemoryAdapter`
//! is an in-memory host that enforces field limits, pooled fees, minimum
//! balances and all-or-nothing groups.
//!
//! ### Certificate metadata
//! `metadata::CertificateMetadata` builds the JSON document the asset URL
//! points to, and `CertificateDetails::mint_request` derives the mint
//! arguments from a pinned document.
//!
//! ## Validation
//!
//! By default nothing is checked locally: oversized fields reach the ledger
//! and abort there. `ValidationPolicy::FailFast` rejects them before submission.

pub mod config;
pub mod contract;
pub mod error;
pub mod metadata;
pub mod request;

pub use ledger;

pub use crate::config::{MintConfig, ValidationPolicy};
pub use crate::contract::CertificateMinter;
pub use crate::error::MintError;
pub use crate::metadata::{CertificateDetails, CertificateMetadata};
pub use crate::request::{CallContext, MintRequest};
pub use ledger::{Address, AssetId};
