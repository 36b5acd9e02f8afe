mod common;

use async_trait::async_trait;
use certify::ledger::{
    Account, Address, Asset, AssetId, GroupReceipt, Holding, LedgerAdapter, LedgerContext,
    LedgerError, LedgerParams, Operation, Transaction, TransactionGroup, TransactionKind,
};
use certify::{CallContext, CertificateMinter, MintConfig, MintError, MintRequest};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Records every submitted group and answers with a scripted outcome.
struct RecordingLedger {
    params: LedgerParams,
    submitted: Mutex<Vec<TransactionGroup>>,
    outcome: Result<Vec<AssetId>, LedgerError>,
}

impl RecordingLedger {
    fn returning(created: Vec<AssetId>) -> Self {
        Self {
            params: LedgerParams::default(),
            submitted: Mutex::new(Vec::new()),
            outcome: Ok(created),
        }
    }

    fn failing(err: LedgerError) -> Self {
        Self {
            params: LedgerParams::default(),
            submitted: Mutex::new(Vec::new()),
            outcome: Err(err),
        }
    }

    fn submitted(&self) -> Vec<TransactionGroup> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerAdapter for RecordingLedger {
    async fn execute_group(&self, group: &TransactionGroup) -> Result<GroupReceipt, LedgerError> {
        self.submitted.lock().unwrap().push(group.clone());

        let created = self.outcome.clone()?;
        let mut receipt = GroupReceipt::new(Uuid::now_v7());
        for asset_id in created {
            receipt.push(Transaction::new(
                receipt.group,
                Address::ZERO,
                TransactionKind::AssetCreate,
                0,
                Some(asset_id),
                true,
            ));
        }
        Ok(receipt)
    }

    async fn get_asset(&self, asset_id: AssetId) -> Result<Asset, LedgerError> {
        Err(LedgerError::AssetNotFound(asset_id))
    }

    async fn get_account(&self, address: &Address) -> Result<Account, LedgerError> {
        Err(LedgerError::AccountNotFound(*address))
    }

    async fn get_holding(
        &self,
        address: &Address,
        asset_id: AssetId,
    ) -> Result<Holding, LedgerError> {
        Err(LedgerError::NotOptedIn {
            address: *address,
            asset_id,
        })
    }

    async fn get_transaction(&self, tx_id: Uuid) -> Result<Transaction, LedgerError> {
        Err(LedgerError::TransactionNotFound(tx_id))
    }

    fn params(&self) -> &LedgerParams {
        &self.params
    }
}

fn minter(ledger: &Arc<RecordingLedger>, config: MintConfig) -> CertificateMinter {
    common::init_tracing();
    CertificateMinter::with_config(common::APP_ID, LedgerContext::new(ledger.clone()), config)
}

fn diploma() -> MintRequest {
    MintRequest::new("Diploma 2024", "DIP24", "https://example.org/cert/1")
}

#[tokio::test]
async fn test_mint_submits_single_app_call_with_inner_creation() {
    let ledger = Arc::new(RecordingLedger::returning(vec![77]));
    let minter = minter(&ledger, MintConfig::default());
    let caller = Address::from_seed("caller");

    let asset_id = minter
        .mint(&CallContext::new(caller), diploma())
        .await
        .unwrap();
    assert_eq!(asset_id, 77);

    let submitted = ledger.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].len(), 1);

    let Operation::AppCall {
        sender,
        app_id,
        fee,
        inner,
    } = &submitted[0].operations()[0]
    else {
        panic!("expected an application call");
    };
    assert_eq!(*sender, caller);
    assert_eq!(*app_id, minter.app_id());
    assert_eq!(*fee, 2_000);
    assert_eq!(inner.len(), 1);

    let Operation::AssetCreate {
        sender,
        params,
        fee,
    } = &inner[0]
    else {
        panic!("expected an inner asset creation");
    };
    assert_eq!(*sender, minter.address());
    assert_eq!(*fee, 0);
    assert_eq!(params.total, 1);
    assert_eq!(params.decimals, 0);
    assert!(!params.default_frozen);
    assert_eq!(params.asset_name, "Diploma 2024");
    assert_eq!(params.unit_name, "DIP24");
    assert_eq!(params.url, "https://example.org/cert/1");
    for role in [params.manager, params.reserve, params.freeze, params.clawback] {
        assert_eq!(role, Some(caller));
    }
}

#[tokio::test]
async fn test_fee_precedence() {
    let ledger = Arc::new(RecordingLedger::returning(vec![1]));
    let config = MintConfig {
        fee: Some(5_000),
        ..MintConfig::default()
    };
    let minter = minter(&ledger, config);
    let caller = Address::from_seed("caller");

    minter
        .mint(&CallContext::new(caller), diploma())
        .await
        .unwrap();
    minter
        .mint(&CallContext::new(caller).with_fee(3_000), diploma())
        .await
        .unwrap();

    let fees: Vec<u64> = ledger
        .submitted()
        .iter()
        .map(|group| group.operations()[0].fee())
        .collect();
    assert_eq!(fees, vec![5_000, 3_000]);
}

#[tokio::test]
async fn test_ledger_errors_pass_through_unchanged() {
    let ledger = Arc::new(RecordingLedger::failing(LedgerError::Storage(
        "node unavailable".to_string(),
    )));
    let minter = minter(&ledger, MintConfig::default());

    let err = minter
        .mint(&CallContext::new(Address::from_seed("caller")), diploma())
        .await
        .unwrap_err();

    assert_eq!(
        err.ledger_error(),
        Some(&LedgerError::Storage("node unavailable".to_string()))
    );
    assert_eq!(err.to_string(), "Storage error: node unavailable");
    // No retry
    assert_eq!(ledger.submitted().len(), 1);
}

#[tokio::test]
async fn test_commit_without_created_asset_is_an_error() {
    let ledger = Arc::new(RecordingLedger::returning(Vec::new()));
    let minter = minter(&ledger, MintConfig::default());

    let err = minter
        .mint(&CallContext::new(Address::from_seed("caller")), diploma())
        .await
        .unwrap_err();

    assert!(matches!(err, MintError::NoAssetCreated));
}

#[tokio::test]
async fn test_delegate_policy_forwards_oversized_fields() {
    let ledger = Arc::new(RecordingLedger::returning(vec![9]));
    let minter = minter(&ledger, MintConfig::default());

    let request = MintRequest::new("x".repeat(64), "DIP24", "https://example.org");
    minter
        .mint(&CallContext::new(Address::from_seed("caller")), request)
        .await
        .unwrap();

    assert_eq!(ledger.submitted().len(), 1);
}

#[tokio::test]
async fn test_fail_fast_and_authorization_never_reach_ledger() {
    let issuer = Address::from_seed("issuer");
    let ledger = Arc::new(RecordingLedger::returning(vec![9]));
    let minter = minter(&ledger, MintConfig::default().fail_fast().authorized_issuer(issuer));

    let oversized = MintRequest::new("x".repeat(64), "DIP24", "https://example.org");
    assert!(matches!(
        minter.mint(&CallContext::new(issuer), oversized).await,
        Err(MintError::Rejected { field: "asset_name", .. })
    ));
    assert!(matches!(
        minter
            .mint(&CallContext::new(Address::from_seed("other")), diploma())
            .await,
        Err(MintError::Unauthorized(_))
    ));

    assert!(ledger.submitted().is_empty());
}
