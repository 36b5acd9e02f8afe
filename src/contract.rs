use ledger::{Address, AssetId, GroupReceipt, LedgerContext, Operation, TransactionGroup};
use metrics::{counter, histogram};
use std::time::Instant;

use crate::{CallContext, MintConfig, MintError, MintRequest, ValidationPolicy};

/// The certificate application deployed on the host ledger.
///
/// Every successful `mint` creates exactly one asset with a supply of one,
/// no decimals, and the caller as manager, reserve, freeze and clawback.
/// The unit itself starts in the application's escrow account; the caller
/// pulls it out with `claim`.
#[derive(Clone)]
pub struct CertificateMinter {
    app_id: u64,
    ctx: LedgerContext,
    config: MintConfig,
}

impl CertificateMinter {
    pub fn new(app_id: u64, ctx: LedgerContext) -> Self {
        Self::with_config(app_id, ctx, MintConfig::default())
    }

    pub fn with_config(app_id: u64, ctx: LedgerContext, config: MintConfig) -> Self {
        Self {
            app_id,
            ctx,
            config,
        }
    }

    pub fn app_id(&self) -> u64 {
        self.app_id
    }

    /// Escrow account the application issues inner transactions from.
    pub fn address(&self) -> Address {
        Address::for_application(self.app_id)
    }

    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    /// Mint a certificate and return the id the ledger assigned to it.
    #[tracing::instrument(
        name = "mint",
        skip(self, call, request),
        fields(app_id = self.app_id, sender = %call.sender)
    )]
    pub async fn mint(&self, call: &CallContext, request: MintRequest) -> Result<AssetId, MintError> {
        let started = Instant::now();
        let result = self.submit_mint(call, request).await;

        counter!("certify.mint.total",
            "status" => if result.is_ok() { "minted" } else { "aborted" }
        )
        .increment(1);
        histogram!("certify.mint.duration").record(started.elapsed().as_secs_f64());

        match &result {
            Ok(asset_id) => tracing::info!(asset_id, "certificate minted"),
            Err(err) => tracing::warn!(error = %err, "mint aborted"),
        }

        result
    }

    async fn submit_mint(
        &self,
        call: &CallContext,
        request: MintRequest,
    ) -> Result<AssetId, MintError> {
        self.authorize(&call.sender)?;

        if self.config.validation == ValidationPolicy::FailFast {
            request.validate()?;
        }

        let group = TransactionGroup::new().with(Operation::AppCall {
            sender: call.sender,
            app_id: self.app_id,
            fee: self.call_fee(call),
            inner: vec![Operation::AssetCreate {
                sender: self.address(),
                params: request.into_params(call.sender),
                fee: 0,
            }],
        });

        let receipt = self.ctx.submit(&group).await?;
        receipt.created_asset().ok_or(MintError::NoAssetCreated)
    }

    /// Opt the caller in to `asset_id` and claw the unit back from the escrow,
    /// as one group.
    #[tracing::instrument(
        name = "claim",
        skip(self, call),
        fields(app_id = self.app_id, sender = %call.sender)
    )]
    pub async fn claim(&self, call: &CallContext, asset_id: AssetId) -> Result<GroupReceipt, MintError> {
        let fee = call.fee.unwrap_or(self.ctx.params().min_fee);

        let group = TransactionGroup::new()
            .with(Operation::AssetOptIn {
                sender: call.sender,
                asset_id,
                fee,
            })
            .with(Operation::AssetTransfer {
                sender: call.sender,
                receiver: call.sender,
                asset_id,
                amount: 1,
                clawback_target: Some(self.address()),
                fee,
            });

        let result = self.ctx.submit(&group).await.map_err(MintError::from);

        counter!("certify.claim.total",
            "status" => if result.is_ok() { "claimed" } else { "aborted" }
        )
        .increment(1);

        match &result {
            Ok(_) => tracing::info!(asset_id, "certificate claimed"),
            Err(err) => tracing::warn!(asset_id, error = %err, "claim aborted"),
        }

        result
    }

    fn authorize(&self, sender: &Address) -> Result<(), MintError> {
        match self.config.authorized_issuer {
            Some(issuer) if issuer != *sender => Err(MintError::Unauthorized(*sender)),
            _ => Ok(()),
        }
    }

    /// Outer call fee; by default it also covers the inner asset creation.
    fn call_fee(&self, call: &CallContext) -> u64 {
        call.fee
            .or(self.config.fee)
            .unwrap_or_else(|| self.ctx.params().min_fee.saturating_mul(2))
    }
}
