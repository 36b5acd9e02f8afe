// ledger/src/adapters/memory.rs
use crate::{
    Account, Address, Asset, AssetId, GroupReceipt, Holding, LedgerAdapter, LedgerError,
    LedgerParams, Operation, Transaction, TransactionGroup,
};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, LedgerError> {
    mutex
        .lock()
        .map_err(|_| LedgerError::Storage("ledger state lock poisoned".to_string()))
}

#[derive(Debug, Clone)]
struct LedgerState {
    accounts: HashMap<Address, Account>,
    assets: HashMap<AssetId, Asset>,
    next_asset_id: AssetId,
}

impl LedgerState {
    fn new(params: &LedgerParams) -> Self {
        Self {
            accounts: HashMap::new(),
            assets: HashMap::new(),
            next_asset_id: params.first_asset_id,
        }
    }

    fn account_mut(&mut self, address: Address) -> &mut Account {
        self.accounts
            .entry(address)
            .or_insert_with(|| Account::new(address))
    }

    fn holding(&self, address: &Address, asset_id: AssetId) -> Option<Holding> {
        self.accounts
            .get(address)
            .and_then(|account| account.holding(asset_id))
            .copied()
    }

    fn debit(&mut self, address: Address, amount: u64) -> Result<(), LedgerError> {
        let account = self.account_mut(address);
        if account.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                address,
                required: amount,
                available: account.balance,
            });
        }
        account.balance -= amount;
        Ok(())
    }

    fn apply_group(
        &mut self,
        group: &TransactionGroup,
        params: &LedgerParams,
    ) -> Result<GroupReceipt, LedgerError> {
        if group.is_empty() {
            return Err(LedgerError::EmptyGroup);
        }
        if group.len() > params.max_group_size {
            return Err(LedgerError::GroupTooLarge {
                len: group.len(),
                max: params.max_group_size,
            });
        }

        let required = params
            .min_fee
            .saturating_mul(group.transaction_count() as u64);
        let provided = group.total_fees();
        if provided < required {
            return Err(LedgerError::FeeTooLow { required, provided });
        }

        let mut receipt = GroupReceipt::new(Uuid::now_v7());
        let mut touched = BTreeSet::new();

        for op in group.operations() {
            self.apply(op, None, params, &mut receipt, &mut touched)?;
        }

        // Minimum balance is checked once the whole group has been applied
        for address in touched {
            if let Some(account) = self.accounts.get(&address) {
                let required = account.min_balance(params);
                if account.balance < required {
                    return Err(LedgerError::InsufficientBalance {
                        address,
                        required,
                        available: account.balance,
                    });
                }
            }
        }

        Ok(receipt)
    }

    fn apply(
        &mut self,
        op: &Operation,
        parent_app: Option<u64>,
        params: &LedgerParams,
        receipt: &mut GroupReceipt,
        touched: &mut BTreeSet<Address>,
    ) -> Result<(), LedgerError> {
        let sender = op.sender();

        if let Some(app_id) = parent_app {
            if matches!(op, Operation::AppCall { .. }) {
                return Err(LedgerError::InvalidInnerTransaction(
                    "nested application calls are not supported".to_string(),
                ));
            }
            if sender != Address::for_application(app_id) {
                return Err(LedgerError::InvalidInnerTransaction(format!(
                    "sender {} is not the escrow of application {}",
                    sender, app_id
                )));
            }
        }

        tracing::debug!(kind = ?op.kind(), sender = %sender, inner = parent_app.is_some(), "applying operation");

        // Inner senders are application escrows, which exist implicitly
        if parent_app.is_none() && !self.accounts.contains_key(&sender) {
            return Err(LedgerError::AccountNotFound(sender));
        }

        touched.insert(sender);
        self.debit(sender, op.fee())?;

        let mut created_asset = None;

        match op {
            Operation::Payment {
                receiver, amount, ..
            } => {
                self.debit(sender, *amount)?;
                let account = self.account_mut(*receiver);
                account.balance = account.balance.saturating_add(*amount);
                touched.insert(*receiver);
            }
            Operation::AssetCreate {
                params: asset_params,
                ..
            } => {
                asset_params.validate()?;

                let asset_id = self.next_asset_id;
                self.next_asset_id = asset_id
                    .checked_add(1)
                    .ok_or(LedgerError::AssetIdsExhausted)?;

                let total = asset_params.total;
                self.assets
                    .insert(asset_id, Asset::new(asset_id, sender, asset_params.clone()));

                let creator = self.account_mut(sender);
                creator.total_assets_created += 1;
                creator
                    .holdings
                    .insert(asset_id, Holding::new(asset_id, total, false));

                created_asset = Some(asset_id);
            }
            Operation::AssetOptIn { asset_id, .. } => {
                let frozen = self
                    .assets
                    .get(asset_id)
                    .ok_or(LedgerError::AssetNotFound(*asset_id))?
                    .params
                    .default_frozen;

                self.account_mut(sender)
                    .holdings
                    .entry(*asset_id)
                    .or_insert_with(|| Holding::new(*asset_id, 0, frozen));
            }
            Operation::AssetTransfer {
                receiver,
                asset_id,
                amount,
                clawback_target,
                ..
            } => {
                self.transfer(sender, *receiver, *asset_id, *amount, *clawback_target)?;
                touched.insert(*receiver);
                if let Some(target) = clawback_target {
                    touched.insert(*target);
                }
            }
            Operation::AppCall { inner, .. } => {
                if inner.len() > params.max_inner_transactions {
                    return Err(LedgerError::InvalidInnerTransaction(format!(
                        "{} inner transactions exceed the limit of {}",
                        inner.len(),
                        params.max_inner_transactions
                    )));
                }
            }
        }

        receipt.push(Transaction::new(
            receipt.group,
            sender,
            op.kind(),
            op.fee(),
            created_asset,
            parent_app.is_some(),
        ));

        if let Operation::AppCall { app_id, inner, .. } = op {
            for inner_op in inner {
                self.apply(inner_op, Some(*app_id), params, receipt, touched)?;
            }
        }

        Ok(())
    }

    fn transfer(
        &mut self,
        sender: Address,
        receiver: Address,
        asset_id: AssetId,
        amount: u64,
        clawback_target: Option<Address>,
    ) -> Result<(), LedgerError> {
        let asset = self
            .assets
            .get(&asset_id)
            .ok_or(LedgerError::AssetNotFound(asset_id))?;

        let source = match clawback_target {
            Some(target) => {
                if asset.params.clawback != Some(sender) {
                    return Err(LedgerError::UnauthorizedClawback { sender, asset_id });
                }
                target
            }
            None => sender,
        };

        let receiver_holding = self
            .holding(&receiver, asset_id)
            .ok_or(LedgerError::NotOptedIn {
                address: receiver,
                asset_id,
            })?;
        let source_holding = self
            .holding(&source, asset_id)
            .ok_or(LedgerError::NotOptedIn {
                address: source,
                asset_id,
            })?;

        // Clawback ignores freezes
        if clawback_target.is_none() {
            for (address, holding) in [(source, source_holding), (receiver, receiver_holding)] {
                if holding.frozen {
                    return Err(LedgerError::AssetFrozen { address, asset_id });
                }
            }
        }

        if source_holding.amount < amount {
            return Err(LedgerError::InsufficientHolding {
                address: source,
                asset_id,
                required: amount,
                available: source_holding.amount,
            });
        }

        if source == receiver {
            return Ok(());
        }

        if let Some(holding) = self
            .accounts
            .get_mut(&source)
            .and_then(|account| account.holdings.get_mut(&asset_id))
        {
            holding.amount -= amount;
        }
        if let Some(holding) = self
            .accounts
            .get_mut(&receiver)
            .and_then(|account| account.holdings.get_mut(&asset_id))
        {
            holding.amount += amount;
        }

        Ok(())
    }
}

#[derive(Clone)]
struct MemoryStore {
    state: Arc<Mutex<LedgerState>>,
    transactions: Arc<Mutex<HashMap<Uuid, Transaction>>>,
}

impl MemoryStore {
    fn new(params: &LedgerParams) -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState::new(params))),
            transactions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

/// In-memory host ledger.
///
/// Groups are applied to a staged copy of the state which replaces the live
/// state only when every operation succeeded.
pub struct MemoryAdapter {
    store: MemoryStore,
    params: LedgerParams,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::with_params(LedgerParams::default())
    }

    pub fn with_params(params: LedgerParams) -> Self {
        Self {
            store: MemoryStore::new(&params),
            params,
        }
    }

    /// Credit native balance to an account, creating it if needed.
    pub fn fund(&self, address: Address, amount: u64) -> Result<(), LedgerError> {
        let mut state = lock(&self.store.state)?;
        let account = state.account_mut(address);
        account.balance = account.balance.saturating_add(amount);
        Ok(())
    }

    /// Number of assets created so far.
    pub fn asset_count(&self) -> Result<usize, LedgerError> {
        Ok(lock(&self.store.state)?.assets.len())
    }
}

#[async_trait]
impl LedgerAdapter for MemoryAdapter {
    async fn execute_group(&self, group: &TransactionGroup) -> Result<GroupReceipt, LedgerError> {
        let mut state = lock(&self.store.state)?;

        let mut staged = state.clone();
        let receipt = staged.apply_group(group, &self.params)?;
        *state = staged;
        drop(state);

        let mut txs = lock(&self.store.transactions)?;
        for transaction in &receipt.transactions {
            txs.insert(transaction.id, transaction.clone());
        }

        Ok(receipt)
    }

    async fn get_asset(&self, asset_id: AssetId) -> Result<Asset, LedgerError> {
        let state = lock(&self.store.state)?;
        state
            .assets
            .get(&asset_id)
            .cloned()
            .ok_or(LedgerError::AssetNotFound(asset_id))
    }

    async fn get_account(&self, address: &Address) -> Result<Account, LedgerError> {
        let state = lock(&self.store.state)?;
        state
            .accounts
            .get(address)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(*address))
    }

    async fn get_holding(
        &self,
        address: &Address,
        asset_id: AssetId,
    ) -> Result<Holding, LedgerError> {
        let state = lock(&self.store.state)?;
        state.holding(address, asset_id).ok_or(LedgerError::NotOptedIn {
            address: *address,
            asset_id,
        })
    }

    async fn get_transaction(&self, tx_id: Uuid) -> Result<Transaction, LedgerError> {
        let txs = lock(&self.store.transactions)?;
        txs.get(&tx_id)
            .cloned()
            .ok_or(LedgerError::TransactionNotFound(tx_id))
    }

    fn params(&self) -> &LedgerParams {
        &self.params
    }
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}
