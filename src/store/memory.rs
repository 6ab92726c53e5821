//! In-memory store adapter
//!
//! Backs all three store ports with `DashMap`s. Uniqueness of tax id and
//! email is enforced through index maps whose entry API makes the
//! reservation atomic. Ids are assigned from atomic counters starting at 1.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use validator::Validate;

use super::{AccountStore, BalanceStore, StoreError, TransferStore};
use crate::account::{Account, NewAccount};
use crate::balance::Balance;
use crate::core_types::{AccountId, TransferId};
use crate::transfer::Transfer;

/// Process-local store for accounts, balances and transfers
#[derive(Default)]
pub struct MemoryStore {
    accounts: DashMap<AccountId, Account>,
    balances: DashMap<AccountId, Balance>,
    transfers: DashMap<TransferId, Transfer>,
    // Uniqueness indexes: value -> owning account id
    tax_ids: DashMap<String, AccountId>,
    emails: DashMap<String, AccountId>,
    account_id_gen: AtomicU64,
    transfer_id_gen: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            balances: DashMap::new(),
            transfers: DashMap::new(),
            tax_ids: DashMap::new(),
            emails: DashMap::new(),
            account_id_gen: AtomicU64::new(0),
            transfer_id_gen: AtomicU64::new(0),
        }
    }

    /// Reserve `value` in a uniqueness index for `id`
    fn reserve(
        index: &DashMap<String, AccountId>,
        value: &str,
        id: AccountId,
        what: &str,
    ) -> Result<(), StoreError> {
        match index.entry(value.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Constraint(format!(
                "{} '{}' is already registered",
                what, value
            ))),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn create(&self, draft: NewAccount) -> Result<Account, StoreError> {
        draft
            .validate()
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;

        let id = self.account_id_gen.fetch_add(1, Ordering::SeqCst) + 1;

        Self::reserve(&self.tax_ids, &draft.tax_id, id, "tax id")?;
        if let Err(e) = Self::reserve(&self.emails, &draft.email, id, "email") {
            // Roll back the tax id reservation taken above
            self.tax_ids.remove(&draft.tax_id);
            return Err(e);
        }

        let account = Account::new(id, draft);
        self.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.accounts.len())
    }
}

#[async_trait]
impl BalanceStore for MemoryStore {
    async fn find_by_owner(&self, owner: AccountId) -> Result<Option<Balance>, StoreError> {
        Ok(self.balances.get(&owner).map(|b| b.clone()))
    }

    async fn save(&self, balance: &Balance) -> Result<(), StoreError> {
        self.balances.insert(balance.owner(), balance.clone());
        Ok(())
    }
}

#[async_trait]
impl TransferStore for MemoryStore {
    async fn insert(&self, mut transfer: Transfer) -> Result<Transfer, StoreError> {
        let id = self.transfer_id_gen.fetch_add(1, Ordering::SeqCst) + 1;
        transfer.assign_id(id);
        self.transfers.insert(id, transfer.clone());
        Ok(transfer)
    }

    async fn update(&self, transfer: &Transfer) -> Result<(), StoreError> {
        match self.transfers.entry(transfer.id()) {
            Entry::Occupied(mut slot) => {
                slot.insert(transfer.clone());
                Ok(())
            }
            Entry::Vacant(_) => Err(StoreError::Missing(format!(
                "transfer {} was never inserted",
                transfer.id()
            ))),
        }
    }

    async fn find_by_id(&self, id: TransferId) -> Result<Option<Transfer>, StoreError> {
        Ok(self.transfers.get(&id).map(|t| t.clone()))
    }
}
