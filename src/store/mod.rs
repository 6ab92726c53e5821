//! Store ports - persistence abstraction
//!
//! The core depends only on these contracts, never on a storage
//! technology. Adapters provide the actual data access; the in-memory
//! adapter in [`memory`] is the one shipped with the service.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::account::{Account, NewAccount};
use crate::balance::Balance;
use crate::core_types::{AccountId, TransferId};
use crate::transfer::Transfer;

/// Store-level failures
///
/// Everything here is fatal from the orchestrator's point of view;
/// business rejections never originate in a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    Constraint(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("record not found: {0}")]
    Missing(String),
    #[error("storage failure: {0}")]
    Backend(String),
}

/// Account holder records
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by id
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Onboard a new account, assigning its id
    ///
    /// Fails with `Constraint` when the tax id or email is already taken,
    /// and with `InvalidRecord` when field validation fails.
    async fn create(&self, draft: NewAccount) -> Result<Account, StoreError>;

    /// Number of onboarded accounts
    async fn count(&self) -> Result<usize, StoreError>;
}

/// One balance per account holder
#[async_trait]
pub trait BalanceStore: Send + Sync {
    /// Look up the balance owned by an account
    async fn find_by_owner(&self, owner: AccountId) -> Result<Option<Balance>, StoreError>;

    /// Persist a balance (insert or replace by owner)
    async fn save(&self, balance: &Balance) -> Result<(), StoreError>;
}

/// Append-only transfer audit records
#[async_trait]
pub trait TransferStore: Send + Sync {
    /// Persist a new transfer record, assigning its id
    async fn insert(&self, transfer: Transfer) -> Result<Transfer, StoreError>;

    /// Re-persist an already inserted record (e.g. notification flag)
    async fn update(&self, transfer: &Transfer) -> Result<(), StoreError>;

    /// Look up a transfer by id
    async fn find_by_id(&self, id: TransferId) -> Result<Option<Transfer>, StoreError>;
}
