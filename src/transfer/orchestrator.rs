//! Transfer Orchestrator
//!
//! Drives a transfer intent through validation, external authorization,
//! fund movement and persistence. This is the central component; every
//! failure path and ordering requirement of the transfer flow lives here.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::authorizer::{AuthDecision, AuthorizationGate};
use super::error::{Role, TransferError};
use super::notifier::Notifier;
use super::record::Transfer;
use crate::account::Account;
use crate::balance::Balance;
use crate::core_types::AccountId;
use crate::store::{AccountStore, BalanceStore, TransferStore};

/// Transfer Orchestrator - validates, debits, credits, persists, notifies
///
/// Fund movement (balance resolution through record persistence) runs
/// under per-account async locks taken in ascending account-id order, so
/// two concurrent transfers can never both pass the sufficiency check
/// against a stale amount, and opposite-direction pairs cannot deadlock.
pub struct TransferOrchestrator {
    accounts: Arc<dyn AccountStore>,
    balances: Arc<dyn BalanceStore>,
    transfers: Arc<dyn TransferStore>,
    gate: Arc<dyn AuthorizationGate>,
    notifier: Arc<dyn Notifier>,
    account_locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl TransferOrchestrator {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        balances: Arc<dyn BalanceStore>,
        transfers: Arc<dyn TransferStore>,
        gate: Arc<dyn AuthorizationGate>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            accounts,
            balances,
            transfers,
            gate,
            notifier,
            account_locks: DashMap::new(),
        }
    }

    /// Execute a transfer intent to completion
    ///
    /// Validation failures abort before any mutation and leave no record
    /// behind. Once both balances mutate, the committed record is
    /// persisted before the method returns; notification is best-effort
    /// and runs after the balance locks are released.
    pub async fn execute(
        &self,
        amount: Decimal,
        payer_id: AccountId,
        payee_id: AccountId,
    ) -> Result<Transfer, TransferError> {
        // Re-validate the amount even though the gateway already did:
        // internal callers must not be able to bypass the check.
        if amount <= Decimal::ZERO || amount.normalize().scale() > 2 {
            return Err(TransferError::InvalidAmount);
        }

        // 1-2. Resolve both parties
        let payer = self.resolve_account(payer_id, Role::Payer).await?;
        let payee = self.resolve_account(payee_id, Role::Payee).await?;

        // 3. Merchants may only receive funds
        if payer.is_merchant() {
            return Err(TransferError::IneligiblePayer);
        }

        // 4. A transfer needs two distinct accounts
        if payer.id() == payee.id() {
            return Err(TransferError::SelfTransfer);
        }

        // Exclusive rights over both balances, ascending id order
        let (lock_a, lock_b) = self.lock_pair(payer_id, payee_id);
        let _guard_a = lock_a.lock().await;
        let _guard_b = lock_b.lock().await;

        // 5-6. Payer balance must exist and cover the amount
        let mut payer_balance = self.resolve_balance(payer_id, Role::Payer).await?;
        if !payer_balance.has_sufficient_funds(amount) {
            return Err(TransferError::InsufficientFunds);
        }

        // 7. Payee balance must exist before anything moves
        let mut payee_balance = self.resolve_balance(payee_id, Role::Payee).await?;

        // 8. External authorization, one call, bounded by the gate's timeout
        match self.gate.authorize(payer_id, payee_id, amount).await {
            Ok(AuthDecision::Allow) => {}
            Ok(AuthDecision::Deny) => return Err(TransferError::NotAuthorized),
            Err(e) => {
                warn!(payer = payer_id, payee = payee_id, error = %e, "authorization gate unavailable");
                return Err(TransferError::AuthorizationTimeout);
            }
        }

        // 9. Move the funds. The sufficiency check above ran under the
        // same locks, so a failure here is an invariant violation.
        if let Err(e) = payer_balance.debit(amount) {
            return Err(self
                .abort_errored(amount, payer_id, payee_id, format!("debit failed: {}", e))
                .await);
        }
        if let Err(e) = payee_balance.credit(amount) {
            return Err(self
                .abort_errored(amount, payer_id, payee_id, format!("credit failed: {}", e))
                .await);
        }

        // 10. Persist both balances
        if let Err(e) = self.persist_balances(&payer_balance, &payee_balance).await {
            return Err(self
                .abort_errored(
                    amount,
                    payer_id,
                    payee_id,
                    format!("balance persistence failed: {}", e),
                )
                .await);
        }

        // 11. Persist the committed audit record
        let mut transfer = Transfer::new(amount, payer_id, payee_id);
        transfer.authorize()?;
        transfer.mark_externally_authorized();
        let mut transfer = match self.transfers.insert(transfer).await {
            Ok(t) => t,
            Err(e) => {
                return Err(self
                    .abort_errored(
                        amount,
                        payer_id,
                        payee_id,
                        format!("transfer record persistence failed: {}", e),
                    )
                    .await);
            }
        };

        drop(_guard_b);
        drop(_guard_a);

        info!(
            transfer_id = transfer.id(),
            payer = payer_id,
            payee = payee_id,
            amount = %amount,
            "transfer committed"
        );

        // 12. Best-effort notification, off the critical section
        match self.notifier.notify(&transfer).await {
            Ok(()) => {
                transfer.mark_notification_sent();
                if let Err(e) = self.transfers.update(&transfer).await {
                    warn!(transfer_id = transfer.id(), error = %e, "could not record notification flag");
                }
            }
            Err(e) => {
                warn!(
                    transfer_id = transfer.id(),
                    error = %e,
                    "notification failed; transfer remains authorized"
                );
            }
        }

        Ok(transfer)
    }

    async fn resolve_account(
        &self,
        id: AccountId,
        role: Role,
    ) -> Result<Account, TransferError> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or(TransferError::AccountNotFound(role))
    }

    async fn resolve_balance(
        &self,
        owner: AccountId,
        role: Role,
    ) -> Result<Balance, TransferError> {
        self.balances
            .find_by_owner(owner)
            .await?
            .ok_or(TransferError::BalanceNotFound(role))
    }

    /// Locks for both accounts, ordered by ascending id
    fn lock_pair(&self, a: AccountId, b: AccountId) -> (Arc<Mutex<()>>, Arc<Mutex<()>>) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        (self.lock_for(lo), self.lock_for(hi))
    }

    fn lock_for(&self, id: AccountId) -> Arc<Mutex<()>> {
        self.account_locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn persist_balances(
        &self,
        payer_balance: &Balance,
        payee_balance: &Balance,
    ) -> Result<(), TransferError> {
        self.balances.save(payer_balance).await?;
        self.balances.save(payee_balance).await?;
        Ok(())
    }

    /// Record an invariant violation as an `Errored` transfer, if possible
    async fn abort_errored(
        &self,
        amount: Decimal,
        payer: AccountId,
        payee: AccountId,
        reason: String,
    ) -> TransferError {
        error!(payer, payee, %amount, reason = %reason, "invariant violation during fund movement");

        let mut record = Transfer::new(amount, payer, payee);
        match record.mark_errored(reason.clone()) {
            Ok(()) => {
                if let Err(e) = self.transfers.insert(record).await {
                    error!(error = %e, "could not persist errored transfer record");
                }
            }
            Err(e) => error!(error = %e, "could not mark transfer as errored"),
        }

        TransferError::Internal(reason)
    }
}
