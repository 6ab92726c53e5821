//! ENFORCED BALANCE TYPE
//!
//! This is the SINGLE source of truth for balance mutations.
//! ALL fund movements MUST go through `debit` / `credit`.
//!
//! # Enforcement Strategy:
//! 1. The amount field is PRIVATE - no direct access
//! 2. All mutations return Result - errors are explicit
//! 3. Mutations re-validate the non-negative invariant; a rejected
//!    mutation leaves the balance unchanged
//! 4. `updated_at` refreshes on every successful mutation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::core_types::AccountId;

/// Balance mutation failures
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BalanceError {
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("amount must be positive")]
    InvalidAmount,
}

/// Funds held by a single account
///
/// # Invariants (ENFORCED by the private field):
/// - amount >= 0 at all times, checked after every mutation
/// - exactly one balance per owner (enforced by the balance store)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    owner: AccountId,
    amount: Decimal, // PRIVATE - ONLY modified through debit/credit
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Balance {
    /// Create an empty balance for an account
    pub fn new(owner: AccountId) -> Self {
        Self::with_opening(owner, Decimal::ZERO)
    }

    /// Create a balance with an opening amount
    ///
    /// Negative opening amounts are clamped to zero; the invariant holds
    /// from the first instant of the balance's life.
    pub fn with_opening(owner: AccountId, opening: Decimal) -> Self {
        let now = Utc::now();
        Self {
            owner,
            amount: opening.max(Decimal::ZERO),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True iff the current amount covers `amount`. No side effect.
    pub fn has_sufficient_funds(&self, amount: Decimal) -> bool {
        self.amount >= amount
    }

    /// Subtract `amount` from the balance
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `amount` exceeds the current amount
    ///
    /// The balance is unchanged on error.
    pub fn debit(&mut self, amount: Decimal) -> Result<(), BalanceError> {
        if amount <= Decimal::ZERO {
            return Err(BalanceError::InvalidAmount);
        }
        if !self.has_sufficient_funds(amount) {
            return Err(BalanceError::InsufficientFunds);
        }
        self.amount -= amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Add `amount` to the balance
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount <= 0`
    ///
    /// The balance is unchanged on error.
    pub fn credit(&mut self, amount: Decimal) -> Result<(), BalanceError> {
        if amount <= Decimal::ZERO {
            return Err(BalanceError::InvalidAmount);
        }
        self.amount += amount;
        self.updated_at = Utc::now();
        Ok(())
    }
}
