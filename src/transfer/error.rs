//! Transfer Error Types
//!
//! The full failure taxonomy of the orchestration. Everything except
//! `Internal`, `InvalidTransition` and `Store` is a business rejection
//! the caller can recover from.

use thiserror::Error;

use crate::balance::BalanceError;
use crate::store::StoreError;

/// Which side of the transfer a not-found error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Payer,
    Payee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Payer => "payer",
            Role::Payee => "payee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transfer failure taxonomy
#[derive(Debug, Error)]
pub enum TransferError {
    // === Validation / business rejections ===
    #[error("{0} account not found")]
    AccountNotFound(Role),

    #[error("merchant accounts may only receive funds, never send them")]
    IneligiblePayer,

    #[error("payer and payee must be different accounts")]
    SelfTransfer,

    #[error("{0} has no balance record")]
    BalanceNotFound(Role),

    #[error("insufficient balance for transfer")]
    InsufficientFunds,

    #[error("transfer amount must be positive with at most 2 decimal places")]
    InvalidAmount,

    // === External authorization ===
    #[error("transfer was not authorized by the external service")]
    NotAuthorized,

    #[error("external authorization service timed out or was unreachable")]
    AuthorizationTimeout,

    // === System errors ===
    #[error("invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("transfer failed irrecoverably: {0}")]
    Internal(String),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            TransferError::IneligiblePayer => "INELIGIBLE_PAYER",
            TransferError::SelfTransfer => "SELF_TRANSFER",
            TransferError::BalanceNotFound(_) => "BALANCE_NOT_FOUND",
            TransferError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::NotAuthorized => "NOT_AUTHORIZED",
            TransferError::AuthorizationTimeout => "AUTHORIZATION_TIMEOUT",
            TransferError::InvalidTransition(_) => "INVALID_TRANSITION",
            TransferError::Internal(_) => "INTERNAL_ERROR",
            TransferError::Store(_) => "STORE_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::SelfTransfer | TransferError::InvalidAmount => 400,
            TransferError::AccountNotFound(_) | TransferError::BalanceNotFound(_) => 404,
            TransferError::IneligiblePayer
            | TransferError::InsufficientFunds
            | TransferError::NotAuthorized => 422,
            TransferError::AuthorizationTimeout => 503,
            TransferError::InvalidTransition(_)
            | TransferError::Internal(_)
            | TransferError::Store(_) => 500,
        }
    }

    /// True for failures the caller can act on (vs. system faults)
    pub fn is_business_rejection(&self) -> bool {
        self.http_status() < 500 || matches!(self, TransferError::AuthorizationTimeout)
    }
}

impl From<BalanceError> for TransferError {
    fn from(e: BalanceError) -> Self {
        match e {
            BalanceError::InsufficientFunds => TransferError::InsufficientFunds,
            BalanceError::InvalidAmount => TransferError::InvalidAmount,
        }
    }
}
