//! Transfer audit record
//!
//! A transfer is created `Pending`, reaches a terminal status before the
//! orchestration call returns, and is never mutated afterwards except for
//! the notification flag and the post-hoc reversal path on `reject`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::error::TransferError;
use super::status::TransferStatus;
use crate::core_types::{AccountId, TransferId};

/// One fund movement between two accounts
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Transfer {
    /// 0 until assigned by the transfer store on insert
    id: TransferId,
    amount: Decimal,
    payer: AccountId,
    payee: AccountId,
    status: TransferStatus,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    externally_authorized: bool,
    notification_sent: bool,
}

impl Transfer {
    /// Create a pending transfer intent
    ///
    /// The id is assigned by the transfer store when the record is
    /// first persisted.
    pub fn new(amount: Decimal, payer: AccountId, payee: AccountId) -> Self {
        Self {
            id: 0,
            amount,
            payer,
            payee,
            status: TransferStatus::Pending,
            created_at: Utc::now(),
            error_message: None,
            externally_authorized: false,
            notification_sent: false,
        }
    }

    pub fn id(&self) -> TransferId {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payer(&self) -> AccountId {
        self.payer
    }

    pub fn payee(&self) -> AccountId {
        self.payee
    }

    pub fn status(&self) -> TransferStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn externally_authorized(&self) -> bool {
        self.externally_authorized
    }

    pub fn notification_sent(&self) -> bool {
        self.notification_sent
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransferStatus::Pending
    }

    pub fn is_authorized(&self) -> bool {
        self.status == TransferStatus::Authorized
    }

    pub fn is_rejected(&self) -> bool {
        self.status == TransferStatus::Rejected
    }

    pub fn is_errored(&self) -> bool {
        self.status == TransferStatus::Errored
    }

    /// Commit the transfer: `Pending` -> `Authorized`
    pub fn authorize(&mut self) -> Result<(), TransferError> {
        match self.status {
            TransferStatus::Pending => {
                self.status = TransferStatus::Authorized;
                Ok(())
            }
            other => Err(TransferError::InvalidTransition(format!(
                "cannot authorize a {} transfer",
                other
            ))),
        }
    }

    /// Refuse the transfer: `Pending` -> `Rejected`
    ///
    /// Also callable on an `Authorized` transfer: this models a later
    /// reversal/compliance action, not a normal processing path.
    pub fn reject(&mut self, reason: impl Into<String>) -> Result<(), TransferError> {
        match self.status {
            TransferStatus::Pending | TransferStatus::Authorized => {
                self.status = TransferStatus::Rejected;
                self.error_message = Some(reason.into());
                Ok(())
            }
            other => Err(TransferError::InvalidTransition(format!(
                "cannot reject a {} transfer",
                other
            ))),
        }
    }

    /// Record a system failure: `Pending` -> `Errored`
    pub fn mark_errored(&mut self, message: impl Into<String>) -> Result<(), TransferError> {
        match self.status {
            TransferStatus::Pending => {
                self.status = TransferStatus::Errored;
                self.error_message = Some(message.into());
                Ok(())
            }
            other => Err(TransferError::InvalidTransition(format!(
                "cannot mark a {} transfer as errored",
                other
            ))),
        }
    }

    /// Record the external gate's approval
    pub fn mark_externally_authorized(&mut self) {
        self.externally_authorized = true;
    }

    /// Record a delivered notification
    pub fn mark_notification_sent(&mut self) {
        self.notification_sent = true;
    }

    pub(crate) fn assign_id(&mut self, id: TransferId) {
        self.id = id;
    }
}
