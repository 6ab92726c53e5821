//! Account holder model
//!
//! Accounts are immutable after onboarding: every field is set at
//! construction and exposed through read-only accessors. The credential
//! is an opaque secret and is excluded from `Debug` output.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core_types::AccountId;

/// Account kind
///
/// Merchants may only receive funds, never send them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    Personal,
    Merchant,
}

impl AccountKind {
    /// Whether this kind of account may initiate a transfer
    pub fn can_send_funds(&self) -> bool {
        matches!(self, AccountKind::Personal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Personal => "PERSONAL",
            AccountKind::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Onboarding request for a new account
///
/// Field-level validation runs before the store assigns an id. Tax id and
/// email uniqueness are enforced by the account store, not here.
#[derive(Debug, Clone, Validate)]
pub struct NewAccount {
    #[validate(length(min = 1, message = "full name cannot be empty"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "tax id cannot be empty"))]
    pub tax_id: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "credential cannot be empty"))]
    pub credential: String,
    pub kind: AccountKind,
}

/// An onboarded account holder
#[derive(Clone)]
pub struct Account {
    id: AccountId,
    full_name: String,
    tax_id: String,
    email: String,
    // Opaque secret - never logged, never serialized
    credential: String,
    kind: AccountKind,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Build an account from an onboarding request and a store-assigned id
    pub fn new(id: AccountId, draft: NewAccount) -> Self {
        Self {
            id,
            full_name: draft.full_name,
            tax_id: draft.tax_id,
            email: draft.email,
            credential: draft.credential,
            kind: draft.kind,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn is_merchant(&self) -> bool {
        self.kind == AccountKind::Merchant
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Constant-time-irrelevant credential check for future login flows.
    /// Exposed instead of the raw credential so callers cannot leak it.
    pub fn credential_matches(&self, candidate: &str) -> bool {
        self.credential == candidate
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("full_name", &self.full_name)
            .field("tax_id", &self.tax_id)
            .field("email", &self.email)
            .field("credential", &"<redacted>")
            .field("kind", &self.kind)
            .field("created_at", &self.created_at)
            .finish()
    }
}
