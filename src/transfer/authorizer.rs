//! Authorization Gate
//!
//! The external check consulted once per transfer before funds move.
//! Injected as a capability so the orchestrator never knows whether it is
//! talking to the real network service or a deterministic stand-in.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core_types::AccountId;

/// Outcome of a reachable authorization call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Deny,
}

/// Gate transport failures
///
/// Both variants map to `AuthorizationTimeout` in the transfer taxonomy;
/// an unreachable gate must never silently allow funds to move.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("authorization service timed out")]
    Timeout,
    #[error("authorization service unreachable: {0}")]
    Unreachable(String),
}

/// External authorization check, one call per transfer
#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    async fn authorize(
        &self,
        payer: AccountId,
        payee: AccountId,
        amount: Decimal,
    ) -> Result<AuthDecision, GateError>;
}

// ============================================================================
// HTTP client variant
// ============================================================================

#[derive(Debug, Serialize)]
struct AuthorizeRequest {
    payer: AccountId,
    payee: AccountId,
    amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    authorized: bool,
}

/// Gate backed by a real HTTP service
///
/// POSTs `{payer, payee, amount}` and expects `{"authorized": bool}`.
/// The whole call is bounded by the configured timeout so balance locks
/// can never be held indefinitely behind a slow authorizer.
pub struct HttpAuthorizationGate {
    client: reqwest::Client,
    url: String,
}

impl HttpAuthorizationGate {
    pub fn new(url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AuthorizationGate for HttpAuthorizationGate {
    async fn authorize(
        &self,
        payer: AccountId,
        payee: AccountId,
        amount: Decimal,
    ) -> Result<AuthDecision, GateError> {
        let body = AuthorizeRequest {
            payer,
            payee,
            amount,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GateError::Timeout
                } else {
                    GateError::Unreachable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GateError::Unreachable(format!(
                "authorizer returned HTTP {}",
                response.status()
            )));
        }

        let parsed: AuthorizeResponse = response
            .json()
            .await
            .map_err(|e| GateError::Unreachable(format!("malformed authorizer response: {}", e)))?;

        debug!(payer, payee, %amount, authorized = parsed.authorized, "authorizer decision");
        if parsed.authorized {
            Ok(AuthDecision::Allow)
        } else {
            Ok(AuthDecision::Deny)
        }
    }
}

// ============================================================================
// Deterministic in-process variant
// ============================================================================

/// Configured behavior for [`StaticAuthorizationGate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateBehavior {
    Allow,
    Deny,
    TimeOut,
}

/// Deterministic gate with no network dependency
///
/// The default for deployments without an authorizer URL (always allows,
/// like the original hand-rolled stub) and the double used in tests.
pub struct StaticAuthorizationGate {
    behavior: Mutex<GateBehavior>,
    calls: AtomicUsize,
}

impl StaticAuthorizationGate {
    pub fn allow_all() -> Self {
        Self::with_behavior(GateBehavior::Allow)
    }

    pub fn deny_all() -> Self {
        Self::with_behavior(GateBehavior::Deny)
    }

    pub fn timing_out() -> Self {
        Self::with_behavior(GateBehavior::TimeOut)
    }

    pub fn with_behavior(behavior: GateBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_behavior(&self, behavior: GateBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    /// Number of authorization calls made through this gate
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorizationGate for StaticAuthorizationGate {
    async fn authorize(
        &self,
        _payer: AccountId,
        _payee: AccountId,
        _amount: Decimal,
    ) -> Result<AuthDecision, GateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match *self.behavior.lock().unwrap() {
            GateBehavior::Allow => Ok(AuthDecision::Allow),
            GateBehavior::Deny => Ok(AuthDecision::Deny),
            GateBehavior::TimeOut => Err(GateError::Timeout),
        }
    }
}
