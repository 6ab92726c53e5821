//! Notifier
//!
//! Fire-and-forget call made after a transfer commits. Failures are the
//! orchestrator's to swallow: a transfer never rolls back, blocks or
//! fails because the payee could not be told about it.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::record::Transfer;
use crate::core_types::TransferId;

/// Notification delivery failures
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification service timed out")]
    Timeout,
    #[error("notification service unreachable: {0}")]
    Unreachable(String),
}

/// Post-commit notification capability
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, transfer: &Transfer) -> Result<(), NotifyError>;
}

// ============================================================================
// HTTP client variant
// ============================================================================

/// Notifier backed by a real HTTP service
///
/// POSTs the committed transfer record as JSON. Any non-2xx answer or
/// transport error is reported to the caller, who discards it.
pub struct HttpNotifier {
    client: reqwest::Client,
    url: String,
}

impl HttpNotifier {
    pub fn new(url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, transfer: &Transfer) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(transfer)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotifyError::Timeout
                } else {
                    NotifyError::Unreachable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(NotifyError::Unreachable(format!(
                "notifier returned HTTP {}",
                response.status()
            )));
        }

        debug!(transfer_id = transfer.id(), "payee notified");
        Ok(())
    }
}

// ============================================================================
// Deterministic in-process variants
// ============================================================================

/// Notifier that does nothing
///
/// Used when no notifier URL is configured.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, transfer: &Transfer) -> Result<(), NotifyError> {
        debug!(transfer_id = transfer.id(), "notification skipped (noop notifier)");
        Ok(())
    }
}

/// Notifier that records every delivery, optionally failing on demand
pub struct RecordingNotifier {
    sent: Mutex<Vec<TransferId>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Ids of transfers successfully notified, in delivery order
    pub fn sent(&self) -> Vec<TransferId> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, transfer: &Transfer) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Unreachable(
                "recording notifier configured to fail".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(transfer.id());
        Ok(())
    }
}
