//! Gateway application state (shared)

use std::sync::Arc;

use crate::store::{AccountStore, BalanceStore, TransferStore};
use crate::transfer::TransferOrchestrator;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Transfer core
    pub orchestrator: Arc<TransferOrchestrator>,
    /// Account lookups (read-only from the gateway's perspective)
    pub accounts: Arc<dyn AccountStore>,
    /// Balance lookups
    pub balances: Arc<dyn BalanceStore>,
    /// Transfer audit lookups
    pub transfers: Arc<dyn TransferStore>,
}

impl AppState {
    pub fn new(
        orchestrator: Arc<TransferOrchestrator>,
        accounts: Arc<dyn AccountStore>,
        balances: Arc<dyn BalanceStore>,
        transfers: Arc<dyn TransferStore>,
    ) -> Self {
        Self {
            orchestrator,
            accounts,
            balances,
            transfers,
        }
    }
}
