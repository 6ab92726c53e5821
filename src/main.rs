//! Payflow - P2P money transfer service
//!
//! Entry point: loads configuration, initializes logging, seeds demo
//! data on an empty store, wires the transfer core and serves the
//! HTTP gateway.

use std::sync::Arc;
use std::time::Duration;

use payflow::config::AppConfig;
use payflow::gateway::{self, state::AppState};
use payflow::seed::seed_demo_data;
use payflow::store::{AccountStore, BalanceStore, MemoryStore, TransferStore};
use payflow::transfer::{
    AuthorizationGate, HttpAuthorizationGate, HttpNotifier, NoopNotifier, Notifier,
    StaticAuthorizationGate, TransferOrchestrator,
};

/// Get the deployment environment from command line (--env/-e argument)
fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load_or_default(&env);
    let _log_guard = payflow::logging::init_logging(&config);

    tracing::info!("Starting payflow in {} mode", env);

    let store = Arc::new(MemoryStore::new());
    let accounts: Arc<dyn AccountStore> = store.clone();
    let balances: Arc<dyn BalanceStore> = store.clone();
    let transfers: Arc<dyn TransferStore> = store.clone();

    if config.seed_demo_data {
        seed_demo_data(accounts.as_ref(), balances.as_ref()).await?;
    }

    let gate: Arc<dyn AuthorizationGate> = match &config.authorizer.url {
        Some(url) => {
            tracing::info!(url = %url, "Using HTTP authorization gate");
            Arc::new(HttpAuthorizationGate::new(
                url.clone(),
                Duration::from_millis(config.authorizer.timeout_ms),
            )?)
        }
        None => {
            tracing::warn!("No authorizer configured - every transfer will be allowed");
            Arc::new(StaticAuthorizationGate::allow_all())
        }
    };

    let notifier: Arc<dyn Notifier> = match &config.notifier.url {
        Some(url) => {
            tracing::info!(url = %url, "Using HTTP notifier");
            Arc::new(HttpNotifier::new(
                url.clone(),
                Duration::from_millis(config.notifier.timeout_ms),
            )?)
        }
        None => Arc::new(NoopNotifier),
    };

    let orchestrator = Arc::new(TransferOrchestrator::new(
        accounts.clone(),
        balances.clone(),
        transfers.clone(),
        gate,
        notifier,
    ));

    let state = Arc::new(AppState::new(orchestrator, accounts, balances, transfers));

    gateway::run_server(&config.gateway, state).await
}
