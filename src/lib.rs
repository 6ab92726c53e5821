//! Payflow - Peer-to-Peer Money Transfer Engine
//!
//! Validates a transfer intent, consults an external authorization gate,
//! atomically moves funds between two balances and persists an auditable
//! transfer record.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (AccountId, TransferId)
//! - [`account`] - Account holder model (personal / merchant)
//! - [`balance`] - Enforced balance type
//! - [`store`] - Persistence ports + in-memory adapter
//! - [`transfer`] - Transfer core: orchestrator, state machine, gate, notifier
//! - [`gateway`] - HTTP API wrapper (axum)
//! - [`seed`] - Demo data bootstrap
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing setup

// Core types - must be first!
pub mod core_types;

// Domain
pub mod account;
pub mod balance;
pub mod store;
pub mod transfer;

// Service wiring
pub mod config;
pub mod gateway;
pub mod logging;
pub mod seed;

// Convenient re-exports at crate root
pub use account::{Account, AccountKind, NewAccount};
pub use balance::{Balance, BalanceError};
pub use core_types::{AccountId, TransferId};
pub use store::{AccountStore, BalanceStore, MemoryStore, StoreError, TransferStore};
pub use transfer::{
    AuthDecision, AuthorizationGate, HttpAuthorizationGate, HttpNotifier, NoopNotifier, Notifier,
    StaticAuthorizationGate, Transfer, TransferError, TransferOrchestrator, TransferStatus,
};
