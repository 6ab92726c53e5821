//! Transfer core
//!
//! Validates a transfer intent, consults the external authorization gate,
//! moves funds between two balances and persists the audit record.
//!
//! # State Machine
//!
//! ```text
//! PENDING → AUTHORIZED
//!    ↓          ↓ (post-hoc reversal only)
//! REJECTED ← ───┘
//!    ↓
//! ERRORED  (system failure)
//! ```
//!
//! # Safety Invariants
//!
//! 1. **No record before commit**: validation failures leave no trace
//! 2. **Locked fund movement**: balance resolution through record
//!    persistence runs under both account locks, ascending-id ordered
//! 3. **Bounded gate**: the authorization call carries its own timeout
//!    and an unreachable gate never lets funds move
//! 4. **Best-effort notification**: delivered off-lock, failures swallowed

pub mod authorizer;
pub mod error;
pub mod notifier;
pub mod orchestrator;
pub mod record;
pub mod status;

// Re-exports for convenience
pub use authorizer::{
    AuthDecision, AuthorizationGate, GateBehavior, GateError, HttpAuthorizationGate,
    StaticAuthorizationGate,
};
pub use error::{Role, TransferError};
pub use notifier::{HttpNotifier, NoopNotifier, Notifier, NotifyError, RecordingNotifier};
pub use orchestrator::TransferOrchestrator;
pub use record::Transfer;
pub use status::TransferStatus;
