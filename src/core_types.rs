//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and enable future type evolution.

/// Account ID - globally unique, immutable after assignment.
///
/// # Usage:
/// - Primary key for account holders
/// - Balances and transfers reference accounts by this id only,
///   never by shared object references
pub type AccountId = u64;

/// Transfer ID - unique within the system, assigned by the transfer store
pub type TransferId = u64;
