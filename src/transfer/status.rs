//! Transfer Status Definitions
//!
//! Status names are serialized as SCREAMING_SNAKE_CASE strings in the
//! audit record and over the API.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Transfer lifecycle status
///
/// Terminal states: AUTHORIZED, REJECTED, ERRORED.
/// The one sanctioned exit from a terminal state is
/// [`Transfer::reject`](super::Transfer::reject) on an AUTHORIZED
/// transfer, the post-hoc reversal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    /// Initial state - intent accepted, funds not yet moved
    Pending,
    /// Terminal: funds moved and record committed
    Authorized,
    /// Terminal: refused by a business rule or the external gate
    Rejected,
    /// Terminal: a system failure interrupted processing
    Errored,
}

impl TransferStatus {
    /// Check if this is a terminal state (no more transitions expected)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransferStatus::Pending)
    }

    /// Get human-readable status name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "PENDING",
            TransferStatus::Authorized => "AUTHORIZED",
            TransferStatus::Rejected => "REJECTED",
            TransferStatus::Errored => "ERRORED",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!TransferStatus::Pending.is_terminal());
        assert!(TransferStatus::Authorized.is_terminal());
        assert!(TransferStatus::Rejected.is_terminal());
        assert!(TransferStatus::Errored.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(TransferStatus::Pending.to_string(), "PENDING");
        assert_eq!(TransferStatus::Authorized.to_string(), "AUTHORIZED");
        assert_eq!(TransferStatus::Rejected.to_string(), "REJECTED");
        assert_eq!(TransferStatus::Errored.to_string(), "ERRORED");
    }

    #[test]
    fn test_serde_screaming_case() {
        let json = serde_json::to_string(&TransferStatus::Authorized).unwrap();
        assert_eq!(json, r#""AUTHORIZED""#);
        let back: TransferStatus = serde_json::from_str(r#""ERRORED""#).unwrap();
        assert_eq!(back, TransferStatus::Errored);
    }
}
