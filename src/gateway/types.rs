//! Gateway types - API boundary enforcement
//!
//! - [`StrictDecimal`]: format-validated amount at the Serde layer
//! - [`TransferIntent`]: transfer submission DTO
//! - [`ApiResponse`], [`ApiError`]: unified response envelope

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::core_types::AccountId;
use crate::transfer::TransferError;

// ============================================================================
// StrictDecimal: Format-Validated Decimal at Serde Layer
// ============================================================================

/// Strict format Decimal - validates format during deserialization
///
/// Accepts a JSON string or number. String input additionally rejects:
/// - `.5` (must be `0.5`) and `5.` (must be `5.0` or `5`)
/// - empty strings, `+` prefixes, scientific notation
///
/// Negative amounts are rejected in both forms. Business validation
/// (positivity, 2-decimal scale) happens in the orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct StrictDecimal(Decimal);

impl StrictDecimal {
    /// Get the inner Decimal value
    pub fn inner(self) -> Decimal {
        self.0
    }

    #[cfg(test)]
    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }
}

impl<'de> Deserialize<'de> for StrictDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DecimalOrString {
            String(String),
            Number(Decimal),
        }

        match DecimalOrString::deserialize(deserializer)? {
            DecimalOrString::String(s) => {
                if s.is_empty() {
                    return Err(D::Error::custom("Amount cannot be empty"));
                }
                if s.starts_with('.') {
                    return Err(D::Error::custom("Invalid format: use 0.5 not .5"));
                }
                if s.ends_with('.') {
                    return Err(D::Error::custom("Invalid format: use 5.0 not 5."));
                }
                if s.contains('e') || s.contains('E') {
                    return Err(D::Error::custom(
                        "Invalid format: scientific notation not allowed",
                    ));
                }
                if s.starts_with('+') {
                    return Err(D::Error::custom("Invalid format: + prefix not allowed"));
                }

                let d = Decimal::from_str(&s)
                    .map_err(|e| D::Error::custom(format!("Invalid decimal: {}", e)))?;

                if d.is_sign_negative() {
                    return Err(D::Error::custom("Amount cannot be negative"));
                }

                Ok(StrictDecimal(d))
            }
            DecimalOrString::Number(d) => {
                if d.is_sign_negative() {
                    return Err(D::Error::custom("Amount cannot be negative"));
                }
                Ok(StrictDecimal(d))
            }
        }
    }
}

impl Serialize for StrictDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as string to preserve precision
        serializer.serialize_str(&self.0.to_string())
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Transfer submission (HTTP request deserialization)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TransferIntent {
    /// Amount to move, 2-decimal precision
    #[schema(value_type = String, example = "100.00")]
    pub amount: StrictDecimal,
    /// Account to debit
    #[schema(example = 1)]
    pub payer: AccountId,
    /// Account to credit
    #[schema(example = 2)]
    pub payee: AccountId,
}

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_FUNDS: i32 = 1002;
    pub const INELIGIBLE_PAYER: i32 = 1003;
    pub const NOT_AUTHORIZED: i32 = 1004;

    // Resource errors (4xxx)
    pub const ACCOUNT_NOT_FOUND: i32 = 4001;
    pub const BALANCE_NOT_FOUND: i32 = 4002;
    pub const TRANSFER_NOT_FOUND: i32 = 4003;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const AUTHORIZATION_TIMEOUT: i32 = 5001;
}

// ============================================================================
// ApiError / ApiResult
// ============================================================================

/// Error half of a handler result; renders the error envelope
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

/// Handler result: success envelope or rendered error
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// Create a 200 success response
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            msg,
        )
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::TRANSFER_NOT_FOUND, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }

    /// Convenience for `return ApiError::...(..).into_err()`
    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponse::<()>::error(self.code, self.msg)),
        )
            .into_response()
    }
}

impl From<TransferError> for ApiError {
    fn from(e: TransferError) -> Self {
        let status = StatusCode::from_u16(e.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = match &e {
            TransferError::SelfTransfer | TransferError::InvalidAmount => {
                error_codes::INVALID_PARAMETER
            }
            TransferError::InsufficientFunds => error_codes::INSUFFICIENT_FUNDS,
            TransferError::IneligiblePayer => error_codes::INELIGIBLE_PAYER,
            TransferError::NotAuthorized => error_codes::NOT_AUTHORIZED,
            TransferError::AccountNotFound(_) => error_codes::ACCOUNT_NOT_FOUND,
            TransferError::BalanceNotFound(_) => error_codes::BALANCE_NOT_FOUND,
            TransferError::AuthorizationTimeout => error_codes::AUTHORIZATION_TIMEOUT,
            TransferError::InvalidTransition(_)
            | TransferError::Internal(_)
            | TransferError::Store(_) => error_codes::INTERNAL_ERROR,
        };
        // Never leak internal failure details over the wire
        let msg = if status.is_server_error() && !matches!(e, TransferError::AuthorizationTimeout) {
            "internal server error".to_string()
        } else {
            e.to_string()
        };
        Self::new(status, code, msg)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_decimal_valid_string() {
        let d: StrictDecimal = serde_json::from_str(r#""1.5""#).unwrap();
        assert_eq!(d.inner(), Decimal::from_str("1.5").unwrap());
    }

    #[test]
    fn test_strict_decimal_accepts_json_number() {
        let d: StrictDecimal = serde_json::from_str("100.25").unwrap();
        assert_eq!(d.inner(), Decimal::from_str("100.25").unwrap());
    }

    #[test]
    fn test_strict_decimal_rejects_dot_prefix() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#"".5""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_decimal_rejects_dot_suffix() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#""5.""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_decimal_rejects_negative() {
        assert!(serde_json::from_str::<StrictDecimal>(r#""-1.5""#).is_err());
        assert!(serde_json::from_str::<StrictDecimal>("-1.5").is_err());
    }

    #[test]
    fn test_strict_decimal_rejects_scientific_notation() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#""1.5e8""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_decimal_rejects_empty() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_decimal_serializes_as_string() {
        let d = StrictDecimal::from_decimal(Decimal::from_str("123.45").unwrap());
        assert_eq!(serde_json::to_string(&d).unwrap(), r#""123.45""#);
    }

    #[test]
    fn test_transfer_intent_deserialization() {
        let intent: TransferIntent =
            serde_json::from_str(r#"{"amount": "100.00", "payer": 1, "payee": 2}"#).unwrap();
        assert_eq!(intent.amount.inner(), Decimal::from_str("100.00").unwrap());
        assert_eq!(intent.payer, 1);
        assert_eq!(intent.payee, 2);
    }

    #[test]
    fn test_api_error_mapping() {
        let e = ApiError::from(TransferError::InsufficientFunds);
        assert_eq!(e.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(e.code, error_codes::INSUFFICIENT_FUNDS);

        let e = ApiError::from(TransferError::Internal("secret detail".into()));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.msg, "internal server error");

        let e = ApiError::from(TransferError::AuthorizationTimeout);
        assert_eq!(e.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(e.code, error_codes::AUTHORIZATION_TIMEOUT);
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_string(&ApiResponse::success(42)).unwrap();
        assert_eq!(json, r#"{"code":0,"msg":"ok","data":42}"#);
    }
}
