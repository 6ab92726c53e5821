//! Gateway handlers
//!
//! Thin wrappers over the transfer core: deserialize, delegate, map the
//! outcome onto the response envelope. No business rule lives here.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::state::AppState;
use super::types::{ApiError, ApiResult, TransferIntent, error_codes, ok};
use crate::core_types::{AccountId, TransferId};
use crate::transfer::Transfer;

/// Submit a transfer
///
/// POST /api/v1/transfer
#[utoipa::path(
    post,
    path = "/api/v1/transfer",
    request_body = TransferIntent,
    responses(
        (status = 200, description = "Transfer committed", body = Transfer, content_type = "application/json"),
        (status = 400, description = "Malformed amount or same payer/payee"),
        (status = 404, description = "Payer or payee unknown"),
        (status = 422, description = "Business rejection (merchant payer, insufficient funds, not authorized)"),
        (status = 503, description = "Authorization service unavailable")
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransferIntent>,
) -> ApiResult<Transfer> {
    match state
        .orchestrator
        .execute(req.amount.inner(), req.payer, req.payee)
        .await
    {
        Ok(transfer) => ok(transfer),
        Err(e) => {
            if e.is_business_rejection() {
                tracing::info!(payer = req.payer, payee = req.payee, error = %e, "transfer rejected");
            } else {
                tracing::error!(payer = req.payer, payee = req.payee, error = %e, "transfer failed");
            }
            ApiError::from(e).into_err()
        }
    }
}

/// Look up a transfer audit record
///
/// GET /api/v1/transfer/{id}
#[utoipa::path(
    get,
    path = "/api/v1/transfer/{id}",
    params(
        ("id" = u64, Path, description = "Transfer id")
    ),
    responses(
        (status = 200, description = "Transfer record", body = Transfer, content_type = "application/json"),
        (status = 404, description = "Transfer not found")
    ),
    tag = "Transfer"
)]
pub async fn get_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TransferId>,
) -> ApiResult<Transfer> {
    match state.transfers.find_by_id(id).await {
        Ok(Some(transfer)) => ok(transfer),
        Ok(None) => ApiError::not_found(format!("transfer {} not found", id)).into_err(),
        Err(e) => {
            tracing::error!(transfer_id = id, error = %e, "transfer lookup failed");
            ApiError::internal("internal server error").into_err()
        }
    }
}

/// Balance response data
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceData {
    pub account_id: AccountId,
    #[schema(value_type = String, example = "900.00")]
    pub amount: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Get an account's balance
///
/// GET /api/v1/accounts/{id}/balance
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/balance",
    params(
        ("id" = u64, Path, description = "Account id")
    ),
    responses(
        (status = 200, description = "Balance details", body = BalanceData, content_type = "application/json"),
        (status = 404, description = "Account or balance not found")
    ),
    tag = "Account"
)]
pub async fn get_account_balance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AccountId>,
) -> ApiResult<BalanceData> {
    match state.accounts.find_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return ApiError::new(
                StatusCode::NOT_FOUND,
                error_codes::ACCOUNT_NOT_FOUND,
                format!("account {} not found", id),
            )
            .into_err();
        }
        Err(e) => {
            tracing::error!(account_id = id, error = %e, "account lookup failed");
            return ApiError::internal("internal server error").into_err();
        }
    }

    match state.balances.find_by_owner(id).await {
        Ok(Some(balance)) => ok(BalanceData {
            account_id: balance.owner(),
            amount: balance.amount(),
            updated_at: balance.updated_at(),
        }),
        Ok(None) => ApiError::new(
            StatusCode::NOT_FOUND,
            error_codes::BALANCE_NOT_FOUND,
            format!("account {} has no balance record", id),
        )
        .into_err(),
        Err(e) => {
            tracing::error!(account_id = id, error = %e, "balance lookup failed");
            ApiError::internal("internal server error").into_err()
        }
    }
}

/// Health check response data
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
}

/// Health check endpoint
///
/// GET /api/v1/health
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json")
    ),
    tag = "System"
)]
pub async fn health_check() -> ApiResult<HealthResponse> {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    ok(HealthResponse {
        timestamp_ms: now_ms,
    })
}
