//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::{BalanceData, HealthResponse};
use crate::gateway::types::TransferIntent;
use crate::transfer::{Transfer, TransferStatus};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payflow API",
        version = "1.0.0",
        description = "Peer-to-peer money transfer API: submit transfers, inspect the audit trail, query balances.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::create_transfer,
        crate::gateway::handlers::get_transfer,
        crate::gateway::handlers::get_account_balance,
    ),
    components(
        schemas(
            TransferIntent,
            Transfer,
            TransferStatus,
            BalanceData,
            HealthResponse,
        )
    ),
    tags(
        (name = "Transfer", description = "Transfer submission and audit"),
        (name = "Account", description = "Account balances"),
        (name = "System", description = "Service health")
    )
)]
pub struct ApiDoc;
