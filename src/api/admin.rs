//! Admin verification endpoints. Mounted behind the admin auth layer.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::{json_body, require, ApiResult};
use crate::models::{DriverRecord, DriverStatus, MessageResponse, VerificationRequest};
use crate::AppState;

/// GET /admin/pending-verifications - Registrations awaiting a decision.
pub async fn list_pending_verifications(
    State(state): State<AppState>,
) -> ApiResult<Vec<DriverRecord>> {
    Ok(Json(state.repo.list_pending_drivers().await?))
}

/// GET /admin/verifications - Every registration.
pub async fn list_verifications(State(state): State<AppState>) -> ApiResult<Vec<DriverRecord>> {
    Ok(Json(state.repo.list_drivers().await?))
}

/// POST /admin/approve-verification - Approve a registration.
pub async fn approve_verification(
    State(state): State<AppState>,
    payload: Result<Json<VerificationRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    set_status(&state, json_body(payload)?, DriverStatus::Approved, "Driver approved").await
}

/// POST /admin/reject-verification - Reject a registration.
pub async fn reject_verification(
    State(state): State<AppState>,
    payload: Result<Json<VerificationRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    set_status(&state, json_body(payload)?, DriverStatus::Rejected, "Driver rejected").await
}

async fn set_status(
    state: &AppState,
    request: VerificationRequest,
    status: DriverStatus,
    message: &str,
) -> ApiResult<MessageResponse> {
    let id = require(request.id, "ID is required")?;

    state.repo.set_driver_status(&id, status).await?;
    tracing::info!("Driver {} marked {}", id, status.as_str());

    Ok(Json(MessageResponse::ok(message)))
}
