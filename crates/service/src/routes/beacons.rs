//! Beacon status administration.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::info;

use proximity_core::BeaconStatus;

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    status: String,
}

/// `PUT /beacons/{beacon_id}/status` - set a device's operational status.
///
/// This is the only beacon write the service exposes; provisioning proper
/// happens out of band.
pub async fn update_status(
    State(state): State<AppState>,
    Path(beacon_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<StatusCode> {
    let status: BeaconStatus = request
        .status
        .parse()
        .map_err(|e: proximity_core::BeaconError| AppError::BadRequest(e.to_string()))?;

    state
        .beacons()
        .update_status(&beacon_id, status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(beacon_id.clone()),
            other => AppError::Database(other),
        })?;

    info!(beacon_id, %status, "beacon status updated");
    Ok(StatusCode::NO_CONTENT)
}
