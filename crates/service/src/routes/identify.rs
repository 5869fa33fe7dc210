//! Identification endpoints.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::info;

use proximity_core::{BeaconReading, CustomerIdentity};

use crate::error::{AppError, Result};
use crate::resolver::ResolutionError;
use crate::state::AppState;

/// Raw beacon sighting as submitted by a gateway.
#[derive(Debug, Deserialize)]
pub struct IdentifyRequest {
    uuid: String,
    major: i32,
    minor: i32,
    rssi: i32,
}

/// `POST /identify` - resolve a beacon sighting into a customer identity.
pub async fn identify(
    State(state): State<AppState>,
    Json(request): Json<IdentifyRequest>,
) -> Result<Json<CustomerIdentity>> {
    let reading = BeaconReading::new(request.uuid, request.major, request.minor, request.rssi)
        .map_err(ResolutionError::from)
        .map_err(AppError::from)?;

    let identity = state.resolver().identify(&reading).await?;

    info!(
        customer_id = identity.customer_id(),
        beacon_id = identity.beacon_id(),
        confidence = identity.confidence(),
        "customer identified"
    );

    Ok(Json(identity))
}

/// `GET /identities/{customer_id}` - look up a recently resolved identity.
///
/// Served from the cache only; a miss (absent or expired) is a 404, never a
/// fallthrough to the durable store.
pub async fn cached_identity(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerIdentity>> {
    let identity = state
        .resolver()
        .cached_identity(&customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(customer_id))?;

    Ok(Json(identity))
}
