//! HTTP surface of the resolution service.
//!
//! The wire layer is deliberately thin: it validates nothing itself beyond
//! deserialization, delegating every rule to the core domain and the
//! resolver.

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

mod beacons;
mod identify;

/// Build the service router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/identify", post(identify::identify))
        .route("/identities/{customer_id}", get(identify::cached_identity))
        .route("/beacons/{beacon_id}/status", put(beacons::update_status))
}

/// Liveness probe.
async fn healthz() -> &'static str {
    "ok"
}
