//! Integration tests for the identify flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The service running (cargo run -p proximity-service)
//!
//! Run with: cargo test -p proximity-integration-tests -- --ignored

use proximity_core::MIN_CONFIDENCE;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the service (configurable via environment).
fn base_url() -> String {
    std::env::var("SERVICE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A reading payload for a beacon that is very unlikely to be provisioned.
fn unknown_beacon_reading() -> Value {
    json!({
        "uuid": Uuid::new_v4().to_string(),
        "major": 100,
        "minor": 3,
        "rssi": -50,
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running service and PostgreSQL"]
async fn test_healthz() {
    let resp = client()
        .get(format!("{}/healthz", base_url()))
        .send()
        .await
        .expect("Failed to reach service");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert_eq!(body, "ok");
}

// ============================================================================
// Identify
// ============================================================================

#[tokio::test]
#[ignore = "Requires running service and PostgreSQL"]
async fn test_identify_unknown_beacon_is_not_found() {
    let resp = client()
        .post(format!("{}/identify", base_url()))
        .json(&unknown_beacon_reading())
        .send()
        .await
        .expect("Failed to post reading");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running service and PostgreSQL"]
async fn test_identify_rejects_positive_rssi() {
    let mut reading = unknown_beacon_reading();
    reading["rssi"] = json!(7);

    let resp = client()
        .post(format!("{}/identify", base_url()))
        .json(&reading)
        .send()
        .await
        .expect("Failed to post reading");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running service and PostgreSQL"]
async fn test_identify_rejects_short_uuid() {
    let mut reading = unknown_beacon_reading();
    reading["uuid"] = json!("not-a-uuid");

    let resp = client()
        .post(format!("{}/identify", base_url()))
        .json(&reading)
        .send()
        .await
        .expect("Failed to post reading");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

/// Full happy-path flow against a provisioned beacon.
///
/// Requires a beacon row seeded in the test database, identified by the
/// `TEST_BEACON_UUID`, `TEST_BEACON_MAJOR` and `TEST_BEACON_MINOR`
/// environment variables. Skips when they are not set.
#[tokio::test]
#[ignore = "Requires running service, PostgreSQL and a seeded beacon"]
async fn test_identify_resolves_seeded_beacon() {
    let Ok(uuid) = std::env::var("TEST_BEACON_UUID") else {
        return; // No seeded beacon available
    };
    let major: i32 = std::env::var("TEST_BEACON_MAJOR")
        .expect("TEST_BEACON_MAJOR must be set alongside TEST_BEACON_UUID")
        .parse()
        .expect("TEST_BEACON_MAJOR must be an integer");
    let minor: i32 = std::env::var("TEST_BEACON_MINOR")
        .expect("TEST_BEACON_MINOR must be set alongside TEST_BEACON_UUID")
        .parse()
        .expect("TEST_BEACON_MINOR must be an integer");

    let reading = json!({
        "uuid": uuid,
        "major": major,
        "minor": minor,
        "rssi": -10,
    });

    let resp = client()
        .post(format!("{}/identify", base_url()))
        .json(&reading)
        .send()
        .await
        .expect("Failed to post reading");

    assert_eq!(resp.status(), StatusCode::OK);

    let identity: Value = resp.json().await.expect("Failed to parse identity");
    let customer_id = identity["customer_id"]
        .as_str()
        .expect("customer_id missing");
    assert_eq!(
        customer_id,
        format!("cust-{uuid}-{major}-{minor}"),
        "customer id should be derived from the beacon identity"
    );
    assert!(
        identity["confidence"].as_f64().expect("confidence missing") >= f64::from(MIN_CONFIDENCE)
    );

    // The resolved identity should now be served from the cache.
    let resp = client()
        .get(format!("{}/identities/{customer_id}", base_url()))
        .send()
        .await
        .expect("Failed to get cached identity");

    assert_eq!(resp.status(), StatusCode::OK);
    let cached: Value = resp.json().await.expect("Failed to parse cached identity");
    assert_eq!(cached["customer_id"], identity["customer_id"]);

    // An immediate second sighting falls inside the duplicate window.
    let resp = client()
        .post(format!("{}/identify", base_url()))
        .json(&reading)
        .send()
        .await
        .expect("Failed to post duplicate reading");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

// ============================================================================
// Cached Identities
// ============================================================================

#[tokio::test]
#[ignore = "Requires running service and PostgreSQL"]
async fn test_unknown_cached_identity_is_not_found() {
    let resp = client()
        .get(format!(
            "{}/identities/cust-{}-1-1",
            base_url(),
            Uuid::new_v4()
        ))
        .send()
        .await
        .expect("Failed to get cached identity");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Beacon Status
// ============================================================================

#[tokio::test]
#[ignore = "Requires running service and PostgreSQL"]
async fn test_update_status_unknown_beacon_is_not_found() {
    let resp = client()
        .put(format!(
            "{}/beacons/beacon-{}/status",
            base_url(),
            Uuid::new_v4()
        ))
        .json(&json!({ "status": "maintenance" }))
        .send()
        .await
        .expect("Failed to put status");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running service and PostgreSQL"]
async fn test_update_status_rejects_unknown_value() {
    let resp = client()
        .put(format!(
            "{}/beacons/beacon-{}/status",
            base_url(),
            Uuid::new_v4()
        ))
        .json(&json!({ "status": "retired" }))
        .send()
        .await
        .expect("Failed to put status");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
