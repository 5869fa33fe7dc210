//! Integration tests for the proximity resolution service.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and the service
//! docker compose up -d postgres
//! cargo run -p proximity-service
//!
//! # Run the ignored tests against it
//! cargo test -p proximity-integration-tests -- --ignored
//! ```
//!
//! Tests live under `tests/` and are `#[ignore]`d by default because they
//! need a running service and database. The service base URL is read from
//! `SERVICE_BASE_URL` (default `http://localhost:3000`).
