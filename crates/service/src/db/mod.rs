//! `PostgreSQL` persistence for customers and beacon devices.
//!
//! # Tables
//!
//! - `customers` - identity resolution state: `customer_id`, `last_seen`,
//!   `preferences` (opaque string-to-string JSONB document)
//! - `beacons` - registered devices, written by the external provisioning
//!   process; the service itself only reads them and updates `status`
//!
//! # Migrations
//!
//! Migrations live in `crates/service/migrations/` and are applied at
//! startup via `sqlx::migrate!`.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

mod beacons;
mod customers;

pub use beacons::PgBeaconRepository;
pub use customers::PgCustomerRepository;

/// Errors surfaced by the Postgres repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored record violates a domain invariant.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A targeted update matched no row.
    #[error("record not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
