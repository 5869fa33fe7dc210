//! Customer repository backed by `PostgreSQL`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use proximity_core::Customer;

use super::RepositoryError;
use crate::ports::CustomerRepository;

/// [`CustomerRepository`] implementation over a Postgres pool.
///
/// `save` is an upsert (`ON CONFLICT ... DO UPDATE`): concurrent writers for
/// the same customer resolve last-write-wins at the database, which is the
/// only serialization point the resolution path relies on.
#[derive(Debug, Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    /// Create a new customer repository over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for PgCustomerRepository {
    async fn find_by_id(&self, customer_id: &str) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT customer_id, last_seen, preferences
            FROM customers
            WHERE customer_id = $1
            ",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = row.try_get("customer_id")?;
        let last_seen: DateTime<Utc> = row.try_get("last_seen")?;
        let Json(preferences): Json<HashMap<String, String>> = row.try_get("preferences")?;

        let customer = Customer::from_parts(id, last_seen, preferences).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid customer in database: {e}"))
        })?;

        Ok(Some(customer))
    }

    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO customers (customer_id, last_seen, preferences)
            VALUES ($1, $2, $3)
            ON CONFLICT (customer_id)
            DO UPDATE SET last_seen = EXCLUDED.last_seen, preferences = EXCLUDED.preferences
            ",
        )
        .bind(customer.customer_id())
        .bind(customer.last_seen())
        .bind(Json(customer.preferences()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
