//! Beacon device repository backed by `PostgreSQL`.

use sqlx::{PgPool, Row};

use proximity_core::{BeaconDevice, BeaconStatus};

use super::RepositoryError;
use crate::ports::BeaconRepository;

/// [`BeaconRepository`] implementation over a Postgres pool.
///
/// Devices are provisioned by an external process; the resolution path only
/// reads them. [`PgBeaconRepository::update_status`] is the single write the
/// service exposes and intentionally lives outside the read-only trait.
#[derive(Debug, Clone)]
pub struct PgBeaconRepository {
    pool: PgPool,
}

impl PgBeaconRepository {
    /// Create a new beacon repository over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Set the operational status of a device.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no device has the id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        beacon_id: &str,
        status: BeaconStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE beacons
            SET status = $1, updated_at = now()
            WHERE beacon_id = $2
            ",
        )
        .bind(status)
        .bind(beacon_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

impl BeaconRepository for PgBeaconRepository {
    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<BeaconDevice>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT beacon_id, store_id, major, minor, location, status
            FROM beacons
            WHERE beacon_id = $1
            ",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let beacon_id: String = row.try_get("beacon_id")?;
        let store_id: String = row.try_get("store_id")?;
        let major: i32 = row.try_get("major")?;
        let minor: i32 = row.try_get("minor")?;
        let location: String = row.try_get("location")?;
        let status: BeaconStatus = row.try_get("status")?;

        let device = BeaconDevice::new(beacon_id, store_id, major, minor, location, status)
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid beacon in database: {e}"))
            })?;

        Ok(Some(device))
    }
}
