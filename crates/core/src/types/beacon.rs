//! Beacon device entity.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{MAX_LOCATION_LENGTH, UUID_LENGTH};

/// Operational status of a beacon device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BeaconStatus {
    /// The beacon is operational and may identify customers.
    #[default]
    Active,
    /// The beacon is not operational.
    Inactive,
    /// The beacon is undergoing maintenance.
    Maintenance,
}

impl fmt::Display for BeaconStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Maintenance => write!(f, "maintenance"),
        }
    }
}

impl std::str::FromStr for BeaconStatus {
    type Err = BeaconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(BeaconError::InvalidStatus {
                got: s.to_owned(),
            }),
        }
    }
}

// SQLx support (with postgres feature): status is stored as TEXT
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for BeaconStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for BeaconStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for BeaconStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.to_string(), buf)
    }
}

/// Errors that can occur when constructing a [`BeaconDevice`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BeaconError {
    /// The beacon identifier is empty.
    #[error("beaconId is required")]
    EmptyBeaconId,
    /// The beacon identifier does not have the canonical 36-character length.
    #[error("beaconId must be a valid UUID ({UUID_LENGTH} characters), got {got}")]
    BadBeaconIdLength {
        /// Actual length of the input.
        got: usize,
    },
    /// The store identifier is empty.
    #[error("storeId is required")]
    EmptyStoreId,
    /// The major group identifier is out of range.
    #[error("major must be between 0 and 65535, got {got}")]
    MajorOutOfRange {
        /// Offending value.
        got: i32,
    },
    /// The minor location identifier is out of range.
    #[error("minor must be between 0 and 65535, got {got}")]
    MinorOutOfRange {
        /// Offending value.
        got: i32,
    },
    /// The location description is too long.
    #[error("location exceeds maximum length of {MAX_LOCATION_LENGTH} characters, got {got}")]
    LocationTooLong {
        /// Actual length of the input.
        got: usize,
    },
    /// The status string is not a known beacon status.
    #[error("invalid status: {got}, must be one of active, inactive, maintenance")]
    InvalidStatus {
        /// Offending value.
        got: String,
    },
}

/// A physical beacon device registered for a store.
///
/// Devices are created and updated by an external provisioning process; the
/// resolution path only reads them. Status is the single in-scope mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BeaconDevice {
    beacon_id: String,
    store_id: String,
    major: i32,
    minor: i32,
    location: String,
    status: BeaconStatus,
}

impl BeaconDevice {
    /// Construct a beacon device, enforcing all field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`BeaconError`] describing the first violated constraint.
    pub fn new(
        beacon_id: impl Into<String>,
        store_id: impl Into<String>,
        major: i32,
        minor: i32,
        location: impl Into<String>,
        status: BeaconStatus,
    ) -> Result<Self, BeaconError> {
        let device = Self {
            beacon_id: beacon_id.into(),
            store_id: store_id.into(),
            major,
            minor,
            location: location.into(),
            status,
        };
        device.validate()?;
        Ok(device)
    }

    /// Re-run the structural invariants on an existing device.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), BeaconError> {
        if self.beacon_id.is_empty() {
            return Err(BeaconError::EmptyBeaconId);
        }
        if self.beacon_id.len() != UUID_LENGTH {
            return Err(BeaconError::BadBeaconIdLength {
                got: self.beacon_id.len(),
            });
        }
        if self.store_id.is_empty() {
            return Err(BeaconError::EmptyStoreId);
        }
        if !(0..=65535).contains(&self.major) {
            return Err(BeaconError::MajorOutOfRange { got: self.major });
        }
        if !(0..=65535).contains(&self.minor) {
            return Err(BeaconError::MinorOutOfRange { got: self.minor });
        }
        if self.location.len() > MAX_LOCATION_LENGTH {
            return Err(BeaconError::LocationTooLong {
                got: self.location.len(),
            });
        }
        Ok(())
    }

    /// The device's unique identifier (UUID string).
    #[must_use]
    pub fn beacon_id(&self) -> &str {
        &self.beacon_id
    }

    /// The store this device belongs to.
    #[must_use]
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// The major group identifier.
    #[must_use]
    pub const fn major(&self) -> i32 {
        self.major
    }

    /// The minor location identifier.
    #[must_use]
    pub const fn minor(&self) -> i32 {
        self.minor
    }

    /// Physical placement description (e.g. "Table 3").
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Current operational status.
    #[must_use]
    pub const fn status(&self) -> BeaconStatus {
        self.status
    }

    /// Update the device's operational status.
    ///
    /// The status enum is closed, so any value is a valid transition.
    pub const fn set_status(&mut self, status: BeaconStatus) {
        self.status = status;
    }
}
