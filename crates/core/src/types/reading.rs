//! Raw beacon reading value object.

use serde::{Deserialize, Serialize};

use super::{MAX_CUSTOMER_ID_LENGTH, UUID_LENGTH};

/// Errors that can occur when constructing a [`BeaconReading`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BeaconReadingError {
    /// The beacon UUID is empty.
    #[error("uuid is required")]
    EmptyUuid,
    /// The beacon UUID does not have the canonical 36-character length.
    #[error("uuid must be a valid UUID ({UUID_LENGTH} characters), got {got}")]
    BadUuidLength {
        /// Actual length of the input.
        got: usize,
    },
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
    /// The signal strength is out of range.
    #[error("rssi must be between -100 and 0 dBm, got {got}")]
    RssiOutOfRange {
        /// Offending value.
        got: i32,
    },
}

/// A raw reading broadcast by a beacon device.
///
/// Immutable value object carrying the beacon's identification and signal
/// strength. This is the input to customer identification.
///
/// ## Constraints
///
/// - `uuid`: exactly 36 characters (canonical UUID length; the format itself
///   is intentionally not parsed, see [`super::is_canonical_uuid`])
/// - `major`/`minor`: 0-65535
/// - `rssi`: -100 to 0 dBm
///
/// ## Examples
///
/// ```
/// use proximity_core::BeaconReading;
///
/// let reading =
///     BeaconReading::new("550e8400-e29b-41d4-a716-446655440000", 100, 3, -20).unwrap();
/// assert_eq!(reading.rssi(), -20);
///
/// assert!(BeaconReading::new("short", 100, 3, -20).is_err());
/// assert!(BeaconReading::new("550e8400-e29b-41d4-a716-446655440000", 70000, 3, -20).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BeaconReading {
    uuid: String,
    major: i32,
    minor: i32,
    rssi: i32,
}

impl BeaconReading {
    /// Construct a reading, enforcing all field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`BeaconReadingError`] describing the first violated
    /// constraint; nothing is constructed on failure.
    pub fn new(
        uuid: impl Into<String>,
        major: i32,
        minor: i32,
        rssi: i32,
    ) -> Result<Self, BeaconReadingError> {
        let reading = Self {
            uuid: uuid.into(),
            major,
            minor,
            rssi,
        };
        reading.validate()?;
        Ok(reading)
    }

    /// Re-run the structural invariants on an existing reading.
    ///
    /// Pure and idempotent: calling it twice on the same value yields the
    /// same result.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), BeaconReadingError> {
        if self.uuid.is_empty() {
            return Err(BeaconReadingError::EmptyUuid);
        }
        if self.uuid.len() != UUID_LENGTH {
            return Err(BeaconReadingError::BadUuidLength {
                got: self.uuid.len(),
            });
        }
        if !(0..=65535).contains(&self.major) {
            return Err(BeaconReadingError::MajorOutOfRange { got: self.major });
        }
        if !(0..=65535).contains(&self.minor) {
            return Err(BeaconReadingError::MinorOutOfRange { got: self.minor });
        }
        if !(-100..=0).contains(&self.rssi) {
            return Err(BeaconReadingError::RssiOutOfRange { got: self.rssi });
        }
        Ok(())
    }

    /// The beacon's unique identifier.
    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// The major group identifier (e.g. store section).
    #[must_use]
    pub const fn major(&self) -> i32 {
        self.major
    }

    /// The minor location identifier (e.g. table number).
    #[must_use]
    pub const fn minor(&self) -> i32 {
        self.minor
    }

    /// The received signal strength in dBm.
    #[must_use]
    pub const fn rssi(&self) -> i32 {
        self.rssi
    }

    /// Derive the deterministic customer id for this reading.
    ///
    /// Every sighting with the same reading vector maps to the same customer
    /// id. This conflates "same reading" with "same customer" and is a
    /// placeholder identity scheme, kept for compatibility with the data
    /// already persisted under these ids.
    #[must_use]
    pub fn derived_customer_id(&self) -> String {
        let id = format!("cust-{}-{}-{}", self.uuid, self.major, self.minor);
        debug_assert!(id.len() <= MAX_CUSTOMER_ID_LENGTH);
        id
    }
}
