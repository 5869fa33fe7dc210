//! Domain value objects and entities.
//!
//! Each type validates its own invariants on construction and fails
//! atomically: no partially constructed value is ever returned.

mod beacon;
mod customer;
mod location;
mod reading;

pub use beacon::{BeaconDevice, BeaconError, BeaconStatus};
pub use customer::{Customer, CustomerError};
pub use location::{Location, LocationError, LocationType};
pub use reading::{BeaconReading, BeaconReadingError};

/// Length of a canonical UUID string (8-4-4-4-12 with hyphens).
pub const UUID_LENGTH: usize = 36;

/// Maximum length of a customer identifier.
pub const MAX_CUSTOMER_ID_LENGTH: usize = 64;

/// Maximum length of a location name or description.
pub const MAX_LOCATION_LENGTH: usize = 32;

/// Returns `true` if `s` parses as a canonical UUID.
///
/// Beacon identifiers are only checked for length (36 characters) when
/// validating, to preserve the historically accepted inputs. This helper
/// lets callers log a mismatch without rejecting it.
#[must_use]
pub fn is_canonical_uuid(s: &str) -> bool {
    uuid::Uuid::try_parse(s).is_ok()
}
