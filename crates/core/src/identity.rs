//! The `CustomerIdentity` aggregate root.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    BeaconDevice, BeaconError, Customer, CustomerError, MAX_CUSTOMER_ID_LENGTH,
    MAX_LOCATION_LENGTH, UUID_LENGTH,
};

/// Minimum confidence required for an identification to be accepted.
pub const MIN_CONFIDENCE: f32 = 0.8;

/// Minimum gap between two sightings of the same customer.
///
/// A second identification inside this window is treated as a duplicate of
/// the first, not a new sighting.
#[must_use]
pub fn duplicate_window() -> Duration {
    Duration::minutes(1)
}

/// Errors raised by the identity aggregate's domain rules.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum IdentityError {
    /// The source customer failed its own validator.
    #[error("invalid customer: {0}")]
    InvalidCustomer(#[from] CustomerError),
    /// The source beacon device failed its own validator.
    #[error("invalid beacon: {0}")]
    InvalidBeacon(#[from] BeaconError),
    /// The confidence score is outside `[0.0, 1.0]`.
    #[error("confidence must be between 0.0 and 1.0, got {got}")]
    ConfidenceOutOfRange {
        /// Offending value.
        got: f32,
    },
    /// The confidence score is below the acceptance floor.
    #[error("confidence must be at least {MIN_CONFIDENCE}, got {got}")]
    ConfidenceBelowMinimum {
        /// Offending value.
        got: f32,
    },
    /// The detection timestamp is unset.
    #[error("detectedAt must be set")]
    MissingDetectedAt,
    /// The customer was already identified inside the suppression window.
    #[error("duplicate identification within 1 minute: last seen {last_seen}, detected at {detected_at}")]
    DuplicateIdentification {
        /// When the customer was last seen.
        last_seen: DateTime<Utc>,
        /// When this sighting was detected.
        detected_at: DateTime<Utc>,
    },
    /// A stored identity carries an empty customer id.
    #[error("customerId is required")]
    EmptyCustomerId,
    /// A stored identity carries an over-long customer id.
    #[error("customerId exceeds maximum length of {MAX_CUSTOMER_ID_LENGTH} characters")]
    CustomerIdTooLong,
    /// A stored identity carries a beacon id that is not UUID-shaped.
    #[error("beaconId must be a valid UUID ({UUID_LENGTH} characters)")]
    BadBeaconId,
    /// A stored identity carries an over-long location.
    #[error("location exceeds maximum length of {MAX_LOCATION_LENGTH} characters")]
    LocationTooLong,
}

/// A resolved customer identification.
///
/// Aggregate root combining a customer and a beacon device with the
/// confidence and timestamp of a single sighting. Immutable once
/// constructed; it owns copies of the identifying fields and holds no live
/// references to the source entities.
///
/// Construction enforces the domain rules (confidence floor,
/// duplicate-suppression window). [`CustomerIdentity::validate`] re-runs the
/// structural invariants on an already-built instance - but not the
/// duplicate-window rule, which depends on the customer's mutable
/// `last_seen` state and is therefore a construction-time check only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerIdentity {
    customer_id: String,
    beacon_id: String,
    location: String,
    confidence: f32,
    detected_at: DateTime<Utc>,
}

impl CustomerIdentity {
    /// Construct an identity from a sighting, checking every domain rule.
    ///
    /// Checks run in order and fail fast: customer validity, beacon
    /// validity, confidence range, confidence floor, timestamp presence,
    /// duplicate window (`detected_at - customer.last_seen >= 1 minute`,
    /// boundary inclusive).
    ///
    /// # Errors
    ///
    /// Returns the first violated rule; nothing is constructed on failure.
    pub fn new(
        customer: &Customer,
        beacon: &BeaconDevice,
        confidence: f32,
        detected_at: DateTime<Utc>,
    ) -> Result<Self, IdentityError> {
        customer.validate()?;
        beacon.validate()?;

        if !(0.0..=1.0).contains(&confidence) {
            return Err(IdentityError::ConfidenceOutOfRange { got: confidence });
        }
        if confidence < MIN_CONFIDENCE {
            return Err(IdentityError::ConfidenceBelowMinimum { got: confidence });
        }
        if detected_at == DateTime::<Utc>::UNIX_EPOCH {
            return Err(IdentityError::MissingDetectedAt);
        }
        if detected_at.signed_duration_since(customer.last_seen()) < duplicate_window() {
            return Err(IdentityError::DuplicateIdentification {
                last_seen: customer.last_seen(),
                detected_at,
            });
        }

        Ok(Self {
            customer_id: customer.customer_id().to_owned(),
            beacon_id: beacon.beacon_id().to_owned(),
            location: beacon.location().to_owned(),
            confidence,
            detected_at,
        })
    }

    /// Re-run the structural invariants on an existing identity.
    ///
    /// Checks lengths, id shape, confidence range and floor, and timestamp
    /// presence. Does not re-check the duplicate window.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), IdentityError> {
        if self.customer_id.is_empty() {
            return Err(IdentityError::EmptyCustomerId);
        }
        if self.customer_id.len() > MAX_CUSTOMER_ID_LENGTH {
            return Err(IdentityError::CustomerIdTooLong);
        }
        if self.beacon_id.len() != UUID_LENGTH {
            return Err(IdentityError::BadBeaconId);
        }
        if self.location.len() > MAX_LOCATION_LENGTH {
            return Err(IdentityError::LocationTooLong);
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(IdentityError::ConfidenceOutOfRange {
                got: self.confidence,
            });
        }
        if self.confidence < MIN_CONFIDENCE {
            return Err(IdentityError::ConfidenceBelowMinimum {
                got: self.confidence,
            });
        }
        if self.detected_at == DateTime::<Utc>::UNIX_EPOCH {
            return Err(IdentityError::MissingDetectedAt);
        }
        Ok(())
    }

    /// The identified customer's id.
    #[must_use]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// The beacon that produced the sighting.
    #[must_use]
    pub fn beacon_id(&self) -> &str {
        &self.beacon_id
    }

    /// Where the customer was identified (copied from the beacon device).
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Confidence of the identification, in `[0.8, 1.0]` by construction.
    #[must_use]
    pub const fn confidence(&self) -> f32 {
        self.confidence
    }

    /// When the sighting was detected.
    #[must_use]
    pub const fn detected_at(&self) -> DateTime<Utc> {
        self.detected_at
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::BeaconStatus;

    const BEACON_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn beacon() -> BeaconDevice {
        BeaconDevice::new(
            BEACON_ID,
            "store100",
            100,
            3,
            "Table 3",
            BeaconStatus::Active,
        )
        .unwrap()
    }

    fn customer_seen_at(last_seen: DateTime<Utc>) -> Customer {
        let mut customer = Customer::new("cust123", None).unwrap();
        customer.mark_seen(last_seen);
        customer
    }

    #[test]
    fn test_new_valid() {
        let detected_at = Utc::now();
        let customer = customer_seen_at(detected_at - Duration::minutes(2));

        let identity = CustomerIdentity::new(&customer, &beacon(), 0.9, detected_at).unwrap();
        assert_eq!(identity.customer_id(), "cust123");
        assert_eq!(identity.beacon_id(), BEACON_ID);
        assert_eq!(identity.location(), "Table 3");
        assert!((identity.confidence() - 0.9).abs() < f32::EPSILON);
        assert_eq!(identity.detected_at(), detected_at);
    }

    #[test]
    fn test_confidence_floor_boundary() {
        let detected_at = Utc::now();
        let customer = customer_seen_at(detected_at - Duration::minutes(2));

        // Exactly at the floor succeeds
        assert!(CustomerIdentity::new(&customer, &beacon(), 0.8, detected_at).is_ok());

        // Just below fails
        let err = CustomerIdentity::new(&customer, &beacon(), 0.79999, detected_at).unwrap_err();
        assert!(matches!(err, IdentityError::ConfidenceBelowMinimum { .. }));
    }

    #[test]
    fn test_confidence_out_of_range() {
        let detected_at = Utc::now();
        let customer = customer_seen_at(detected_at - Duration::minutes(2));

        let err = CustomerIdentity::new(&customer, &beacon(), 1.5, detected_at).unwrap_err();
        assert!(matches!(err, IdentityError::ConfidenceOutOfRange { .. }));

        let err = CustomerIdentity::new(&customer, &beacon(), -0.1, detected_at).unwrap_err();
        assert!(matches!(err, IdentityError::ConfidenceOutOfRange { .. }));
    }

    #[test]
    fn test_duplicate_window_boundary() {
        let last_seen = Utc::now();
        let customer = customer_seen_at(last_seen);

        // 59 seconds after the last sighting is a duplicate
        let err = CustomerIdentity::new(
            &customer,
            &beacon(),
            0.9,
            last_seen + Duration::seconds(59),
        )
        .unwrap_err();
        match err {
            IdentityError::DuplicateIdentification {
                last_seen: reported_last_seen,
                detected_at,
            } => {
                assert_eq!(reported_last_seen, last_seen);
                assert_eq!(detected_at, last_seen + Duration::seconds(59));
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }

        // Exactly 60 seconds is a new sighting (boundary inclusive)
        assert!(
            CustomerIdentity::new(&customer, &beacon(), 0.9, last_seen + Duration::seconds(60))
                .is_ok()
        );
    }

    #[test]
    fn test_missing_detected_at() {
        let customer = customer_seen_at(Utc::now());
        let err =
            CustomerIdentity::new(&customer, &beacon(), 0.9, DateTime::<Utc>::UNIX_EPOCH)
                .unwrap_err();
        assert_eq!(err, IdentityError::MissingDetectedAt);
    }

    #[test]
    fn test_invalid_customer_fails_first() {
        let mut customer = Customer::new("cust123", None).unwrap();
        customer.mark_seen(DateTime::<Utc>::UNIX_EPOCH);
        // Confidence is also bad, but the customer check wins (fail-fast order)
        let err = CustomerIdentity::new(&customer, &beacon(), 0.1, Utc::now()).unwrap_err();
        assert!(matches!(err, IdentityError::InvalidCustomer(_)));
    }

    #[test]
    fn test_constructed_identity_passes_validate() {
        let detected_at = Utc::now();
        let customer = customer_seen_at(detected_at - Duration::minutes(2));
        let identity = CustomerIdentity::new(&customer, &beacon(), 0.85, detected_at).unwrap();
        assert!(identity.validate().is_ok());
        // Idempotent
        assert_eq!(identity.validate(), identity.validate());
    }

    #[test]
    fn test_serde_roundtrip_preserves_validity() {
        let detected_at = Utc::now();
        let customer = customer_seen_at(detected_at - Duration::minutes(2));
        let identity = CustomerIdentity::new(&customer, &beacon(), 0.85, detected_at).unwrap();

        let json = serde_json::to_string(&identity).unwrap();
        let parsed: CustomerIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, identity);
        assert!(parsed.validate().is_ok());
    }
}
