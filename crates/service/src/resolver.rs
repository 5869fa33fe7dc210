//! Resolution orchestrator: raw beacon reading to customer identity.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use proximity_core::{
    BeaconReading, BeaconReadingError, BeaconStatus, Customer, CustomerError, CustomerIdentity,
    IdentityError, LinearRssi, MIN_CONFIDENCE, is_canonical_uuid,
    confidence::ConfidenceModel, identity::duplicate_window,
};

use crate::cache::CacheError;
use crate::db::RepositoryError;
use crate::ports::{BeaconRepository, CustomerRepository, IdentityCache};

/// Errors from a single `identify` call.
///
/// Every variant carries the context needed to diagnose the failure without
/// inspecting internal state. Nothing is retried; any repository failure is
/// terminal for the current call.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The reading failed field-level validation.
    #[error("invalid beacon reading: {0}")]
    InvalidReading(#[from] BeaconReadingError),

    /// The beacon lookup itself failed.
    #[error("failed to retrieve beacon: {0}")]
    BeaconLookup(#[source] RepositoryError),

    /// No device is registered under the reading's UUID.
    #[error("beacon not found for UUID: {uuid}")]
    BeaconNotFound {
        /// UUID from the reading.
        uuid: String,
    },

    /// The device exists but is not accepting identifications.
    #[error("beacon {beacon_id} is not active, current status: {status}")]
    BeaconNotActive {
        /// Device identifier.
        beacon_id: String,
        /// Its current status.
        status: BeaconStatus,
    },

    /// The scored confidence did not reach the acceptance floor.
    #[error("identification confidence {confidence} below minimum threshold of {MIN_CONFIDENCE}")]
    LowConfidence {
        /// Scored confidence.
        confidence: f32,
    },

    /// The customer lookup itself failed.
    #[error("failed to retrieve customer: {0}")]
    CustomerLookup(#[source] RepositoryError),

    /// Persisting the customer failed.
    #[error("failed to save customer: {0}")]
    CustomerPersist(#[source] RepositoryError),

    /// A customer record could not be constructed.
    #[error("failed to create customer: {0}")]
    Customer(#[from] CustomerError),

    /// The identity aggregate rejected the sighting (confidence floor,
    /// duplicate window, or structural invariants).
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// Orchestrates identity resolution across the repositories and the cache.
///
/// All collaborators are injected at construction; the orchestrator holds no
/// ambient state and each [`Resolver::identify`] call is independent.
/// Concurrent calls for the same customer race on the lookup-or-create and
/// on the two writes; the repository's upsert semantics (last-write-wins)
/// resolve that race, by contract.
#[derive(Debug, Clone)]
pub struct Resolver<C, B, K, M = LinearRssi> {
    customers: C,
    beacons: B,
    cache: K,
    scorer: M,
}

impl<C, B, K> Resolver<C, B, K>
where
    C: CustomerRepository,
    B: BeaconRepository,
    K: IdentityCache,
{
    /// Create a resolver with the default linear RSSI confidence model.
    pub const fn new(customers: C, beacons: B, cache: K) -> Self {
        Self::with_scorer(customers, beacons, cache, LinearRssi)
    }
}

impl<C, B, K, M> Resolver<C, B, K, M>
where
    C: CustomerRepository,
    B: BeaconRepository,
    K: IdentityCache,
    M: ConfidenceModel,
{
    /// Create a resolver with a custom confidence model.
    pub const fn with_scorer(customers: C, beacons: B, cache: K, scorer: M) -> Self {
        Self {
            customers,
            beacons,
            cache,
            scorer,
        }
    }

    /// Resolve a raw beacon reading into a customer identity.
    ///
    /// Steps, each a potential failure point: validate the reading, look up
    /// the beacon (must exist and be active), score confidence (must reach
    /// the floor before any customer side effect), look up or create the
    /// customer, construct the identity aggregate, persist the updated
    /// `last_seen`, and advisorily populate the cache.
    ///
    /// A customer created here is not rolled back if aggregate construction
    /// subsequently fails: at-least-once write semantics, accepted and
    /// relied upon by the duplicate-suppression window.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`] for the first failing step.
    pub async fn identify(
        &self,
        reading: &BeaconReading,
    ) -> Result<CustomerIdentity, ResolutionError> {
        reading.validate()?;
        if !is_canonical_uuid(reading.uuid()) {
            // Accepted (length-only validator), but worth a trace
            debug!(uuid = reading.uuid(), "reading uuid is not canonical");
        }

        let beacon = self
            .beacons
            .find_by_uuid(reading.uuid())
            .await
            .map_err(ResolutionError::BeaconLookup)?
            .ok_or_else(|| ResolutionError::BeaconNotFound {
                uuid: reading.uuid().to_owned(),
            })?;
        if beacon.status() != BeaconStatus::Active {
            return Err(ResolutionError::BeaconNotActive {
                beacon_id: beacon.beacon_id().to_owned(),
                status: beacon.status(),
            });
        }

        // Short-circuits before any customer lookup or write
        let confidence = self.scorer.score(reading.rssi());
        if confidence < MIN_CONFIDENCE {
            return Err(ResolutionError::LowConfidence { confidence });
        }

        let detected_at = Utc::now();
        let customer_id = reading.derived_customer_id();
        let mut customer = match self
            .customers
            .find_by_id(&customer_id)
            .await
            .map_err(ResolutionError::CustomerLookup)?
        {
            Some(customer) => customer,
            None => {
                let mut customer = Customer::new(&customer_id, None)?;
                // A brand-new customer has no prior sighting to suppress:
                // back-date last_seen so this first sighting clears the window
                customer.mark_seen(detected_at - duplicate_window());
                self.customers
                    .save(&customer)
                    .await
                    .map_err(ResolutionError::CustomerPersist)?;
                debug!(customer_id, "created customer on first sighting");
                customer
            }
        };

        let identity = CustomerIdentity::new(&customer, &beacon, confidence, detected_at)?;

        customer.mark_seen(detected_at);
        self.customers
            .save(&customer)
            .await
            .map_err(ResolutionError::CustomerPersist)?;

        // Advisory: cache unavailability must not block resolution
        if let Err(err) = self.cache.put(&identity).await {
            warn!(customer_id, error = %err, "failed to cache identity");
        }

        Ok(identity)
    }

    /// Look up a previously resolved identity in the cache.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] only if the cache backend fails; a missing
    /// or expired entry is `Ok(None)`.
    pub async fn cached_identity(
        &self,
        customer_id: &str,
    ) -> Result<Option<CustomerIdentity>, CacheError> {
        self.cache.get(customer_id).await
    }
}
