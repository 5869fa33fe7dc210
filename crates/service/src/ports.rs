//! Storage and cache contracts consumed by the resolution orchestrator.
//!
//! The orchestrator compiles against these traits only, never a concrete
//! engine. Production wires in the Postgres repositories and the moka cache;
//! tests substitute in-memory doubles. "Not found" is always `Ok(None)`,
//! never an error.

use proximity_core::{BeaconDevice, Customer, CustomerIdentity};

use crate::cache::CacheError;
use crate::db::RepositoryError;

/// Persistence contract for [`Customer`] records.
pub trait CustomerRepository {
    /// Retrieve a customer by its unique identifier.
    ///
    /// Returns `Ok(None)` when no record exists.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the lookup itself fails.
    async fn find_by_id(&self, customer_id: &str) -> Result<Option<Customer>, RepositoryError>;

    /// Persist a customer record (insert or update).
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the write fails.
    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError>;
}

/// Persistence contract for [`BeaconDevice`] records.
pub trait BeaconRepository {
    /// Retrieve a beacon device by its UUID.
    ///
    /// Returns `Ok(None)` when no device is registered under the UUID.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the lookup itself fails.
    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<BeaconDevice>, RepositoryError>;
}

/// Cache contract for resolved identities.
///
/// Entries live for a fixed hour. The cache is a side read-path
/// optimization: it is advisory, never authoritative, and its failure must
/// not block resolution through the durable repositories.
pub trait IdentityCache {
    /// Store an identity under its customer id.
    ///
    /// Implementations re-validate the aggregate before storing.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] if the identity is invalid or the backend
    /// rejects the write.
    async fn put(&self, identity: &CustomerIdentity) -> Result<(), CacheError>;

    /// Look up a cached identity by customer id.
    ///
    /// An absent or expired entry is a miss (`Ok(None)`), never an error.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] only if the backend itself fails.
    async fn get(&self, customer_id: &str) -> Result<Option<CustomerIdentity>, CacheError>;
}
