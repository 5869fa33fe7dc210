//! In-process cache of resolved identities.

use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;

use proximity_core::{CustomerIdentity, IdentityError};

use crate::ports::IdentityCache;

/// Fixed lifetime of a cached identity.
const IDENTITY_TTL: Duration = Duration::from_secs(60 * 60);

/// Errors surfaced by the identity cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The identity failed re-validation before storage.
    #[error("invalid identity: {0}")]
    InvalidIdentity(#[from] IdentityError),

    /// The cache backend itself failed.
    ///
    /// The in-process store never produces this; it exists for fallible
    /// backends behind the same [`IdentityCache`] contract.
    #[error("cache backend unavailable: {0}")]
    Backend(String),
}

/// [`IdentityCache`] implementation over a `moka` in-process cache.
///
/// Entries expire one hour after insertion. The cache is advisory: a miss is
/// `Ok(None)` and resolution never depends on it.
#[derive(Debug, Clone)]
pub struct MokaIdentityCache {
    cache: Cache<String, CustomerIdentity>,
}

impl MokaIdentityCache {
    /// Create a cache bounded to `max_capacity` identities.
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self::with_ttl(max_capacity, IDENTITY_TTL)
    }

    fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }
}

impl IdentityCache for MokaIdentityCache {
    async fn put(&self, identity: &CustomerIdentity) -> Result<(), CacheError> {
        // Defense in depth: never cache an identity that fails its validator
        identity.validate()?;

        self.cache
            .insert(identity.customer_id().to_owned(), identity.clone())
            .await;
        Ok(())
    }

    async fn get(&self, customer_id: &str) -> Result<Option<CustomerIdentity>, CacheError> {
        Ok(self.cache.get(customer_id).await)
    }
}
