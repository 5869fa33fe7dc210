//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::MokaIdentityCache;
use crate::config::ServiceConfig;
use crate::db::{PgBeaconRepository, PgCustomerRepository};
use crate::resolver::Resolver;

/// The production resolver wiring: Postgres repositories + moka cache.
pub type AppResolver = Resolver<PgCustomerRepository, PgBeaconRepository, MokaIdentityCache>;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the configuration, the
/// connection pool, and the wired-up resolver.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServiceConfig,
    pool: PgPool,
    resolver: AppResolver,
}

impl AppState {
    /// Build the application state, wiring the resolver to its
    /// production collaborators.
    #[must_use]
    pub fn new(config: ServiceConfig, pool: PgPool) -> Self {
        let resolver = Resolver::new(
            PgCustomerRepository::new(pool.clone()),
            PgBeaconRepository::new(pool.clone()),
            MokaIdentityCache::new(config.cache_capacity),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                resolver,
            }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the identity resolver.
    #[must_use]
    pub fn resolver(&self) -> &AppResolver {
        &self.inner.resolver
    }

    /// Beacon repository handle for the provisioning-side status write.
    #[must_use]
    pub fn beacons(&self) -> PgBeaconRepository {
        PgBeaconRepository::new(self.inner.pool.clone())
    }
}
