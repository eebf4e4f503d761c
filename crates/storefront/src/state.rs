//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use waterlife_core::models::Product;

use crate::config::StorefrontConfig;

/// How long cached catalog reads stay fresh.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(60);

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CatalogCacheKey {
    /// Featured products on the home page.
    Featured,
    /// A product listing page.
    ProductPage(u32),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    catalog_cache: Cache<CatalogCacheKey, Arc<Vec<Product>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let catalog_cache = Cache::builder()
            .time_to_live(CATALOG_CACHE_TTL)
            .max_capacity(64)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the catalog read cache.
    #[must_use]
    pub fn catalog_cache(&self) -> &Cache<CatalogCacheKey, Arc<Vec<Product>>> {
        &self.inner.catalog_cache
    }
}
