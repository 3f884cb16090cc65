//! Caching layer for station lookups.
//!
//! Stations are seeded out-of-band and never modified by this service, so
//! single-station lookups (detail pages, review submission existence checks)
//! can be served from memory. Only hits are cached: a missing station is
//! looked up again next time. Reviews always go straight to the store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{BoundingBox, NewReview, RecentReview, ReviewId, Station, StationId};
use crate::store::{Store, StoreError};

/// Configuration for the station cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached stations.
    pub ttl: Duration,

    /// Maximum number of cached stations.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// A [`Store`] wrapper that caches station lookups by ID.
pub struct CachedStore {
    inner: Arc<dyn Store>,
    stations: MokaCache<StationId, Station>,
}

impl CachedStore {
    /// Wrap a store with a station cache.
    pub fn new(inner: Arc<dyn Store>, config: &CacheConfig) -> Self {
        let stations = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, stations }
    }
}

#[async_trait]
impl Store for CachedStore {
    async fn search_text(&self, query: &str, limit: usize) -> Result<Vec<Station>, StoreError> {
        self.inner.search_text(query, limit).await
    }

    async fn stations_within(&self, bounds: &BoundingBox) -> Result<Vec<Station>, StoreError> {
        self.inner.stations_within(bounds).await
    }

    async fn stations_in_cities(
        &self,
        cities: &[String],
        limit: usize,
    ) -> Result<Vec<Station>, StoreError> {
        self.inner.stations_in_cities(cities, limit).await
    }

    async fn station(&self, id: StationId) -> Result<Option<Station>, StoreError> {
        // Try cache first
        if let Some(cached) = self.stations.get(&id).await {
            trace!(%id, "station cache hit");
            return Ok(Some(cached));
        }

        let station = self.inner.station(id).await?;
        if let Some(ref s) = station {
            self.stations.insert(id, s.clone()).await;
        }
        Ok(station)
    }

    async fn recent_reviews(&self, limit: usize) -> Result<Vec<RecentReview>, StoreError> {
        self.inner.recent_reviews(limit).await
    }

    async fn insert_review(&self, review: &NewReview) -> Result<ReviewId, StoreError> {
        self.inner.insert_review(review).await
    }
}
