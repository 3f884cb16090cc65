//! Station and review storage.
//!
//! [`Store`] is the seam between the locator and its data. Two
//! implementations are provided:
//! - [`MySqlStore`] talks to MySQL through a `sqlx` connection pool
//! - [`MemoryStore`] keeps everything in process, loaded from a JSON seed
//!   file, for local development and tests
//!
//! Reviews are unique per `(station_id, user_email)`. Both stores enforce
//! this during the insert itself and report [`StoreError::DuplicateReview`].

mod error;
mod memory;
mod mysql;

use async_trait::async_trait;

use crate::domain::{BoundingBox, NewReview, RecentReview, ReviewId, Station, StationId};

pub use error::StoreError;
pub use memory::{MemoryStore, SeedData, SeedReview, SeedStation};
pub use mysql::{DatabaseConfig, MySqlStore};

/// Read and write access to stations and reviews.
#[async_trait]
pub trait Store: Send + Sync {
    /// Stations whose city, address or name contains `query` (case-insensitive),
    /// ordered by name.
    async fn search_text(&self, query: &str, limit: usize) -> Result<Vec<Station>, StoreError>;

    /// Stations with coordinates inside `bounds`, in no particular order.
    async fn stations_within(&self, bounds: &BoundingBox) -> Result<Vec<Station>, StoreError>;

    /// Stations located in any of `cities`, ordered by city then name.
    async fn stations_in_cities(
        &self,
        cities: &[String],
        limit: usize,
    ) -> Result<Vec<Station>, StoreError>;

    /// Look up a single station.
    async fn station(&self, id: StationId) -> Result<Option<Station>, StoreError>;

    /// The newest reviews joined with their station, newest first.
    async fn recent_reviews(&self, limit: usize) -> Result<Vec<RecentReview>, StoreError>;

    /// Insert a review with a server-assigned timestamp.
    ///
    /// Fails with [`StoreError::DuplicateReview`] if the email has already
    /// reviewed the station and [`StoreError::UnknownStation`] if the station
    /// does not exist.
    async fn insert_review(&self, review: &NewReview) -> Result<ReviewId, StoreError>;
}
