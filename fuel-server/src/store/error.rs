//! Storage error types.

use crate::domain::StationId;

/// Errors from a station/review store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query preparation or execution failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A review from this email already exists for the station
    #[error("duplicate review for station {station_id}")]
    DuplicateReview { station_id: StationId },

    /// The referenced station does not exist
    #[error("station {station_id} does not exist")]
    UnknownStation { station_id: StationId },

    /// Seed data could not be loaded
    #[error("seed error: {message}")]
    Seed { message: String },

    /// A stored row could not be converted to a domain value
    #[error("invalid row: {message}")]
    InvalidRow { message: String },
}
