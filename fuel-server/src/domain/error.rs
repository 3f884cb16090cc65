//! Domain error types.
//!
//! These errors represent values that fail validation before any storage
//! is touched. They are distinct from storage and transport errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range (or not finite)
    #[error("Invalid coordinates provided")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Station ID that is not a positive integer
    #[error("Invalid station ID")]
    InvalidStationId,

    /// Rating outside 1..=5
    #[error("Rating must be between 1 and 5")]
    InvalidRating,

    /// Rating that is not a whole number
    #[error("Rating must be a whole number between 1 and 5")]
    FractionalRating,

    /// Email address that does not look like one
    #[error("Invalid email address")]
    InvalidEmail,

    /// Reviewer name too short or too long
    #[error("Name must be between {min} and {max} characters")]
    InvalidName { min: usize, max: usize },

    /// Review text too short or too long
    #[error("Review must be between {min} and {max} characters")]
    InvalidReviewText { min: usize, max: usize },
}
