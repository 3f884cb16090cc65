//! Core domain types for the fuel station locator.

mod error;
mod geo;
mod review;
mod station;
mod text;

pub use error::DomainError;
pub use geo::{BoundingBox, Coordinate, EARTH_RADIUS_KM, round_km};
pub use review::{
    Email, NAME_LENGTH, NewReview, REVIEW_TEXT_LENGTH, Rating, RecentReview, Review, ReviewId,
    validate_name, validate_review_text,
};
pub use station::{DATE_NOT_AVAILABLE, Station, StationId, parse_establishment_date};
pub use text::{escape_html, or_fallback};
