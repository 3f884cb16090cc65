//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{RecentReview, ReviewId, Station, escape_html, or_fallback};
use crate::locator::StationMatch;

/// Timestamp format used for review creation times.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Query parameters for station search.
///
/// Kept as raw strings so malformed numbers are reported by the locator
/// rather than rejected by the extractor.
#[derive(Debug, Default, PartialEq)]
pub struct StationSearchParams {
    /// City, address or name substring
    pub city: Option<String>,

    /// Latitude in decimal degrees
    pub lat: Option<String>,

    /// Longitude in decimal degrees
    pub lon: Option<String>,
}

impl StationSearchParams {
    /// Build from decoded query pairs. A repeated key keeps its last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "city" => params.city = Some(value),
                "lat" => params.lat = Some(value),
                "lon" => params.lon = Some(value),
                _ => {}
            }
        }
        params
    }
}

/// Query parameters for station details.
#[derive(Debug, Default, PartialEq)]
pub struct StationDetailsParams {
    pub id: Option<String>,
}

impl StationDetailsParams {
    /// Build from decoded query pairs. A repeated key keeps its last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let id = pairs
            .into_iter()
            .filter(|(key, _)| key == "id")
            .map(|(_, value)| value)
            .last();
        Self { id }
    }
}

/// Station fields with display fallbacks applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationFields {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub operator_name: String,
    pub company_type: String,
    /// `YYYY-MM-DD`, or null when unknown
    pub establishment_date: Option<NaiveDate>,
    pub phone: String,
    pub email: String,
}

impl StationFields {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.get(),
            name: or_fallback(Some(&station.name), "Unknown Station"),
            address: or_fallback(Some(&station.address), "Address not available"),
            city: or_fallback(Some(&station.city), "Unknown City"),
            state: or_fallback(station.state.as_deref(), "Not specified"),
            latitude: station.coordinate.map(|c| c.latitude()),
            longitude: station.coordinate.map(|c| c.longitude()),
            operator_name: or_fallback(station.operator_name.as_deref(), "Not specified"),
            company_type: or_fallback(station.company_type.as_deref(), "Private"),
            establishment_date: station.establishment_date,
            phone: or_fallback(station.phone.as_deref(), "Not available"),
            email: or_fallback(station.email.as_deref(), "Not available"),
        }
    }
}

/// A station in search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationResult {
    #[serde(flatten)]
    pub station: StationFields,

    /// Kilometres from the search point, for geographic searches
    pub distance: Option<f64>,
}

impl StationResult {
    pub fn from_match(m: &StationMatch) -> Self {
        Self {
            station: StationFields::from_station(&m.station),
            distance: m.distance_km,
        }
    }
}

/// Full station record for the details endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationDetails {
    #[serde(flatten)]
    pub station: StationFields,

    /// `dd-mm-YYYY`, or `"N/A"`
    pub establishment_date_formatted: String,
}

impl StationDetails {
    pub fn from_station(station: &Station) -> Self {
        Self {
            station: StationFields::from_station(station),
            establishment_date_formatted: station.establishment_date_display(),
        }
    }
}

/// Response for station details.
#[derive(Debug, Serialize)]
pub struct StationDetailsResponse {
    pub status: &'static str,
    pub data: StationDetails,
}

/// A review in the recent reviews listing. Text fields are HTML-escaped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewResult {
    pub id: u64,
    pub rating: u8,
    pub review_text: String,
    pub user_name: String,
    pub station_name: String,
    pub city: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub created_at: String,
}

impl ReviewResult {
    pub fn from_review(review: &RecentReview) -> Self {
        Self {
            id: review.id.0,
            rating: review.rating.get(),
            review_text: escape_html(&review.review_text),
            user_name: escape_html(&review.user_name),
            station_name: escape_html(&review.station_name),
            city: escape_html(review.city.as_deref().unwrap_or_default()),
            created_at: review.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Response for a successful review submission.
#[derive(Debug, Serialize)]
pub struct SubmitReviewResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub review_id: u64,
}

impl SubmitReviewResponse {
    pub fn success(id: ReviewId) -> Self {
        Self {
            status: "success",
            message: "Thank you! Your review has been submitted successfully.",
            review_id: id.0,
        }
    }
}

/// Error body for list endpoints.
#[derive(Debug, Serialize)]
pub struct ListErrorResponse {
    pub error: bool,
    pub message: String,
}

/// Error body for the reviews listing, which always carries an empty list.
#[derive(Debug, Serialize)]
pub struct ReviewsErrorResponse {
    pub error: bool,
    pub message: String,
    pub reviews: Vec<ReviewResult>,
}

/// Error body for status-style endpoints.
#[derive(Debug, Serialize)]
pub struct StatusErrorResponse {
    pub status: &'static str,
    pub message: String,
}
