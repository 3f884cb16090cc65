//! Fuel station records.

use std::fmt;

use chrono::NaiveDate;

use super::{Coordinate, DomainError};

/// Display text used when a station has no usable establishment date.
pub const DATE_NOT_AVAILABLE: &str = "N/A";

/// A positive station identifier.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::StationId;
///
/// assert_eq!(StationId::parse("42").unwrap().get(), 42);
/// assert_eq!(StationId::parse(" 7 ").unwrap().get(), 7);
///
/// assert!(StationId::parse("0").is_err());
/// assert!(StationId::parse("-3").is_err());
/// assert!(StationId::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(u32);

impl StationId {
    /// Create from an integer, which must be positive and fit in `u32`.
    pub fn new(id: i64) -> Result<Self, DomainError> {
        u32::try_from(id)
            .ok()
            .filter(|&id| id > 0)
            .map(StationId)
            .ok_or(DomainError::InvalidStationId)
    }

    /// Parse a decimal integer, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let id: i64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidStationId)?;
        Self::new(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fuel station as stored.
///
/// Optional business fields stay `None` here; display fallbacks are
/// applied by the web layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    /// Present only when both latitude and longitude are stored and valid
    pub coordinate: Option<Coordinate>,
    pub operator_name: Option<String>,
    pub company_type: Option<String>,
    pub establishment_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Station {
    /// Establishment date in `dd-mm-YYYY` form, or `"N/A"`.
    pub fn establishment_date_display(&self) -> String {
        self.establishment_date
            .map(|d| d.format("%d-%m-%Y").to_string())
            .unwrap_or_else(|| DATE_NOT_AVAILABLE.to_string())
    }

    /// Whether `city`, `address` or `name` contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        [&self.city, &self.address, &self.name]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Parse a stored establishment date.
///
/// The zero date (`0000-00-00`) and anything unparseable yield `None`.
pub fn parse_establishment_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
