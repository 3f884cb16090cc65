//! Search and listing configuration for the locator.

/// Cities returned when a search has no parameters.
const DEFAULT_CITIES: [&str; 4] = ["New Delhi", "Gurugram", "Noida", "Faridabad"];

/// Configuration parameters for station search and review listing.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Maximum results for a text search.
    pub text_limit: usize,

    /// Only stations closer than this (kilometres) are returned by a
    /// geographic search.
    pub radius_km: f64,

    /// Maximum results for a geographic search.
    pub nearby_limit: usize,

    /// Cities listed when no search parameters are given.
    pub default_cities: Vec<String>,

    /// Maximum results for the default listing.
    pub default_limit: usize,

    /// Number of recent reviews to list.
    pub review_limit: usize,
}

impl LocatorConfig {
    /// Set the geographic search radius.
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Set the cities used for the default listing.
    pub fn with_default_cities(mut self, cities: Vec<String>) -> Self {
        self.default_cities = cities;
        self
    }

    /// Set how many recent reviews are listed.
    pub fn with_review_limit(mut self, limit: usize) -> Self {
        self.review_limit = limit;
        self
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            text_limit: 50,
            radius_km: 100.0,
            nearby_limit: 50,
            default_cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
            default_limit: 20,
            review_limit: 15,
        }
    }
}
