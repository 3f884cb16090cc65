//! Geographic coordinates and great-circle distance.

use super::DomainError;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude on a sphere of radius [`EARTH_RADIUS_KM`].
const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// A validated latitude/longitude pair in degrees.
///
/// Latitude is always in `[-90, 90]` and longitude in `[-180, 180]`.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::Coordinate;
///
/// let delhi = Coordinate::new(28.6139, 77.2090).unwrap();
/// assert_eq!(delhi.latitude(), 28.6139);
///
/// assert!(Coordinate::new(90.5, 0.0).is_err());
/// assert!(Coordinate::new(0.0, -181.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(DomainError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build a coordinate from optional stored columns.
    ///
    /// Returns `None` when either half is missing or the pair is invalid.
    pub fn from_columns(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Self::new(latitude?, longitude?).ok()
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres (Haversine formula).
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// A latitude/longitude box containing every point within `radius_km`.
    ///
    /// Used to pre-filter candidates before exact distances are computed.
    /// Near the poles or across the antimeridian the longitude range widens
    /// to the full `[-180, 180]`.
    pub fn bounding_box(&self, radius_km: f64) -> BoundingBox {
        let lat_delta = radius_km / KM_PER_DEGREE;
        let min_latitude = (self.latitude - lat_delta).max(-90.0);
        let max_latitude = (self.latitude + lat_delta).min(90.0);

        let full_longitude = BoundingBox {
            min_latitude,
            max_latitude,
            min_longitude: -180.0,
            max_longitude: 180.0,
        };

        if min_latitude <= -90.0 || max_latitude >= 90.0 {
            return full_longitude;
        }

        // Widest longitude span occurs at the box edge closest to a pole.
        let extreme_lat = min_latitude.abs().max(max_latitude.abs()).to_radians();
        let lon_delta = lat_delta / extreme_lat.cos();
        let min_longitude = self.longitude - lon_delta;
        let max_longitude = self.longitude + lon_delta;

        if !lon_delta.is_finite() || min_longitude < -180.0 || max_longitude > 180.0 {
            return full_longitude;
        }

        BoundingBox {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }
}

/// Inclusive latitude/longitude bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Whether the coordinate lies inside the box.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&coordinate.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&coordinate.longitude)
    }
}

/// Round a distance to two decimal places for display.
pub fn round_km(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}
