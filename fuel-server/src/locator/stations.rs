//! Station search and detail lookup.

use tracing::debug;

use crate::domain::{Coordinate, Station, StationId, round_km};

use super::{Locator, LocatorError};

/// What a station search is looking for.
#[derive(Debug, Clone, PartialEq)]
pub enum StationQuery {
    /// Substring of city, address or name
    Text(String),
    /// Stations near a point
    Nearby(Coordinate),
    /// No parameters: the default city listing
    Default,
}

impl StationQuery {
    /// Interpret raw query parameters.
    ///
    /// A non-blank `city` wins. Otherwise `lat` and `lon` must be given
    /// together and be valid coordinates. With neither, the default listing
    /// is used.
    pub fn from_params(
        city: Option<&str>,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<Self, LocatorError> {
        if let Some(city) = non_blank(city) {
            return Ok(StationQuery::Text(city.to_string()));
        }

        match (non_blank(lat), non_blank(lon)) {
            (None, None) => Ok(StationQuery::Default),
            (Some(lat), Some(lon)) => {
                let coordinate = Coordinate::new(parse_degrees(lat)?, parse_degrees(lon)?)
                    .map_err(LocatorError::input)?;
                Ok(StationQuery::Nearby(coordinate))
            }
            _ => Err(LocatorError::InvalidInput(
                "Both lat and lon are required for a location search".to_string(),
            )),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_degrees(raw: &str) -> Result<f64, LocatorError> {
    raw.parse()
        .map_err(|_| LocatorError::InvalidInput("Invalid coordinates provided".to_string()))
}

/// A search result, with distance for geographic searches.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMatch {
    pub station: Station,
    /// Kilometres from the search point, rounded to two decimals
    pub distance_km: Option<f64>,
}

impl StationMatch {
    fn without_distance(station: Station) -> Self {
        Self {
            station,
            distance_km: None,
        }
    }
}

/// Rank candidates by distance from `origin`.
///
/// Stations without coordinates are dropped, as are those whose rounded
/// distance is not below `radius_km`. The rest are ordered nearest first
/// (ties by name) and truncated to `limit`.
pub fn rank_by_distance(
    origin: &Coordinate,
    candidates: Vec<Station>,
    radius_km: f64,
    limit: usize,
) -> Vec<StationMatch> {
    let mut ranked: Vec<StationMatch> = candidates
        .into_iter()
        .filter_map(|station| {
            let distance = round_km(origin.distance_km(&station.coordinate?));
            (distance < radius_km).then_some(StationMatch {
                station,
                distance_km: Some(distance),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        let da = a.distance_km.unwrap_or(f64::INFINITY);
        let db = b.distance_km.unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
            .then_with(|| a.station.name.cmp(&b.station.name))
            .then_with(|| a.station.id.cmp(&b.station.id))
    });
    ranked.truncate(limit);
    ranked
}

impl Locator {
    /// Search for stations.
    pub async fn search(&self, query: &StationQuery) -> Result<Vec<StationMatch>, LocatorError> {
        let matches: Vec<StationMatch> = match query {
            StationQuery::Text(text) => self
                .store
                .search_text(text, self.config.text_limit)
                .await?
                .into_iter()
                .map(StationMatch::without_distance)
                .collect(),
            StationQuery::Nearby(origin) => {
                let bounds = origin.bounding_box(self.config.radius_km);
                let candidates = self.store.stations_within(&bounds).await?;
                debug!(candidates = candidates.len(), "geographic candidates");
                rank_by_distance(
                    origin,
                    candidates,
                    self.config.radius_km,
                    self.config.nearby_limit,
                )
            }
            StationQuery::Default => self
                .store
                .stations_in_cities(&self.config.default_cities, self.config.default_limit)
                .await?
                .into_iter()
                .map(StationMatch::without_distance)
                .collect(),
        };

        debug!(?query, results = matches.len(), "station search");
        Ok(matches)
    }

    /// Fetch one station by its raw `id` parameter.
    pub async fn station_details(&self, id: Option<&str>) -> Result<Station, LocatorError> {
        let raw: i64 = non_blank(id)
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| {
                LocatorError::InvalidInput(
                    "Station ID is required and must be a valid number.".to_string(),
                )
            })?;

        let id = StationId::new(raw)
            .map_err(|_| LocatorError::InvalidInput("Invalid station ID provided".to_string()))?;

        self.store
            .station(id)
            .await?
            .ok_or_else(|| LocatorError::NotFound(format!("Station not found with ID: {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: i64, name: &str, lat: f64, lon: f64) -> Station {
        Station {
            id: StationId::new(id).unwrap(),
            name: name.to_string(),
            address: "Main Road".to_string(),
            city: "Somewhere".to_string(),
            state: None,
            coordinate: Coordinate::new(lat, lon).ok(),
            operator_name: None,
            company_type: None,
            establishment_date: None,
            phone: None,
            email: None,
        }
    }

    #[test]
    fn city_parameter_wins() {
        let q = StationQuery::from_params(Some(" Delhi "), Some("28.6"), Some("77.2")).unwrap();
        assert_eq!(q, StationQuery::Text("Delhi".to_string()));
    }

    #[test]
    fn blank_city_falls_through() {
        let q = StationQuery::from_params(Some("   "), None, None).unwrap();
        assert_eq!(q, StationQuery::Default);

        let q = StationQuery::from_params(Some(""), Some("28.6"), Some("77.2")).unwrap();
        assert!(matches!(q, StationQuery::Nearby(_)));
    }

    #[test]
    fn coordinates_must_be_numeric_and_in_range() {
        for (lat, lon) in [
            ("abc", "77.2"),
            ("28.6", "east"),
            ("91", "0"),
            ("0", "-181"),
            ("NaN", "0"),
        ] {
            let result = StationQuery::from_params(None, Some(lat), Some(lon));
            assert!(
                matches!(result, Err(LocatorError::InvalidInput(_))),
                "({lat}, {lon}) should be rejected"
            );
        }
    }

    #[test]
    fn half_a_coordinate_is_invalid() {
        assert!(matches!(
            StationQuery::from_params(None, Some("28.6"), None),
            Err(LocatorError::InvalidInput(_))
        ));
        assert!(matches!(
            StationQuery::from_params(None, None, Some("77.2")),
            Err(LocatorError::InvalidInput(_))
        ));
    }

    #[test]
    fn ranks_nearest_first_within_radius() {
        let origin = Coordinate::new(28.6139, 77.2090).unwrap();
        let candidates = vec![
            station(1, "Far", 28.4089, 77.3178),
            station(2, "Near", 28.6315, 77.2167),
            station(3, "Outside", 19.0760, 72.8777),
            station(4, "Middle", 28.5677, 77.2433),
        ];

        let ranked = rank_by_distance(&origin, candidates, 100.0, 50);
        let names: Vec<_> = ranked.iter().map(|m| m.station.name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Middle", "Far"]);
        assert!(ranked.iter().all(|m| m.distance_km.is_some()));
    }

    #[test]
    fn stations_without_coordinates_are_dropped() {
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let mut s = station(1, "Nowhere", 0.0, 0.0);
        s.coordinate = None;

        assert!(rank_by_distance(&origin, vec![s], 100.0, 50).is_empty());
    }

    #[test]
    fn radius_is_exclusive() {
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let s = station(1, "Edge", 0.0, 1.0);
        let d = round_km(origin.distance_km(&s.coordinate.unwrap()));

        assert!(rank_by_distance(&origin, vec![s.clone()], d, 50).is_empty());
        assert_eq!(rank_by_distance(&origin, vec![s], d + 0.01, 50).len(), 1);
    }

    #[test]
    fn ties_broken_by_name() {
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let candidates = vec![station(1, "Beta", 0.1, 0.0), station(2, "Alpha", 0.1, 0.0)];

        let ranked = rank_by_distance(&origin, candidates, 100.0, 50);
        assert_eq!(ranked[0].station.name, "Alpha");
        assert_eq!(ranked[1].station.name, "Beta");
    }

    #[test]
    fn result_limit_applies() {
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let candidates: Vec<_> = (1..=10)
            .map(|i| station(i, "S", 0.01 * i as f64, 0.0))
            .collect();

        let ranked = rank_by_distance(&origin, candidates, 100.0, 3);
        let ids: Vec<_> = ranked.iter().map(|m| m.station.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
