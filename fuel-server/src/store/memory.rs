//! In-process store for development and testing without a database.
//!
//! Loads stations (and optionally reviews) from a JSON seed file and keeps
//! reviews submitted at runtime in memory.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::{
    BoundingBox, Coordinate, Email, NewReview, Rating, RecentReview, Review, ReviewId, Station,
    StationId, parse_establishment_date,
};

use super::{Store, StoreError};

/// Contents of a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub stations: Vec<SeedStation>,
    #[serde(default)]
    pub reviews: Vec<SeedReview>,
}

/// A station row as written in a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedStation {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub operator_name: Option<String>,
    pub company_type: Option<String>,
    /// `YYYY-MM-DD`; the zero date is treated as absent
    pub establishment_date: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A review row as written in a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedReview {
    pub station_id: u32,
    pub user_name: String,
    pub user_email: String,
    pub rating: i64,
    pub review_text: String,
    pub created_at: NaiveDateTime,
}

impl SeedStation {
    fn into_station(self) -> Result<Station, StoreError> {
        let id = StationId::new(i64::from(self.id)).map_err(|e| StoreError::Seed {
            message: format!("station {}: {e}", self.id),
        })?;

        Ok(Station {
            id,
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            coordinate: Coordinate::from_columns(self.latitude, self.longitude),
            operator_name: self.operator_name,
            company_type: self.company_type,
            establishment_date: self
                .establishment_date
                .as_deref()
                .and_then(parse_establishment_date),
            phone: self.phone,
            email: self.email,
        })
    }
}

/// Store backed by in-memory collections.
pub struct MemoryStore {
    /// Stations never change after loading.
    stations: BTreeMap<StationId, Station>,
    reviews: RwLock<Vec<Review>>,
}

impl MemoryStore {
    /// Create a store holding the given stations and no reviews.
    ///
    /// Station ids must be unique.
    pub fn new(stations: Vec<Station>) -> Result<Self, StoreError> {
        let mut by_id = BTreeMap::new();
        for station in stations {
            let id = station.id;
            if by_id.insert(id, station).is_some() {
                return Err(StoreError::Seed {
                    message: format!("duplicate station {id}"),
                });
            }
        }

        Ok(Self {
            stations: by_id,
            reviews: RwLock::new(Vec::new()),
        })
    }

    /// Create a store from parsed seed data.
    ///
    /// Seed reviews must reference seeded stations and obey the
    /// one-review-per-email-per-station rule.
    pub fn from_seed(seed: SeedData) -> Result<Self, StoreError> {
        let stations = seed
            .stations
            .into_iter()
            .map(SeedStation::into_station)
            .collect::<Result<Vec<_>, _>>()?;
        let store = Self::new(stations)?;

        let mut reviews = Vec::with_capacity(seed.reviews.len());
        for (index, r) in seed.reviews.into_iter().enumerate() {
            let bad = |message: String| StoreError::Seed {
                message: format!("review {index}: {message}"),
            };

            let station_id =
                StationId::new(i64::from(r.station_id)).map_err(|e| bad(e.to_string()))?;
            if !store.stations.contains_key(&station_id) {
                return Err(bad(format!("unknown station {station_id}")));
            }
            let user_email = Email::parse(&r.user_email).map_err(|e| bad(e.to_string()))?;
            if reviews
                .iter()
                .any(|e: &Review| e.station_id == station_id && e.user_email == user_email)
            {
                return Err(bad(format!("duplicate review for station {station_id}")));
            }

            reviews.push(Review {
                id: ReviewId(index as u64 + 1),
                station_id,
                user_name: r.user_name,
                user_email,
                rating: Rating::new(r.rating).map_err(|e| bad(e.to_string()))?,
                review_text: r.review_text,
                created_at: r.created_at,
            });
        }

        Ok(Self {
            reviews: RwLock::new(reviews),
            ..store
        })
    }

    /// Load a seed file from disk.
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| StoreError::Seed {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let seed: SeedData = serde_json::from_str(&json).map_err(|e| StoreError::Seed {
            message: format!("failed to parse {}: {e}", path.display()),
        })?;
        Self::from_seed(seed)
    }

    /// Number of stations loaded.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of reviews currently stored.
    pub async fn review_count(&self) -> usize {
        self.reviews.read().await.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn search_text(&self, query: &str, limit: usize) -> Result<Vec<Station>, StoreError> {
        let needle = query.trim().to_lowercase();

        let mut matches: Vec<&Station> = self
            .stations
            .values()
            .filter(|s| s.matches_text(&needle))
            .collect();
        matches.sort_by_cached_key(|s| (s.name.to_lowercase(), s.id));

        Ok(matches.into_iter().take(limit).cloned().collect())
    }

    async fn stations_within(&self, bounds: &BoundingBox) -> Result<Vec<Station>, StoreError> {
        Ok(self
            .stations
            .values()
            .filter(|s| s.coordinate.is_some_and(|c| bounds.contains(&c)))
            .cloned()
            .collect())
    }

    async fn stations_in_cities(
        &self,
        cities: &[String],
        limit: usize,
    ) -> Result<Vec<Station>, StoreError> {
        let wanted: Vec<String> = cities.iter().map(|c| c.to_lowercase()).collect();

        let mut matches: Vec<&Station> = self
            .stations
            .values()
            .filter(|s| wanted.contains(&s.city.to_lowercase()))
            .collect();
        matches.sort_by_cached_key(|s| (s.city.to_lowercase(), s.name.to_lowercase(), s.id));

        Ok(matches.into_iter().take(limit).cloned().collect())
    }

    async fn station(&self, id: StationId) -> Result<Option<Station>, StoreError> {
        Ok(self.stations.get(&id).cloned())
    }

    async fn recent_reviews(&self, limit: usize) -> Result<Vec<RecentReview>, StoreError> {
        let reviews = self.reviews.read().await;

        let mut newest: Vec<&Review> = reviews.iter().collect();
        newest.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(newest
            .into_iter()
            .filter_map(|r| {
                let station = self.stations.get(&r.station_id)?;
                Some(RecentReview {
                    id: r.id,
                    rating: r.rating,
                    review_text: r.review_text.clone(),
                    user_name: r.user_name.clone(),
                    station_name: station.name.clone(),
                    city: Some(station.city.clone()),
                    created_at: r.created_at,
                })
            })
            .take(limit)
            .collect())
    }

    async fn insert_review(&self, review: &NewReview) -> Result<ReviewId, StoreError> {
        if !self.stations.contains_key(&review.station_id) {
            return Err(StoreError::UnknownStation {
                station_id: review.station_id,
            });
        }

        // Check and insert under one write lock so concurrent submissions
        // cannot both pass the duplicate check.
        let mut reviews = self.reviews.write().await;
        if reviews
            .iter()
            .any(|r| r.station_id == review.station_id && r.user_email == review.user_email)
        {
            return Err(StoreError::DuplicateReview {
                station_id: review.station_id,
            });
        }

        let id = ReviewId(reviews.iter().map(|r| r.id.0).max().unwrap_or(0) + 1);
        reviews.push(Review {
            id,
            station_id: review.station_id,
            user_name: review.user_name.clone(),
            user_email: review.user_email.clone(),
            rating: review.rating,
            review_text: review.review_text.clone(),
            created_at: Local::now().naive_local(),
        });

        Ok(id)
    }
}
