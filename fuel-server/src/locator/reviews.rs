//! Review listing and submission.

use tracing::{info, warn};

use crate::domain::{RecentReview, ReviewId};
use crate::store::StoreError;

use super::{Locator, LocatorError, ReviewSubmission};

impl Locator {
    /// The most recent reviews across all stations, newest first.
    pub async fn recent_reviews(&self) -> Result<Vec<RecentReview>, LocatorError> {
        Ok(self.store.recent_reviews(self.config.review_limit).await?)
    }

    /// Validate and store a review.
    ///
    /// The station must exist and the email must not have reviewed it
    /// before. The uniqueness check is enforced by the store, so concurrent
    /// duplicates resolve to exactly one success.
    pub async fn submit_review(
        &self,
        submission: &ReviewSubmission,
    ) -> Result<ReviewId, LocatorError> {
        let review = submission.validate()?;

        if self.store.station(review.station_id).await?.is_none() {
            return Err(station_not_found());
        }

        match self.store.insert_review(&review).await {
            Ok(id) => {
                info!(
                    %id,
                    station_id = %review.station_id,
                    rating = review.rating.get(),
                    "review submitted"
                );
                Ok(id)
            }
            Err(StoreError::DuplicateReview { station_id }) => {
                warn!(%station_id, "duplicate review rejected");
                Err(LocatorError::Conflict(
                    "You have already reviewed this station".to_string(),
                ))
            }
            Err(StoreError::UnknownStation { .. }) => Err(station_not_found()),
            Err(e) => Err(e.into()),
        }
    }
}

fn station_not_found() -> LocatorError {
    LocatorError::NotFound("Station not found".to_string())
}
