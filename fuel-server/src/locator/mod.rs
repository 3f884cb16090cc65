//! Station search, station details and reviews.
//!
//! The [`Locator`] is the service behind the HTTP endpoints. It owns no
//! state of its own beyond configuration; all data lives in the injected
//! [`Store`].

mod config;
mod error;
mod reviews;
mod stations;
mod submission;


use std::sync::Arc;

use crate::store::Store;

pub use config::LocatorConfig;
pub use error::LocatorError;
pub use stations::{StationMatch, StationQuery, rank_by_distance};
pub use submission::ReviewSubmission;

/// Station locator service.
#[derive(Clone)]
pub struct Locator {
    store: Arc<dyn Store>,
    config: LocatorConfig,
}

impl Locator {
    /// Create a locator over the given store.
    pub fn new(store: Arc<dyn Store>, config: LocatorConfig) -> Self {
        Self { store, config }
    }
}
