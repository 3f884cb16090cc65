//! Application state for the web layer.

use std::sync::Arc;

use crate::locator::Locator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Station and review service
    pub locator: Arc<Locator>,

    /// Include internal error text in server-error responses
    pub expose_errors: bool,
}

impl AppState {
    /// Create a new app state.
    pub fn new(locator: Locator) -> Self {
        Self {
            locator: Arc::new(locator),
            expose_errors: false,
        }
    }

    pub fn with_expose_errors(mut self, expose_errors: bool) -> Self {
        self.expose_errors = expose_errors;
        self
    }
}
