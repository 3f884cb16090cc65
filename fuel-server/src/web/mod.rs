//! Web layer for the fuel station locator.
//!
//! JSON endpoints for station search, station details, recent reviews and
//! review submission.

mod dto;
mod error;
mod routes;
mod state;

#[cfg(test)]
mod routes_tests;

pub use dto::*;
pub use error::{AppError, Endpoint};
pub use routes::create_router;
pub use state::AppState;
