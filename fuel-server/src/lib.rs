//! Fuel station locator server.
//!
//! A JSON API for finding fuel stations by city or by location, viewing
//! station details, and reading and submitting station reviews.

pub mod cache;
pub mod config;
pub mod domain;
pub mod locator;
pub mod store;
pub mod web;
