//! Server configuration from environment variables.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use crate::cache::CacheConfig;
use crate::locator::LocatorConfig;
use crate::store::DatabaseConfig;

const DEFAULT_SEED_FILE: &str = "data/stations.json";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// MySQL settings; `None` means use the in-memory store
    pub database: Option<DatabaseConfig>,

    /// Seed file for the in-memory store
    pub seed_file: PathBuf,

    /// Create tables on startup
    pub apply_schema: bool,

    /// Include internal error text in server-error responses
    pub expose_errors: bool,

    pub locator: LocatorConfig,

    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns the value of a
    /// variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars { lookup: &lookup };

        let bind_addr = vars.parse("FUEL_BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?;

        let database = match vars.get("DATABASE_URL") {
            Some(url) => Some(
                DatabaseConfig::new(url)
                    .with_max_connections(vars.parse("FUEL_DB_MAX_CONNECTIONS", 5)?)
                    .with_acquire_timeout(Duration::from_secs(
                        vars.parse("FUEL_DB_ACQUIRE_TIMEOUT_SECS", 5)?,
                    )),
            ),
            None => None,
        };

        let seed_file = vars
            .get("FUEL_SEED_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_FILE));

        let radius_km: f64 = vars.parse("FUEL_SEARCH_RADIUS_KM", 100.0)?;
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(ConfigError::Invalid {
                key: "FUEL_SEARCH_RADIUS_KM",
                value: radius_km.to_string(),
                reason: "must be a positive number".to_string(),
            });
        }

        let mut locator = LocatorConfig::default()
            .with_radius_km(radius_km)
            .with_review_limit(vars.parse("FUEL_REVIEW_LIMIT", 15)?);
        if let Some(cities) = vars.get("FUEL_DEFAULT_CITIES") {
            locator = locator.with_default_cities(split_list(&cities));
        }

        let cache = CacheConfig {
            ttl: Duration::from_secs(vars.parse("FUEL_CACHE_TTL_SECS", 300)?),
            ..CacheConfig::default()
        };

        Ok(Self {
            bind_addr,
            database,
            seed_file,
            apply_schema: vars.flag("FUEL_APPLY_SCHEMA")?,
            expose_errors: vars.flag("FUEL_EXPOSE_ERRORS")?,
            locator,
            cache,
        })
    }
}

/// Split a comma-separated list, dropping blank entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

struct Vars<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl Vars<'_> {
    /// A variable's trimmed value, treating blank as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        match self.get(key) {
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
            None => {
                debug!("{key} not set, using default: {default}");
                Ok(default)
            }
        }
    }

    /// A boolean flag, off when unset.
    fn flag(&self, key: &'static str) -> Result<bool, ConfigError> {
        let Some(value) = self.get(key) else {
            return Ok(false);
        };

        match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key,
                value,
                reason: "expected true or false".to_string(),
            }),
        }
    }
}
