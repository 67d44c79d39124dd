//! Run configuration for the alert fetch
//!
//! The endpoint, location and output directory used to be literals; they live
//! here as a plain struct whose `Default` reproduces those literal values.

use std::path::PathBuf;

use thiserror::Error;

/// Sachet location-wise alerts endpoint
pub const DEFAULT_ENDPOINT: &str =
    "https://sachet.ndma.gov.in/cap_public_website/FetchLocationWiseAlerts";

/// Panaji, Goa
pub const DEFAULT_LATITUDE: f64 = 15.4909;
pub const DEFAULT_LONGITUDE: f64 = 73.8278;

/// Search radius around the location, in kilometres
pub const DEFAULT_RADIUS: f64 = 200.0;

/// Value written to `metadata.source` of the cache file
pub const DEFAULT_SOURCE: &str = "Sachet NDMA";

/// File name of the GeoJSON cache inside the data directory
pub const CACHE_FILE_NAME: &str = "goa-sachet-alerts.geojson";

/// File name of the run log inside the data directory
pub const LOG_FILE_NAME: &str = "debug-log.txt";

/// Errors for configuration values that cannot produce a sensible request
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Endpoint URL must not be empty")]
    EmptyEndpoint,

    #[error("Latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("Radius {0} must be a positive number")]
    InvalidRadius(f64),
}

/// Parameters for a single fetch-and-cache run
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Base URL of the alerts API, without query string
    pub endpoint: String,
    /// Latitude of the location to query
    pub latitude: f64,
    /// Longitude of the location to query
    pub longitude: f64,
    /// Search radius around the location
    pub radius: f64,
    /// Directory holding the cache file and the run log
    pub data_dir: PathBuf,
    /// Label recorded as the data source in the cache metadata
    pub source: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            radius: DEFAULT_RADIUS,
            data_dir: default_data_dir(),
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl FetchConfig {
    /// Creates a config with default location and endpoint, writing into `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Full request URL including the location query
    pub fn request_url(&self) -> String {
        format!(
            "{}?lat={}&long={}&radius={}",
            self.endpoint, self.latitude, self.longitude, self.radius
        )
    }

    /// Path of the GeoJSON cache file
    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join(CACHE_FILE_NAME)
    }

    /// Path of the run log
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

    /// Checks that the values describe a usable request
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ConfigError::InvalidLatitude(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ConfigError::InvalidLongitude(self.longitude));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        Ok(())
    }
}

/// `data/` next to the running executable, or `./data` if that can't be resolved
fn default_data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("data")))
        .unwrap_or_else(|| PathBuf::from("data"))
}
