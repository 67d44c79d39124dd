//! Command-line interface parsing for sachet-cache
//!
//! Every flag is optional. Without flags the run uses the built-in endpoint,
//! the Goa location and the `data/` directory next to the executable.

use std::path::PathBuf;

use clap::Parser;

use crate::config::FetchConfig;

/// Fetch Sachet disaster alerts and cache them as GeoJSON
#[derive(Parser, Debug)]
#[command(name = "sachet-cache")]
#[command(about = "Fetch Sachet disaster alerts and cache them as a GeoJSON FeatureCollection")]
#[command(version)]
pub struct Cli {
    /// Alerts API endpoint, without query string
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Latitude of the location to query
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of the location to query
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Search radius around the location
    #[arg(long, value_name = "KM")]
    pub radius: Option<f64>,

    /// Directory for the cache file and run log
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    /// Builds the run configuration, applying flags over the defaults
    pub fn into_config(self) -> FetchConfig {
        let mut config = FetchConfig::default();
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(lat) = self.lat {
            config.latitude = lat;
        }
        if let Some(lon) = self.lon {
            config.longitude = lon;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        config
    }
}
