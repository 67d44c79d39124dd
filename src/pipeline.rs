//! Fetch-and-cache pipeline
//!
//! Runs the whole job once: fetch alerts, validate, convert to GeoJSON and
//! overwrite the cache file, logging each step. Errors are returned to the
//! caller; nothing here exits the process.

use std::path::PathBuf;

use chrono::Utc;

use crate::cache::GeoJsonCache;
use crate::config::FetchConfig;
use crate::data::{iso_timestamp, to_feature_collection, SachetClient};
use crate::error::RunError;
use crate::logging::RunLog;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of features written
    pub count: usize,
    /// Path of the cache file
    pub path: PathBuf,
    /// Value written to `metadata.timestamp`
    pub timestamp: String,
}

/// Runs one fetch-and-cache cycle for `config`
///
/// Creates the data directory and truncates the run log before fetching. A
/// failure after the log is open is recorded in it before being returned.
pub async fn run(config: &FetchConfig) -> Result<RunSummary, RunError> {
    config.validate()?;

    let cache = GeoJsonCache::new(config.cache_path());
    cache.ensure_dir()?;

    let mut log = RunLog::create(config.log_path())?;
    let client = SachetClient::new(config);

    match fetch_and_cache(&client, &cache, &mut log, &config.source).await {
        Ok(summary) => Ok(summary),
        Err(e) => {
            log.failure(&e);
            Err(e)
        }
    }
}

/// Fetches alerts with `client` and writes them to `cache`
///
/// The cache file is written by a single call after every alert has been
/// converted, so any failure leaves the previous file as it was.
pub async fn fetch_and_cache(
    client: &SachetClient,
    cache: &GeoJsonCache,
    log: &mut RunLog,
    source: &str,
) -> Result<RunSummary, RunError> {
    log.info("Starting data fetch");
    log.info(format!("Fetching alerts from {}", client.url()));

    let alerts = client.fetch_alerts().await?;
    log.info(format!("Received {} alerts", alerts.len()));
    if alerts.is_empty() {
        log.warn("No active alerts for this location; writing an empty collection");
    }

    let now = Utc::now();
    let collection = to_feature_collection(alerts, source, now)?;
    log.info(format!(
        "Converted {} alerts to GeoJSON features",
        collection.metadata.count
    ));

    cache.write(&collection)?;
    log.info(format!("Wrote {}", cache.path().display()));
    log.info("Data fetch and cache completed successfully");

    Ok(RunSummary {
        count: collection.metadata.count,
        path: cache.path().to_path_buf(),
        timestamp: iso_timestamp(now),
    })
}
