//! Reprojection of alert records into GeoJSON
//!
//! Each alert's `area_json` string is parsed into the feature geometry and the
//! remaining fields become its properties. The whole batch is converted in one
//! pass; the first malformed record fails the batch.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{AlertRecord, Feature, FeatureCollection, AREA_JSON_FIELD};
use crate::error::RunError;

/// Converts one alert record into a feature
///
/// # Arguments
/// * `index` - Position of the record in the API response, used in errors
/// * `record` - The alert record, consumed
///
/// # Returns
/// * `Ok(Feature)` with `area_json` parsed into `geometry`
/// * `Err(RunError::InvalidAlert)` if `area_json` is missing or not a string
/// * `Err(RunError::InvalidGeometry)` if `area_json` is not valid JSON
pub fn to_feature(index: usize, mut record: AlertRecord) -> Result<Feature, RunError> {
    let area_json = match record.shift_remove(AREA_JSON_FIELD) {
        Some(Value::String(s)) => s,
        Some(other) => {
            return Err(RunError::InvalidAlert {
                index,
                reason: format!("{} is not a string: {}", AREA_JSON_FIELD, other),
            })
        }
        None => {
            return Err(RunError::InvalidAlert {
                index,
                reason: format!("missing {}", AREA_JSON_FIELD),
            })
        }
    };

    let geometry: Value = serde_json::from_str(&area_json)
        .map_err(|source| RunError::InvalidGeometry { index, source })?;

    Ok(Feature::new(record, geometry))
}

/// Converts all alert records and wraps them in a feature collection
///
/// Feature order follows record order. Nothing is returned unless every
/// record converts.
pub fn to_feature_collection(
    records: Vec<AlertRecord>,
    source: &str,
    timestamp: DateTime<Utc>,
) -> Result<FeatureCollection, RunError> {
    let features = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| to_feature(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection::new(features, source, timestamp))
}
