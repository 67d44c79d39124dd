//! Core data models for the Sachet alert cache
//!
//! This module contains the alert record as received from the API and the
//! GeoJSON types written to the cache file.

pub mod geojson;
pub mod sachet;

pub use geojson::{to_feature, to_feature_collection};
pub use sachet::{parse_envelope, SachetClient};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the alert field holding the geometry as a JSON-encoded string
pub const AREA_JSON_FIELD: &str = "area_json";

/// Expected value of `responseMessage` in a successful API response
pub const SUCCESS_MESSAGE: &str = "Success";

/// One alert from the API: arbitrary properties plus `area_json`
pub type AlertRecord = Map<String, Value>;

/// GeoJSON type tag of a [`Feature`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    Feature,
}

/// GeoJSON type tag of a [`FeatureCollection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCollectionType {
    FeatureCollection,
}

/// An alert reprojected into a GeoJSON feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    /// Every alert field except `area_json`, unchanged
    pub properties: Map<String, Value>,
    /// The parsed `area_json` value
    pub geometry: Value,
}

impl Feature {
    pub fn new(properties: Map<String, Value>, geometry: Value) -> Self {
        Self {
            kind: FeatureType::Feature,
            properties,
            geometry,
        }
    }
}

/// Collection-level information about a cache file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// When the collection was built, ISO-8601 UTC with milliseconds
    pub timestamp: String,
    /// Label of the upstream data source
    pub source: String,
    /// Number of features in the collection
    pub count: usize,
}

/// The cache file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: FeatureCollectionType,
    pub metadata: Metadata,
    /// Features in API response order
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Wraps features with metadata; `count` always matches `features.len()`
    pub fn new(features: Vec<Feature>, source: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind: FeatureCollectionType::FeatureCollection,
            metadata: Metadata {
                timestamp: iso_timestamp(timestamp),
                source: source.into(),
                count: features.len(),
            },
            features,
        }
    }
}

/// Formats a timestamp as `2024-07-15T08:30:00.123Z`
pub fn iso_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
