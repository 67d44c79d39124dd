//! Cache module for storing the alert FeatureCollection on disk
//!
//! The cache is a single GeoJSON file meant for static hosting. It is
//! overwritten on every successful run; there is no expiry or eviction.

mod manager;

pub use manager::GeoJsonCache;
