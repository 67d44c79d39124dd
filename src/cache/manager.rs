//! Cache file manager for the alert FeatureCollection
//!
//! Provides a `GeoJsonCache` that writes the collection as pretty-printed JSON
//! in a single overwrite, and reads it back.

use std::fs;
use std::path::{Path, PathBuf};

use crate::data::FeatureCollection;
use crate::error::RunError;

/// Manages the GeoJSON cache file on disk
///
/// The file is replaced wholesale on every write. There is no merging with
/// earlier contents and no history is kept.
#[derive(Debug, Clone)]
pub struct GeoJsonCache {
    /// Path of the cache file
    path: PathBuf,
}

impl GeoJsonCache {
    /// Creates a cache backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the directory holding the cache file exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }

    /// Writes the collection, replacing any previous file
    ///
    /// The collection is serialized in full before the file is touched, so a
    /// serialization failure leaves the previous file intact.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(RunError::Serialize)` or `Err(RunError::Io)` on failure
    pub fn write(&self, collection: &FeatureCollection) -> Result<(), RunError> {
        self.ensure_dir()?;

        let json = serde_json::to_string_pretty(collection).map_err(RunError::Serialize)?;

        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Reads the collection back from disk
    pub fn read(&self) -> Result<FeatureCollection, RunError> {
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|source| RunError::InvalidCache {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Feature;
    use chrono::Utc;
    use serde_json::{json, Map};
    use tempfile::TempDir;

    fn create_test_cache() -> (GeoJsonCache, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = GeoJsonCache::new(temp_dir.path().join("alerts.geojson"));
        (cache, temp_dir)
    }

    fn sample_collection(ids: &[i64]) -> FeatureCollection {
        let features = ids
            .iter()
            .map(|id| {
                let mut properties = Map::new();
                properties.insert("id".to_string(), json!(id));
                Feature::new(properties, json!({"type": "Point", "coordinates": [73.8, 15.5]}))
            })
            .collect();
        FeatureCollection::new(features, "Sachet NDMA", Utc::now())
    }

    #[test]
    fn test_write_creates_file() {
        let (cache, temp_dir) = create_test_cache();

        cache.write(&sample_collection(&[1])).expect("Write should succeed");

        let expected_path = temp_dir.path().join("alerts.geojson");
        assert!(expected_path.exists(), "Cache file should exist");
        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"FeatureCollection\""));
        assert!(content.contains("\"Sachet NDMA\""));
    }

    #[test]
    fn test_write_uses_two_space_indentation() {
        let (cache, _temp_dir) = create_test_cache();

        cache.write(&sample_collection(&[1])).expect("Write should succeed");

        let content = fs::read_to_string(cache.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "{");
        assert_eq!(lines[1], "  \"type\": \"FeatureCollection\",");
        assert_eq!(lines[2], "  \"metadata\": {");
        assert!(lines[3].starts_with("    \"timestamp\": "));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let (cache, _temp_dir) = create_test_cache();
        assert!(matches!(cache.read(), Err(RunError::Io(_))));
    }

    #[test]
    fn test_read_corrupt_file_is_cache_error() {
        let (cache, _temp_dir) = create_test_cache();
        fs::write(cache.path(), "{\"type\": \"FeatureCollection\",").unwrap();

        match cache.read() {
            Err(err @ RunError::InvalidCache { .. }) => {
                assert!(err.to_string().contains("alerts.geojson"));
                assert!(!err.to_string().contains("response body"));
            }
            other => panic!("expected InvalidCache, got {:?}", other),
        }
    }

    #[test]
    fn test_read_returns_written_collection() {
        let (cache, _temp_dir) = create_test_cache();
        let original = sample_collection(&[1, 2, 3]);

        cache.write(&original).expect("Write should succeed");
        let result = cache.read().expect("Should read cache");

        assert_eq!(result, original);
    }

    #[test]
    fn test_write_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("data");
        let cache = GeoJsonCache::new(nested_path.join("alerts.geojson"));

        cache.write(&sample_collection(&[1])).expect("Write should succeed");

        assert!(nested_path.exists(), "Nested directory should be created");
        assert!(nested_path.join("alerts.geojson").exists());
    }

    #[test]
    fn test_overwrite_existing_cache() {
        let (cache, _temp_dir) = create_test_cache();

        cache.write(&sample_collection(&[1, 2, 3])).expect("First write should succeed");
        cache.write(&sample_collection(&[9])).expect("Second write should succeed");

        let result = cache.read().expect("Should read cache");
        assert_eq!(result.metadata.count, 1);
        assert_eq!(result.features[0].properties["id"], json!(9));
    }

    #[test]
    fn test_ensure_dir_with_bare_file_name() {
        let cache = GeoJsonCache::new("alerts.geojson");
        assert!(cache.ensure_dir().is_ok());
    }
}
