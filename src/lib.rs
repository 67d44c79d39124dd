//! Sachet alert cache library
//!
//! Fetches disaster alerts from the NDMA Sachet API and caches them as a
//! GeoJSON FeatureCollection. Modules are exposed for the binary and for
//! integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod pipeline;
