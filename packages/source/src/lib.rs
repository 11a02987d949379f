#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading of statistical rows and county boundaries.
//!
//! Upstream data arrives as CSV exports or JSON arrays of flat records, plus
//! one `GeoJSON` county layer. This crate parses those into the post-parse
//! shapes the pipeline consumes: [`justice_map_stats_models::Row`] values
//! and `geojson::Feature` collections. Fetching (spreadsheet API, HTTP) is a
//! separate concern and does not live here.

pub mod boundaries;
pub mod rows;

use thiserror::Error;

pub use boundaries::read_county_features;
pub use rows::{filter_rows, read_rows_csv, read_rows_json};

/// Errors that can occur while loading upstream data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// GeoJSON parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The GeoJSON document was not a feature collection.
    #[error("Expected a GeoJSON FeatureCollection, got {kind}")]
    NotAFeatureCollection {
        /// The GeoJSON kind that was actually found.
        kind: &'static str,
    },
}
