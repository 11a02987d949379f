#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! County aggregation and boundary-feature enhancement.
//!
//! The two passes of the data-enhancement pipeline: [`aggregate::aggregate`]
//! folds filtered rows into per-county accumulators, and
//! [`enhance::enhance`] joins those accumulators onto `GeoJSON` county
//! features with per-capita normalization and zero-defaulting. Both passes
//! are pure and stateless; malformed input degrades silently instead of
//! erroring, because partial data is the norm in these datasets.

pub mod aggregate;
pub mod enhance;

use justice_map_enhance_models::{EnhanceRequest, EnhancedFeature};
use justice_map_geography_models::CountyPopulations;

/// Runs the full pipeline for one request: aggregate, then enhance.
#[must_use]
pub fn run(request: &EnhanceRequest, populations: &CountyPopulations) -> Vec<EnhancedFeature> {
    let aggregates = aggregate::aggregate(
        &request.rows,
        &request.selected_metric,
        request.data_source,
    );
    enhance::enhance(
        &request.features,
        &aggregates,
        &request.selected_metric,
        request.data_source,
        request.per_capita,
        populations,
    )
}
