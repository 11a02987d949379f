#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ranked lists and chart-ready series derived from enhanced features.
//!
//! Pure reformatting of the enhancement output for the sidebar ranking and
//! the bar charts; no aggregation happens here.

use serde::{Deserialize, Serialize};

use justice_map_enhance_models::EnhancedFeature;

/// One entry in a ranked county list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCounty {
    /// County name.
    pub name: String,
    /// The display value the ranking is ordered by.
    pub value: f64,
    /// Number of rows aggregated into the value.
    pub row_count: u64,
}

/// Parallel label/value vectors for chart rendering, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// County names.
    pub labels: Vec<String>,
    /// Display values, index-aligned with `labels`.
    pub values: Vec<f64>,
}

/// Ranks counties by display value.
///
/// `descending` puts the highest values first (the "most arrests" view);
/// ascending is the "lowest per-capita" view. Ties keep the enhancement
/// output order.
#[must_use]
pub fn rank(features: &[EnhancedFeature], limit: usize, descending: bool) -> Vec<RankedCounty> {
    let mut ranked: Vec<RankedCounty> = features
        .iter()
        .map(|feature| RankedCounty {
            name: feature.name.clone(),
            value: feature.display_value,
            row_count: feature.row_count,
        })
        .collect();

    if descending {
        ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    } else {
        ranked.sort_by(|a, b| a.value.total_cmp(&b.value));
    }

    ranked.truncate(limit);
    ranked
}

/// Builds a chart series from enhanced features, preserving input order.
#[must_use]
pub fn series(features: &[EnhancedFeature]) -> ChartSeries {
    ChartSeries {
        labels: features.iter().map(|f| f.name.clone()).collect(),
        values: features.iter().map(|f| f.display_value).collect(),
    }
}
