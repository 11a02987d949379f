//! Feature enhancement pass.
//!
//! Joins per-county aggregates onto `GeoJSON` boundary features. Every input
//! feature produces exactly one output feature in input order, so the
//! rendering layer can always draw a complete map even when a county has no
//! data (zeroed values) or is not recognized at all (degraded fallback).

use std::collections::BTreeMap;

use justice_map_enhance_models::{CountyAggregate, EnhancedFeature};
use justice_map_geography_models::{CountyPopulations, county_name};
use justice_map_stats_models::{DataSourceKind, TOTAL_COST_METRIC};

/// Joins aggregates onto boundary features.
///
/// Pure: identical inputs produce identical outputs, and the output length
/// and order always match `features`.
#[must_use]
pub fn enhance(
    features: &[geojson::Feature],
    aggregates: &BTreeMap<String, CountyAggregate>,
    selected_metric: &str,
    data_source: DataSourceKind,
    per_capita: bool,
    populations: &CountyPopulations,
) -> Vec<EnhancedFeature> {
    features
        .iter()
        .map(|feature| {
            enhance_feature(
                feature,
                aggregates,
                selected_metric,
                data_source,
                per_capita,
                populations,
            )
        })
        .collect()
}

fn enhance_feature(
    feature: &geojson::Feature,
    aggregates: &BTreeMap<String, CountyAggregate>,
    selected_metric: &str,
    data_source: DataSourceKind,
    per_capita: bool,
    populations: &CountyPopulations,
) -> EnhancedFeature {
    let geometry = feature.geometry.clone();
    let resolved = county_name(feature);

    let Some(name) = resolved.filter(|name| populations.contains(name)) else {
        log::debug!("County {resolved:?} not in population table, emitting zeroed feature");
        // Degraded fallback for unnamed boundaries and counties missing from
        // the population table. The optional values are zeroed rather than
        // omitted here, unlike the normal path; the rendering layer has
        // always received this shape for unknown counties, so it is kept.
        return EnhancedFeature {
            name: resolved.unwrap_or("Unknown").to_string(),
            metric: selected_metric.to_string(),
            display_value: 0.0,
            raw_value: 0.0,
            per_capita_value: Some(0.0),
            row_count: 0,
            total_cost_value: Some(0.0),
            avg_cost_per_prisoner_value: Some(0.0),
            geometry,
        };
    };

    let aggregate = aggregates.get(name).copied().unwrap_or_default();

    let derived_total = data_source.is_cost_dataset() && selected_metric == TOTAL_COST_METRIC;
    let raw_value = if derived_total {
        aggregate.total_cost
    } else {
        aggregate.metric_sum
    };

    let population = populations.get(name).unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let per_capita_value =
        (per_capita && population > 0).then(|| raw_value / population as f64);

    let (total_cost_value, avg_cost_per_prisoner_value) = if data_source.is_cost_dataset() {
        (Some(aggregate.total_cost), aggregate.avg_cost())
    } else {
        (None, None)
    };

    EnhancedFeature {
        name: name.to_string(),
        metric: selected_metric.to_string(),
        display_value: per_capita_value.unwrap_or(raw_value),
        raw_value,
        per_capita_value,
        row_count: aggregate.row_count,
        total_cost_value,
        avg_cost_per_prisoner_value,
        geometry,
    }
}
