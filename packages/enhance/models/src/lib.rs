#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Types flowing through the enhancement pipeline.
//!
//! [`CountyAggregate`] is the per-county accumulator the aggregation pass
//! produces; [`EnhancedFeature`] is the typed per-county output the
//! enhancement pass joins onto boundary features. [`EnhanceRequest`] and
//! [`EnhanceResponse`] are the message contract across the worker boundary.

use serde::{Deserialize, Serialize};

use justice_map_stats_models::{DataSourceKind, Row};

/// Per-county accumulator built fresh on every aggregation pass.
///
/// The cost fields only accumulate for the county prison dataset; for every
/// other dataset they stay at zero and are never surfaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyAggregate {
    /// Running sum of the selected metric column.
    pub metric_sum: f64,
    /// Number of rows aggregated for this county.
    pub row_count: u64,
    /// Sum of `cost_per_prisoner * imprisonments` across all rows.
    pub total_cost: f64,
    /// Sum of strictly-positive per-prisoner cost observations.
    pub cost_sum: f64,
    /// Count of strictly-positive per-prisoner cost observations.
    pub cost_samples: u64,
}

impl CountyAggregate {
    /// Arithmetic mean per-prisoner cost over the strictly-positive
    /// observations, or `None` when no such observation exists. Zero and
    /// missing costs are excluded so sparse data does not drag the average
    /// toward zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_cost(&self) -> Option<f64> {
        (self.cost_samples > 0).then(|| self.cost_sum / self.cost_samples as f64)
    }
}

/// A county boundary feature joined with its computed statistics.
///
/// One of these exists per input boundary feature, always, even when no rows
/// matched the county (all-zero values). The selected metric is carried as an
/// explicit `metric` name + `display_value` pair rather than a dynamically
/// keyed property; [`EnhancedFeature::into_feature`] rebuilds the dynamic
/// `GeoJSON` shape the rendering layer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedFeature {
    /// County name, `"Unknown"` when the boundary carried no name property.
    pub name: String,
    /// Name of the selected metric the display value was computed for.
    pub metric: String,
    /// Value the map should color/label by: the per-capita value when
    /// per-capita mode is active and defined, otherwise the raw value.
    pub display_value: f64,
    /// Unnormalized aggregate (or derived total cost) for the county.
    pub raw_value: f64,
    /// Population-normalized value, when requested and computable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_capita_value: Option<f64>,
    /// Number of rows aggregated into this feature.
    pub row_count: u64,
    /// Summed imprisonment cost; only present for the county prison dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost_value: Option<f64>,
    /// Mean per-prisoner cost; only present for the county prison dataset
    /// with at least one positive cost observation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_cost_per_prisoner_value: Option<f64>,
    /// Boundary geometry carried over from the input feature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<geojson::Geometry>,
}

impl EnhancedFeature {
    /// Rebuilds a `GeoJSON` feature for the rendering layer.
    ///
    /// The display value is written under the property key equal to the
    /// metric name so downstream coloring and tooltips can keep reading
    /// `properties[selectedMetric]` generically.
    #[must_use]
    pub fn into_feature(self) -> geojson::Feature {
        let mut properties = geojson::JsonObject::new();
        properties.insert("name".to_string(), serde_json::json!(self.name));
        properties.insert(self.metric, serde_json::json!(self.display_value));
        properties.insert("rawValue".to_string(), serde_json::json!(self.raw_value));
        properties.insert("rowCount".to_string(), serde_json::json!(self.row_count));
        if let Some(per_capita) = self.per_capita_value {
            properties.insert("perCapitaValue".to_string(), serde_json::json!(per_capita));
        }
        if let Some(total_cost) = self.total_cost_value {
            properties.insert("totalCostValue".to_string(), serde_json::json!(total_cost));
        }
        if let Some(avg_cost) = self.avg_cost_per_prisoner_value {
            properties.insert(
                "avgCostPerPrisonerValue".to_string(),
                serde_json::json!(avg_cost),
            );
        }

        geojson::Feature {
            bbox: None,
            geometry: self.geometry,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// One enhancement computation request sent across the worker boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    /// County boundary features to enhance.
    pub features: Vec<geojson::Feature>,
    /// Rows already filtered by the caller (year, facets, county selection).
    pub rows: Vec<Row>,
    /// Metric column (or derived metric name) to aggregate and display.
    pub selected_metric: String,
    /// Dataset category governing derived calculations.
    pub data_source: DataSourceKind,
    /// Whether to normalize by county population.
    pub per_capita: bool,
}

/// Result of an enhancement computation.
///
/// Serializes either as the enhanced feature array or as an
/// `{"error": "..."}` object; callers distinguish the two by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnhanceResponse {
    /// Successful computation: one enhanced feature per input feature.
    Features(Vec<EnhancedFeature>),
    /// The computation failed; the message describes the fault.
    Error {
        /// Human-readable failure description.
        error: String,
    },
}
