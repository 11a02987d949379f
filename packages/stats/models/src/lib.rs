#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Statistical row and dataset category types.
//!
//! A [`Row`] is one record from an upstream tabular dataset (arrests, jail
//! populations, county prison costs, demographics), keyed by county and year
//! with the remaining columns kept dynamically. [`DataSourceKind`] is the
//! closed set of dataset categories governing which metrics and derived
//! calculations apply.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Derived metric name for the county prison dataset's total imprisonment
/// cost. Not a real column: the value is computed per row as
/// `Cost_per_prisoner * Imprisonments` and summed per county.
pub const TOTAL_COST_METRIC: &str = "Total_Cost";

/// Column holding the per-prisoner cost in the county prison dataset.
pub const COST_PER_PRISONER_FIELD: &str = "Cost_per_prisoner";

/// Column holding the imprisonment count in the county prison dataset.
pub const IMPRISONMENTS_FIELD: &str = "Imprisonments";

/// Category of upstream dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceKind {
    /// County-level arrest counts.
    Arrest,
    /// County jail population counts.
    Jail,
    /// County prison imprisonments with per-prisoner cost columns.
    CountyPrison,
    /// County demographic reference data.
    Demographics,
}

impl DataSourceKind {
    /// Whether this dataset carries per-prisoner cost columns and the
    /// derived [`TOTAL_COST_METRIC`].
    #[must_use]
    pub const fn is_cost_dataset(self) -> bool {
        matches!(self, Self::CountyPrison)
    }
}

impl std::fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arrest => write!(f, "arrest"),
            Self::Jail => write!(f, "jail"),
            Self::CountyPrison => write!(f, "county_prison"),
            Self::Demographics => write!(f, "demographics"),
        }
    }
}

/// One record from an upstream dataset.
///
/// Upstream sources disagree on which columns exist, so everything beyond the
/// county/year keys is kept as dynamic fields and read through
/// [`Row::metric`], which applies the lenient numeric coercion the rest of
/// the pipeline relies on. Unknown columns are permitted and ignored unless
/// a selected metric references them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// County name keying all aggregation. Empty when the source record had
    /// no usable county; such rows are excluded from aggregation.
    #[serde(rename = "County", default)]
    pub county: String,
    /// Reporting year. Defaults to 0 when missing or unparseable.
    #[serde(rename = "Year", default, deserialize_with = "lenient_year")]
    pub year: i32,
    /// Remaining columns, keyed by column name.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Row {
    /// Creates a row with no metric fields.
    #[must_use]
    pub fn new(county: impl Into<String>, year: i32) -> Self {
        Self {
            county: county.into(),
            year,
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field, builder-style.
    #[must_use]
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Reads a metric column as a number.
    ///
    /// Missing columns and values that are not numbers or numeric strings
    /// coerce to `0.0`. Partial data is expected in these datasets, so this
    /// is silent tolerance, not an error path.
    #[must_use]
    pub fn metric(&self, name: &str) -> f64 {
        self.fields.get(name).map_or(0.0, coerce_number)
    }
}

/// Coerces a dynamic JSON value to a number, treating anything that is not a
/// number or a parseable numeric string as `0.0`.
#[must_use]
pub fn coerce_number(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Deserializes a year that may arrive as a JSON number or a numeric string.
#[allow(clippy::cast_possible_truncation)]
fn lenient_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match &value {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or(0) as i32,
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_numbers_and_numeric_strings() {
        assert!((coerce_number(&serde_json::json!(42.5)) - 42.5).abs() < f64::EPSILON);
        assert!((coerce_number(&serde_json::json!("17")) - 17.0).abs() < f64::EPSILON);
        assert!((coerce_number(&serde_json::json!(" 3.5 ")) - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn coerces_garbage_to_zero() {
        assert!(coerce_number(&serde_json::json!("N/A")).abs() < f64::EPSILON);
        assert!(coerce_number(&serde_json::json!(null)).abs() < f64::EPSILON);
        assert!(coerce_number(&serde_json::json!(true)).abs() < f64::EPSILON);
        assert!(coerce_number(&serde_json::json!([1, 2])).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_metric_reads_as_zero() {
        let row = Row::new("Alameda", 2020);
        assert!(row.metric("Total_Arrests").abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_row_with_string_year() {
        let row: Row = serde_json::from_str(
            r#"{"County": "Kern", "Year": "2019", "Total_Arrests": 1234}"#,
        )
        .unwrap();
        assert_eq!(row.county, "Kern");
        assert_eq!(row.year, 2019);
        assert!((row.metric("Total_Arrests") - 1234.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_row_without_county() {
        let row: Row = serde_json::from_str(r#"{"Year": 2020}"#).unwrap();
        assert!(row.county.is_empty());
    }

    #[test]
    fn data_source_kind_serde_is_snake_case() {
        let json = serde_json::to_string(&DataSourceKind::CountyPrison).unwrap();
        assert_eq!(json, "\"county_prison\"");
        let kind: DataSourceKind = serde_json::from_str("\"arrest\"").unwrap();
        assert_eq!(kind, DataSourceKind::Arrest);
    }

    #[test]
    fn only_county_prison_is_cost_bearing() {
        assert!(DataSourceKind::CountyPrison.is_cost_dataset());
        assert!(!DataSourceKind::Arrest.is_cost_dataset());
        assert!(!DataSourceKind::Jail.is_cost_dataset());
        assert!(!DataSourceKind::Demographics.is_cost_dataset());
    }
}
