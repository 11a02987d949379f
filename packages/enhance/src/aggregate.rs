//! Per-county aggregation pass.
//!
//! A single pass over the caller-filtered rows, accumulating the selected
//! metric per county. The county prison dataset additionally derives a
//! per-row total cost (`Cost_per_prisoner * Imprisonments`) and collects the
//! inputs for the positive-observation average cost.

use std::collections::BTreeMap;

use justice_map_enhance_models::CountyAggregate;
use justice_map_stats_models::{
    COST_PER_PRISONER_FIELD, DataSourceKind, IMPRISONMENTS_FIELD, Row, TOTAL_COST_METRIC,
};

/// Groups rows by county and accumulates per-metric sums.
///
/// Rows are expected to be pre-filtered (year, facets, county selection);
/// this pass does no filtering beyond dropping rows with no county. Counties
/// with no matching rows have no entry in the result. Empty input yields an
/// empty map.
///
/// When the derived total-cost metric is selected on the cost dataset, the
/// per-row column sum is skipped (the total comes from the derived pass) but
/// the row count still increments.
#[must_use]
pub fn aggregate(
    rows: &[Row],
    selected_metric: &str,
    data_source: DataSourceKind,
) -> BTreeMap<String, CountyAggregate> {
    let cost_dataset = data_source.is_cost_dataset();
    let derived_total = cost_dataset && selected_metric == TOTAL_COST_METRIC;

    let mut aggregates: BTreeMap<String, CountyAggregate> = BTreeMap::new();

    for row in rows {
        if row.county.is_empty() {
            log::debug!("Skipping row with no county (year {})", row.year);
            continue;
        }

        let entry = aggregates.entry(row.county.clone()).or_default();
        entry.row_count += 1;

        if cost_dataset {
            let cost_per_prisoner = row.metric(COST_PER_PRISONER_FIELD);
            let imprisonments = row.metric(IMPRISONMENTS_FIELD);
            entry.total_cost += cost_per_prisoner * imprisonments;

            // Zero and missing costs are excluded from the average so sparse
            // reporting does not bias it toward zero.
            if cost_per_prisoner > 0.0 {
                entry.cost_sum += cost_per_prisoner;
                entry.cost_samples += 1;
            }
        }

        if !derived_total {
            entry.metric_sum += row.metric(selected_metric);
        }
    }

    aggregates
}
