//! Row loading from CSV and JSON sources.
//!
//! CSV cells are kept as strings; the numeric coercion happens at metric
//! access time, so a column of `"1"`, `"2"`, `"N/A"` aggregates the same way
//! whichever source it came from.

use std::collections::BTreeMap;
use std::io::Read;

use justice_map_stats_models::Row;

use crate::SourceError;

/// Reads rows from a headered CSV export.
///
/// Rows without a `County` value are skipped; the aggregation contract
/// excludes them anyway, and dropping them here keeps the logs near the
/// source of the bad data.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] if the CSV is malformed.
pub fn read_rows_csv<R: Read>(reader: R) -> Result<Vec<Row>, SourceError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize() {
        let record: BTreeMap<String, String> = record?;

        let county = record.get("County").cloned().unwrap_or_default();
        if county.is_empty() {
            log::debug!("Skipping CSV row with no county");
            continue;
        }

        let year = record
            .get("Year")
            .and_then(|y| y.trim().parse().ok())
            .unwrap_or(0);

        let fields = record
            .into_iter()
            .filter(|(name, _)| name != "County" && name != "Year")
            .map(|(name, value)| (name, serde_json::Value::String(value)))
            .collect();

        rows.push(Row {
            county,
            year,
            fields,
        });
    }

    Ok(rows)
}

/// Reads rows from a JSON array of flat records.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the document is not a valid array of
/// records.
pub fn read_rows_json(json: &str) -> Result<Vec<Row>, SourceError> {
    Ok(serde_json::from_str(json)?)
}

/// Caller-side filtering applied before rows enter the aggregation pass.
///
/// `year` of `None` keeps all years; `counties` of `None` keeps all
/// counties. The core assumes this has already happened and performs no
/// filtering of its own.
#[must_use]
pub fn filter_rows(rows: &[Row], year: Option<i32>, counties: Option<&[String]>) -> Vec<Row> {
    rows.iter()
        .filter(|row| year.is_none_or(|y| row.year == y))
        .filter(|row| counties.is_none_or(|selected| selected.contains(&row.county)))
        .cloned()
        .collect()
}
