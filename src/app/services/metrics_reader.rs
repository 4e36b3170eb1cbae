//! Metrics table reader
//!
//! Loads the pre-computed annual and monthly metrics CSVs. Both share the same
//! shape: a header row, a `Date` index column, a `Station` key column, and a
//! set of named numeric metric columns (mean flow, TQmean, R-B index, peak
//! flow, ...). Cells that do not parse as numbers are simply skipped; the
//! tables encode their own missing values and need no further coercion.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::info;

use crate::app::models::{Gauge, MetricsRow, MetricsTable};
use crate::constants::{DATE_FORMAT, columns};
use crate::{Error, Result};

/// Read a metrics CSV into a table indexed by date
///
/// `Date` and `Station` columns are required; every other column becomes a
/// named metric wherever its cell parses as a number.
pub fn read_metrics(path: &Path) -> Result<MetricsTable> {
    let file_name = path.display().to_string();
    info!("Reading metrics file: {}", file_name);

    if !path.exists() {
        return Err(Error::file_not_found(&file_name));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::csv_parsing(&file_name, "Failed to open metrics file", Some(e)))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::csv_parsing(&file_name, "Failed to read header row", Some(e)))?
        .clone();

    let date_idx = column_index(&headers, columns::DATE, &file_name)?;
    let station_idx = column_index(&headers, columns::STATION, &file_name)?;

    let mut rows = Vec::new();
    for (row_no, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            Error::csv_parsing(
                &file_name,
                format!("Failed to read record {}", row_no + 2),
                Some(e),
            )
        })?;

        let date_field = record.get(date_idx).unwrap_or_default();
        let date = NaiveDate::parse_from_str(date_field, DATE_FORMAT).map_err(|e| {
            Error::date_parsing(
                format!("Invalid date '{}' at {}:{}", date_field, file_name, row_no + 2),
                e,
            )
        })?;

        let station = Gauge::from_str(record.get(station_idx).unwrap_or_default())?;

        let metrics = headers
            .iter()
            .zip(record.iter())
            .filter(|(name, _)| *name != columns::DATE && *name != columns::STATION)
            .filter_map(|(name, cell)| {
                cell.parse::<f64>().ok().map(|v| (name.to_string(), v))
            })
            .collect();

        rows.push(MetricsRow {
            date,
            station,
            metrics,
        });
    }

    info!("Loaded {} metric rows from {}", rows.len(), file_name);
    Ok(MetricsTable::new(rows))
}

/// Find a required column in the header row
fn column_index(headers: &csv::StringRecord, column: &str, file: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::missing_column(file, column))
}
