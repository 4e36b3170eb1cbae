//! USGS daily discharge file reader
//!
//! Reads whitespace-delimited daily discharge exports as published by USGS
//! water services. Files carry a block of `#` comment lines followed by a
//! column-name row, an RDB field-format row, and one data row per day:
//!
//! ```text
//! agency_cd  site_no    datetime    discharge  quality
//! USGS       03335000   2014-10-01  15.2       A
//! ```
//!
//! Missing-value handling: sentinel codes, empty fields, and non-positive
//! values all load as absent discharge, and the reader reports how many
//! absent values the file produced.

mod record_parser;

#[cfg(test)]
mod tests;

use std::path::Path;
use tracing::{debug, info};

use crate::app::models::DailySeries;
use crate::{Error, Result};
use record_parser::{looks_like_data_row, parse_data_row};

/// Read a daily discharge file into a date-ordered series
///
/// Returns the series and the number of records without a usable discharge
/// value. Comment and header rows are skipped; a malformed row after data has
/// started is a format error.
pub fn read_discharge(path: &Path) -> Result<(DailySeries, usize)> {
    let file_name = path.display().to_string();
    info!("Reading discharge file: {}", file_name);

    if !path.exists() {
        return Err(Error::file_not_found(&file_name));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read '{}'", file_name), e))?;

    let mut records = Vec::new();
    let mut data_started = false;

    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if !data_started && !looks_like_data_row(trimmed) {
            // Column-name row or RDB format row ahead of the data block
            debug!("Skipping header line {}: {}", line_no + 1, trimmed);
            continue;
        }
        data_started = true;

        records.push(parse_data_row(trimmed, &file_name, line_no + 1)?);
    }

    let series = DailySeries::new(records);
    let missing = series.missing_count();
    info!(
        "Loaded {} records from {} ({} missing)",
        series.len(),
        file_name,
        missing
    );

    Ok((series, missing))
}
