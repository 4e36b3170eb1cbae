//! Data models for streamflow processing
//!
//! This module contains the core data structures for representing USGS stream
//! gauges, daily discharge records, and the derived metrics tables consumed by
//! the chart renderer.

use crate::constants;
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

// =============================================================================
// Stream Gauge
// =============================================================================

/// The two stream gauges covered by this tool
///
/// Metric tables identify stations by the short keys "Wildcat" and "Tippe";
/// charts label them with the full river names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gauge {
    /// Wildcat Creek near Lafayette, Indiana (USGS 03335000)
    Wildcat,
    /// Tippecanoe River near Ora, Indiana (USGS 03331500)
    Tippecanoe,
}

impl Gauge {
    /// Short station key used in the metrics tables
    pub fn key(&self) -> &'static str {
        match self {
            Gauge::Wildcat => "Wildcat",
            Gauge::Tippecanoe => "Tippe",
        }
    }

    /// Full river name for chart legends
    pub fn river_name(&self) -> &'static str {
        match self {
            Gauge::Wildcat => "Wildcat Creek",
            Gauge::Tippecanoe => "Tippecanoe River",
        }
    }

    /// USGS site number
    pub fn site_no(&self) -> &'static str {
        match self {
            Gauge::Wildcat => constants::WILDCAT_SITE_NO,
            Gauge::Tippecanoe => constants::TIPPECANOE_SITE_NO,
        }
    }

    /// All gauges in plotting order
    pub fn all() -> [Gauge; 2] {
        [Gauge::Wildcat, Gauge::Tippecanoe]
    }
}

impl FromStr for Gauge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Wildcat" => Ok(Gauge::Wildcat),
            "Tippe" => Ok(Gauge::Tippecanoe),
            other => Err(Error::unknown_station(other)),
        }
    }
}

impl std::fmt::Display for Gauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

// =============================================================================
// Quality Code
// =============================================================================

/// USGS approval code attached to each daily discharge value
///
/// The code is carried through loading but does not affect the charts; any
/// unrecognized code is preserved verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityCode {
    /// Approved for publication
    Approved,
    /// Approved, value estimated
    ApprovedEstimated,
    /// Provisional, subject to revision
    Provisional,
    /// Any other code found in the file
    Other(String),
}

impl FromStr for QualityCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "A" => QualityCode::Approved,
            "A:e" => QualityCode::ApprovedEstimated,
            "P" => QualityCode::Provisional,
            other => QualityCode::Other(other.to_string()),
        })
    }
}

impl std::fmt::Display for QualityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityCode::Approved => write!(f, "A"),
            QualityCode::ApprovedEstimated => write!(f, "A:e"),
            QualityCode::Provisional => write!(f, "P"),
            QualityCode::Other(code) => write!(f, "{}", code),
        }
    }
}

// =============================================================================
// Daily Discharge Records
// =============================================================================

/// A single daily discharge observation
///
/// `discharge` is `None` whenever the raw value was absent, flagged with a
/// missing sentinel, or non-positive: a gauge cannot report a zero or negative
/// daily mean flow, so such values are treated as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargeRecord {
    /// Observation date
    pub date: NaiveDate,

    /// Agency code, "USGS" in practice
    pub agency: String,

    /// USGS site number
    pub site_no: String,

    /// Daily mean discharge in cubic feet per second, when present
    pub discharge: Option<f64>,

    /// USGS approval code for this value
    pub quality: QualityCode,
}

impl DischargeRecord {
    /// True when no usable discharge value is present
    pub fn is_missing(&self) -> bool {
        self.discharge.is_none()
    }
}

/// A date-ordered daily discharge series for one gauge
///
/// Supports inclusive date-range slicing and missing-value accounting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    records: Vec<DischargeRecord>,
}

impl DailySeries {
    /// Build a series from records, sorting them by date
    pub fn new(mut records: Vec<DischargeRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    /// Records in date order
    pub fn records(&self) -> &[DischargeRecord] {
        &self.records
    }

    /// Number of records in the series
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the series holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest date in the series
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    /// Latest date in the series
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// Number of records without a usable discharge value
    pub fn missing_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_missing()).count()
    }

    /// Restrict the series to `[start, end]` inclusive
    ///
    /// Returns the clipped series and its missing-value count. A window that
    /// lies entirely outside the data yields an empty series, not an error.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> (DailySeries, usize) {
        let records: Vec<DischargeRecord> = self
            .records
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect();

        let clipped = DailySeries { records };
        let missing = clipped.missing_count();
        (clipped, missing)
    }

    /// Present (date, discharge) pairs in date order, skipping missing values
    pub fn present_values(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.records
            .iter()
            .filter_map(|r| r.discharge.map(|v| (r.date, v)))
    }
}

// =============================================================================
// Metrics Tables
// =============================================================================

/// One row of a pre-computed metrics table
///
/// Annual tables hold one row per station per water year; monthly tables one
/// row per station per month. Metric values are kept as name-value pairs so
/// the same row type serves both table shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    /// Period end date, the table index
    pub date: NaiveDate,

    /// Station the row belongs to
    pub station: Gauge,

    /// Named numeric metrics (mean flow, TQmean, R-B index, ...)
    pub metrics: HashMap<String, f64>,
}

impl MetricsRow {
    /// Look up a metric value by column name
    pub fn get(&self, column: &str) -> Option<f64> {
        self.metrics.get(column).copied()
    }
}

/// A metrics table indexed by date, holding rows for both stations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsTable {
    rows: Vec<MetricsRow>,
}

impl MetricsTable {
    /// Build a table from rows in file order
    pub fn new(rows: Vec<MetricsRow>) -> Self {
        Self { rows }
    }

    /// All rows in file order
    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stations present in the table, in plotting order
    pub fn stations(&self) -> Vec<Gauge> {
        Gauge::all()
            .into_iter()
            .filter(|g| self.rows.iter().any(|r| r.station == *g))
            .collect()
    }

    /// Date-sorted (date, value) pairs of one column for one station
    ///
    /// Rows where the column is absent or NaN are skipped, which makes the
    /// result directly plottable.
    pub fn series(&self, station: Gauge, column: &str) -> Vec<(NaiveDate, f64)> {
        let mut points: Vec<(NaiveDate, f64)> = self
            .rows
            .iter()
            .filter(|r| r.station == station)
            .filter_map(|r| r.get(column).map(|v| (r.date, v)))
            .filter(|(_, v)| !v.is_nan())
            .collect();
        points.sort_by_key(|(d, _)| *d);
        points
    }

    /// Date-sorted values of one column for one station
    ///
    /// Rows where the column is absent become NaN so that positional
    /// aggregation sees one value per period.
    pub fn column_values(&self, station: Gauge, column: &str) -> Vec<f64> {
        let mut rows: Vec<&MetricsRow> =
            self.rows.iter().filter(|r| r.station == station).collect();
        rows.sort_by_key(|r| r.date);
        rows.iter()
            .map(|r| r.get(column).unwrap_or(f64::NAN))
            .collect()
    }

    /// Water years covered by the table for one station
    pub fn year_span(&self, station: Gauge) -> Option<(i32, i32)> {
        let years: Vec<i32> = self
            .rows
            .iter()
            .filter(|r| r.station == station)
            .map(|r| r.date.year())
            .collect();
        match (years.iter().min(), years.iter().max()) {
            (Some(&min), Some(&max)) => Some((min, max)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::columns;

    // Test data helpers
    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(y: i32, m: u32, d: u32, discharge: Option<f64>) -> DischargeRecord {
        DischargeRecord {
            date: date(y, m, d),
            agency: "USGS".to_string(),
            site_no: "03335000".to_string(),
            discharge,
            quality: QualityCode::Approved,
        }
    }

    fn metrics_row(station: Gauge, y: i32, m: u32, d: u32, mean_flow: f64) -> MetricsRow {
        let mut metrics = HashMap::new();
        metrics.insert(columns::MEAN_FLOW.to_string(), mean_flow);
        MetricsRow {
            date: date(y, m, d),
            station,
            metrics,
        }
    }

    mod gauge_tests {
        use super::*;

        #[test]
        fn test_gauge_keys_round_trip() {
            for gauge in Gauge::all() {
                assert_eq!(Gauge::from_str(gauge.key()).unwrap(), gauge);
            }
        }

        #[test]
        fn test_gauge_from_str_trims_whitespace() {
            assert_eq!(Gauge::from_str(" Tippe ").unwrap(), Gauge::Tippecanoe);
        }

        #[test]
        fn test_gauge_rejects_unknown_station() {
            assert!(Gauge::from_str("Mississippi").is_err());
        }

        #[test]
        fn test_gauge_river_names() {
            assert_eq!(Gauge::Wildcat.river_name(), "Wildcat Creek");
            assert_eq!(Gauge::Tippecanoe.river_name(), "Tippecanoe River");
        }

        #[test]
        fn test_gauge_site_numbers() {
            assert_eq!(Gauge::Wildcat.site_no(), "03335000");
            assert_eq!(Gauge::Tippecanoe.site_no(), "03331500");
        }
    }

    mod quality_code_tests {
        use super::*;

        #[test]
        fn test_known_codes() {
            assert_eq!(QualityCode::from_str("A").unwrap(), QualityCode::Approved);
            assert_eq!(
                QualityCode::from_str("A:e").unwrap(),
                QualityCode::ApprovedEstimated
            );
            assert_eq!(
                QualityCode::from_str("P").unwrap(),
                QualityCode::Provisional
            );
        }

        #[test]
        fn test_unknown_code_preserved() {
            let code = QualityCode::from_str("A:R").unwrap();
            assert_eq!(code, QualityCode::Other("A:R".to_string()));
            assert_eq!(code.to_string(), "A:R");
        }
    }

    mod daily_series_tests {
        use super::*;

        fn sample_series() -> DailySeries {
            DailySeries::new(vec![
                record(2015, 1, 3, Some(120.0)),
                record(2015, 1, 1, Some(100.0)),
                record(2015, 1, 2, None),
                record(2015, 1, 4, None),
                record(2015, 1, 5, Some(90.0)),
            ])
        }

        #[test]
        fn test_series_sorted_on_construction() {
            let series = sample_series();
            let dates: Vec<NaiveDate> = series.records().iter().map(|r| r.date).collect();
            let mut sorted = dates.clone();
            sorted.sort();
            assert_eq!(dates, sorted);
        }

        #[test]
        fn test_missing_count() {
            assert_eq!(sample_series().missing_count(), 2);
        }

        #[test]
        fn test_clip_is_inclusive() {
            let series = sample_series();
            let (clipped, missing) = series.clip(date(2015, 1, 2), date(2015, 1, 4));
            assert_eq!(clipped.len(), 3);
            assert_eq!(missing, 2);
            assert_eq!(clipped.first_date(), Some(date(2015, 1, 2)));
            assert_eq!(clipped.last_date(), Some(date(2015, 1, 4)));
        }

        #[test]
        fn test_clip_outside_data_is_silently_empty() {
            let series = sample_series();
            let (clipped, missing) = series.clip(date(1990, 1, 1), date(1990, 12, 31));
            assert!(clipped.is_empty());
            assert_eq!(missing, 0);
        }

        #[test]
        fn test_clip_full_range_preserves_missing_count() {
            let series = sample_series();
            let (clipped, missing) = series.clip(
                series.first_date().unwrap(),
                series.last_date().unwrap(),
            );
            assert_eq!(clipped, series);
            assert_eq!(missing, series.missing_count());
        }

        #[test]
        fn test_clip_never_increases_missing_count() {
            let series = sample_series();
            let full = series.missing_count();
            let (_, sub) = series.clip(date(2015, 1, 2), date(2015, 1, 3));
            assert!(sub <= full);
        }

        #[test]
        fn test_present_values_skip_missing() {
            let values: Vec<(NaiveDate, f64)> = sample_series().present_values().collect();
            assert_eq!(
                values,
                vec![
                    (date(2015, 1, 1), 100.0),
                    (date(2015, 1, 3), 120.0),
                    (date(2015, 1, 5), 90.0),
                ]
            );
        }
    }

    mod metrics_table_tests {
        use super::*;

        fn sample_table() -> MetricsTable {
            MetricsTable::new(vec![
                metrics_row(Gauge::Wildcat, 2016, 9, 30, 150.0),
                metrics_row(Gauge::Wildcat, 2015, 9, 30, 100.0),
                metrics_row(Gauge::Tippecanoe, 2015, 9, 30, 800.0),
            ])
        }

        #[test]
        fn test_stations_in_plotting_order() {
            assert_eq!(
                sample_table().stations(),
                vec![Gauge::Wildcat, Gauge::Tippecanoe]
            );
        }

        #[test]
        fn test_series_is_date_sorted() {
            let points = sample_table().series(Gauge::Wildcat, columns::MEAN_FLOW);
            assert_eq!(
                points,
                vec![
                    (date(2015, 9, 30), 100.0),
                    (date(2016, 9, 30), 150.0),
                ]
            );
        }

        #[test]
        fn test_series_skips_absent_columns() {
            let points = sample_table().series(Gauge::Wildcat, columns::PEAK_FLOW);
            assert!(points.is_empty());
        }

        #[test]
        fn test_column_values_keep_one_value_per_row() {
            let values = sample_table().column_values(Gauge::Wildcat, columns::PEAK_FLOW);
            assert_eq!(values.len(), 2);
            assert!(values.iter().all(|v| v.is_nan()));
        }

        #[test]
        fn test_year_span() {
            assert_eq!(sample_table().year_span(Gauge::Wildcat), Some((2015, 2016)));
            assert_eq!(
                sample_table().year_span(Gauge::Tippecanoe),
                Some((2015, 2015))
            );
        }
    }
}
