//! Row parsing for USGS daily discharge files
//!
//! Splits whitespace-delimited data rows into [`DischargeRecord`]s and applies
//! the missing-value rules: sentinel codes, empty fields, unparseable numbers,
//! and non-positive values all coerce to an absent discharge.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::app::models::{DischargeRecord, QualityCode};
use crate::constants::{DATE_FORMAT, MISSING_SENTINELS};
use crate::{Error, Result};

/// Check whether a non-comment line is a data row
///
/// Data rows carry a parseable date in the third field; the column-name row
/// and the RDB field-format row that precede the data block do not.
pub(super) fn looks_like_data_row(line: &str) -> bool {
    line.split_whitespace()
        .nth(2)
        .map(|field| NaiveDate::parse_from_str(field, DATE_FORMAT).is_ok())
        .unwrap_or(false)
}

/// Parse one data row into a discharge record
pub(super) fn parse_data_row(line: &str, file: &str, line_no: usize) -> Result<DischargeRecord> {
    let mut fields = line.split_whitespace();

    let agency = fields
        .next()
        .ok_or_else(|| Error::discharge_format(file, format!("Empty row at line {}", line_no)))?;
    let site_no = fields.next().ok_or_else(|| {
        Error::discharge_format(file, format!("Missing site number at line {}", line_no))
    })?;
    let date_field = fields.next().ok_or_else(|| {
        Error::discharge_format(file, format!("Missing date at line {}", line_no))
    })?;

    let date = NaiveDate::parse_from_str(date_field, DATE_FORMAT).map_err(|e| {
        Error::date_parsing(
            format!("Invalid date '{}' at {}:{}", date_field, file, line_no),
            e,
        )
    })?;

    // Short rows are legal: a day with no measurement may omit the trailing
    // discharge and quality fields entirely
    let discharge = coerce_discharge(fields.next());
    let quality = fields
        .next()
        .map(|q| QualityCode::from_str(q).unwrap_or(QualityCode::Other(q.to_string())))
        .unwrap_or(QualityCode::Other(String::new()));

    Ok(DischargeRecord {
        date,
        agency: agency.to_string(),
        site_no: site_no.to_string(),
        discharge,
        quality,
    })
}

/// Apply the missing-value rules to a raw discharge field
///
/// A gauge cannot record a zero or negative daily mean flow, so non-positive
/// values are treated the same way as sentinels and unparseable text.
fn coerce_discharge(raw: Option<&str>) -> Option<f64> {
    let field = raw?.trim();
    if field.is_empty() || MISSING_SENTINELS.contains(&field) {
        return None;
    }
    match field.parse::<f64>() {
        Ok(value) if value > 0.0 => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod field_tests {
    use super::*;

    #[test]
    fn test_coerce_positive_value() {
        assert_eq!(coerce_discharge(Some("15.2")), Some(15.2));
    }

    #[test]
    fn test_coerce_sentinels() {
        assert_eq!(coerce_discharge(Some("Eqp")), None);
        assert_eq!(coerce_discharge(Some("Ice")), None);
        assert_eq!(coerce_discharge(Some("Ssn")), None);
    }

    #[test]
    fn test_coerce_non_positive_values() {
        assert_eq!(coerce_discharge(Some("0")), None);
        assert_eq!(coerce_discharge(Some("0.0")), None);
        assert_eq!(coerce_discharge(Some("-4.5")), None);
    }

    #[test]
    fn test_coerce_absent_and_garbage() {
        assert_eq!(coerce_discharge(None), None);
        assert_eq!(coerce_discharge(Some("")), None);
        assert_eq!(coerce_discharge(Some("n/a")), None);
    }

    #[test]
    fn test_header_rows_are_not_data() {
        assert!(!looks_like_data_row("agency_cd\tsite_no\tdatetime\tdischarge\tquality"));
        assert!(!looks_like_data_row("5s\t15s\t10d\t14n\t10s"));
        assert!(looks_like_data_row("USGS 03335000 2014-10-01 15.2 A"));
    }
}
