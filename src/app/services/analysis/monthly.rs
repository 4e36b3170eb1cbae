//! Water-year monthly averaging
//!
//! The monthly metrics table holds one mean-flow row per station per month,
//! date-ordered and starting at an October water-year boundary. Averaging the
//! rows at a fixed positional stride therefore collapses the full record into
//! twelve calendar-month means without ever touching the date column.

use crate::constants::WATER_YEAR_PICK_OFFSETS;

/// Average a monthly series into twelve calendar-month means
///
/// `values` must be date-ordered with its first element at a water-year start
/// (October). Slot 0 of the result is January, slot 11 December. Each slot is
/// the arithmetic mean of every value whose position within the water year
/// matches that month; NaN values are skipped, and a slot with no usable
/// observations stays NaN.
pub fn water_year_monthly_means(values: &[f64]) -> [f64; 12] {
    let mut means = [f64::NAN; 12];

    for (slot, &offset) in WATER_YEAR_PICK_OFFSETS.iter().enumerate() {
        let mut sum = 0.0;
        let mut count = 0usize;

        let mut position = offset;
        while position < values.len() {
            let value = values[position];
            if !value.is_nan() {
                sum += value;
                count += 1;
            }
            position += 12;
        }

        if count > 0 {
            means[slot] = sum / count as f64;
        }
    }

    means
}
