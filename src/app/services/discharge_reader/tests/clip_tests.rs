//! Tests for loading followed by date-window clipping

use chrono::NaiveDate;

use super::write_discharge_file;
use crate::app::services::discharge_reader::read_discharge;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_clip_to_window_inside_record() {
    let file = write_discharge_file(&[
        "USGS\t03335000\t2014-09-29\t12.0\tA",
        "USGS\t03335000\t2014-09-30\t13.0\tA",
        "USGS\t03335000\t2014-10-01\tEqp\tA",
        "USGS\t03335000\t2014-10-02\t15.0\tA",
        "USGS\t03335000\t2014-10-03\t16.0\tA",
    ]);

    let (series, _) = read_discharge(file.path()).unwrap();
    let (clipped, missing) = series.clip(date(2014, 10, 1), date(2014, 10, 3));

    assert_eq!(clipped.len(), 3);
    assert_eq!(missing, 1);
    assert_eq!(clipped.first_date(), Some(date(2014, 10, 1)));
}

#[test]
fn test_load_then_clip_full_range_round_trips_missing_count() {
    let file = write_discharge_file(&[
        "USGS\t03335000\t2014-10-01\t15.2\tA",
        "USGS\t03335000\t2014-10-02\tEqp\tA",
        "USGS\t03335000\t2014-10-03\t-1.0\tA",
        "USGS\t03335000\t2014-10-04\t17.4\tA",
    ]);

    let (series, load_missing) = read_discharge(file.path()).unwrap();
    let (clipped, clip_missing) = series.clip(
        series.first_date().unwrap(),
        series.last_date().unwrap(),
    );

    assert_eq!(clipped, series);
    assert_eq!(clip_missing, load_missing);
}

#[test]
fn test_clip_window_before_record_is_empty() {
    let file = write_discharge_file(&["USGS\t03335000\t2014-10-01\t15.2\tA"]);

    let (series, _) = read_discharge(file.path()).unwrap();
    let (clipped, missing) = series.clip(date(1950, 1, 1), date(1950, 12, 31));

    assert!(clipped.is_empty());
    assert_eq!(missing, 0);
}

#[test]
fn test_sub_window_missing_count_bounded_by_full_count() {
    let file = write_discharge_file(&[
        "USGS\t03335000\t2014-10-01\tEqp\tA",
        "USGS\t03335000\t2014-10-02\t15.0\tA",
        "USGS\t03335000\t2014-10-03\tEqp\tA",
        "USGS\t03335000\t2014-10-04\t17.0\tA",
    ]);

    let (series, full_missing) = read_discharge(file.path()).unwrap();
    let (_, sub_missing) = series.clip(date(2014, 10, 2), date(2014, 10, 4));

    assert!(sub_missing <= full_missing);
    assert_eq!(sub_missing, 1);
}
