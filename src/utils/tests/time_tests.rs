//! Tests for time helpers

extern crate std;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::utils::time_utils::{
    date_from_filename, format_utc, parse_reference_time, timestamp_from_filename,
    with_acquisition_offset,
};

#[test]
fn test_reference_time_formats() {
    let expected = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
    std::assert_eq!(parse_reference_time("2023-06-01T12:00:00Z").unwrap(), expected);
    std::assert_eq!(parse_reference_time("20230601120000").unwrap(), expected);
    std::assert!(parse_reference_time("June 1st").is_err());
}

#[test]
fn test_acquisition_offset() {
    let start = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
    let shifted = with_acquisition_offset(start, 12.5);
    std::assert_eq!(format_utc(&shifted), "2023-06-01 12:12:30 UTC");
}

#[test]
fn test_dates_from_filenames() {
    std::assert_eq!(
        date_from_filename("/data/NDV_AVHRR_20230101_S10.bin"),
        NaiveDate::from_ymd_opt(2023, 1, 1)
    );
    std::assert_eq!(
        timestamp_from_filename("HDF5_LSASAF_MSG_LST_SAfr_202306011215.h5"),
        NaiveDate::from_ymd_opt(2023, 6, 1).and_then(|d| d.and_hms_opt(12, 15, 0))
    );
    std::assert_eq!(date_from_filename("no_date_here.bin"), None);
    // Not a calendar date
    std::assert_eq!(date_from_filename("X_20231345.bin"), None);
}
