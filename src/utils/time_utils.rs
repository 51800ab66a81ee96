//! Product time handling
//!
//! Reference times come from file attributes in one of a few fixed
//! layouts, or from the date stamp embedded in product file names.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::raster::{GridError, GridResult};

/// Layouts accepted for reference-time attributes
const TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%SZ", "%Y%m%d%H%M%S", "%Y-%m-%d %H:%M:%S"];

lazy_static! {
    // 8-digit date, optionally followed by HHMM or HHMMSS, delimited by _ - . or the string ends
    static ref FILE_DATE: Option<Regex> =
        Regex::new(r"(?:^|[_\-.])(\d{8})(\d{4}|\d{6})?(?:[_\-.]|$)").ok();
}

/// Parse a reference-time attribute as UTC
pub fn parse_reference_time(text: &str) -> GridResult<DateTime<Utc>> {
    let text = text.trim();
    for format in TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(GridError::GenericError(format!(
        "Unrecognised time '{}' (expected one of {})",
        text,
        TIME_FORMATS.join(", ")
    )))
}

/// Shift a reference time by an acquisition offset in minutes
pub fn with_acquisition_offset(time: DateTime<Utc>, minutes: f64) -> DateTime<Utc> {
    time + Duration::seconds((minutes * 60.0).round() as i64)
}

/// Timestamp embedded in a product file name, e.g. `NDV_20230101.bin` or
/// `LST_SAfr_202306011215.h5`
pub fn timestamp_from_filename(name: &str) -> Option<NaiveDateTime> {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let pattern = FILE_DATE.as_ref()?;

    for caps in pattern.captures_iter(file_name) {
        let Some(date) = caps.get(1).and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y%m%d").ok()) else {
            continue;
        };
        let time = match caps.get(2).map(|m| m.as_str()) {
            Some(hhmm) if hhmm.len() == 4 => date.and_hms_opt(
                hhmm[0..2].parse().ok()?,
                hhmm[2..4].parse().ok()?,
                0,
            ),
            Some(hhmmss) => date.and_hms_opt(
                hhmmss[0..2].parse().ok()?,
                hhmmss[2..4].parse().ok()?,
                hhmmss[4..6].parse().ok()?,
            ),
            None => date.and_hms_opt(0, 0, 0),
        };
        if time.is_some() {
            return time;
        }
    }
    None
}

/// Date embedded in a product file name
pub fn date_from_filename(name: &str) -> Option<NaiveDate> {
    timestamp_from_filename(name).map(|t| t.date())
}

/// Format a time for titles and reports
pub fn format_utc(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
