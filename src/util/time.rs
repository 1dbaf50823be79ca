//! Timestamp parsing and formatting helpers for neoscope.
//!
//! The close-approach data carries calendar dates such as
//! `1900-Jan-01 00:11` in UTC with minute precision. Output uses the
//! compact `YYYY-MM-DD HH:MM` form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::util::constants::{CD_FORMAT, OUTPUT_DATETIME_FORMAT};

/// Parse a close-approach calendar date (`YYYY-bbb-DD hh:mm`) into UTC.
///
/// Returns `None` on any malformed input rather than failing, so that a
/// bad row degrades to a null time instead of aborting the load.
pub fn cd_to_datetime(calendar_date: &str) -> Option<DateTime<Utc>> {
    let input = calendar_date.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, CD_FORMAT) {
        return Some(naive.and_utc());
    }

    // Some exports already use the numeric form.
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, OUTPUT_DATETIME_FORMAT) {
        return Some(naive.and_utc());
    }

    None
}

/// Format a UTC timestamp as `YYYY-MM-DD HH:MM`.
///
/// Seconds are dropped since the source data has none.
pub fn datetime_to_str(ts: &DateTime<Utc>) -> String {
    ts.format(OUTPUT_DATETIME_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date from user input.
///
/// Whitespace is trimmed; anything else returns `None`.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Format a `std::time::Duration` into a human-readable string.
///
/// Used in log lines to report load and query times.
/// Examples: `4.2ms` (below 10 ms), `0.3s`, `45.6s`, `2.5m`.
pub fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.01 {
        format!("{:.1}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = secs / 60.0;
        format!("{mins:.1}m")
    }
}
