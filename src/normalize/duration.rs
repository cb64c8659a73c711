//! Visit duration derivation.
//!
//! Visit times are typed by hand: "08:00", "08.00", "8.00 WIB". A value that
//! does not parse yields an empty duration rather than failing the record.

use lazy_static::lazy_static;
use regex::Regex;

const MINUTES_PER_DAY: i64 = 24 * 60;

lazy_static! {
    static ref WIB_SUFFIX: Regex = Regex::new(r"(?i)\bWIB\b").unwrap();
    static ref CLOCK: Regex = Regex::new(r"(\d{1,2})[:.](\d{2})").unwrap();
}

/// Remove the first "WIB" timezone word and trim.
pub fn strip_wib(value: &str) -> String {
    WIB_SUFFIX.replace(value, "").trim().to_string()
}

/// Minutes since midnight for the first `H:MM` / `H.MM` in `value`.
pub fn parse_clock_minutes(value: &str) -> Option<i64> {
    let stripped = strip_wib(value);
    let caps = CLOCK.captures(&stripped)?;
    let hours: i64 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: i64 = caps.get(2)?.as_str().parse().ok()?;
    Some(hours * 60 + minutes)
}

/// `HH:MM:00` between two times of day, wrapping past midnight.
///
/// Returns an empty string when either side does not parse.
pub fn visit_duration(start: &str, end: &str) -> String {
    let (Some(s), Some(e)) = (parse_clock_minutes(start), parse_clock_minutes(end)) else {
        return String::new();
    };
    let diff = (e - s).rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}:00", diff / 60, diff % 60)
}
