//! Recognition of date/time values written as text
//!
//! Front matter authors write dates in many shapes. [`parse_date_time`] tries
//! the common ones in turn and returns the first that fits. Values without an
//! explicit offset are taken as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Formats carrying their own offset
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M %z",
    "%Y/%m/%d %H:%M:%S %z",
    "%a, %d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M:%S %z",
];

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%a %b %e %H:%M:%S %Y",
    "%B %d, %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y.%m.%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse `text` as a date/time in any of the commonly used notations
///
/// Strings made only of digits are dates when their length matches a
/// compact layout (`yyyy`, `yyyymmdd`, `yyyymmddhhmmss`) or a unix timestamp
/// in seconds, milliseconds, microseconds or nanoseconds. Shorter or
/// differently sized digit strings are left for integer parsing.
pub fn parse_date_time(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return parse_digits(text);
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t);
    }
    if let Some(t) = zulu_with_offset(text) {
        return Some(t);
    }
    if let Ok(t) = DateTime::parse_from_rfc2822(text) {
        return Some(t);
    }

    if let Some(t) = ZONED_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    {
        return Some(t);
    }

    if let Some(t) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(as_utc(t));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(as_utc)
}

fn parse_digits(digits: &str) -> Option<DateTime<FixedOffset>> {
    let field = |range: std::ops::Range<usize>| digits.get(range)?.parse::<u32>().ok();

    match digits.len() {
        4 => NaiveDate::from_ymd_opt(i32::try_from(field(0..4)?).ok()?, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(as_utc),
        8 | 14 => {
            let year = i32::try_from(field(0..4)?).ok()?;
            let date = NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)?;
            let time = if digits.len() == 14 {
                date.and_hms_opt(field(8..10)?, field(10..12)?, field(12..14)?)?
            } else {
                date.and_hms_opt(0, 0, 0)?
            };
            Some(as_utc(time))
        }
        10 => from_unix(digits, 1_000_000_000),
        13 => from_unix(digits, 1_000_000),
        16 => from_unix(digits, 1_000),
        19 => from_unix(digits, 1),
        _ => None,
    }
}

/// Unix timestamp in units of `nanos_per_unit` nanoseconds, taken as UTC
fn from_unix(digits: &str, nanos_per_unit: i64) -> Option<DateTime<FixedOffset>> {
    let value: i64 = digits.parse().ok()?;
    let units_per_second = 1_000_000_000 / nanos_per_unit;
    let secs = value / units_per_second;
    let nanos = u32::try_from((value % units_per_second) * nanos_per_unit).ok()?;
    DateTime::<Utc>::from_timestamp(secs, nanos).map(|t| t.fixed_offset())
}

fn as_utc(t: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&t).fixed_offset()
}

/// Handle `...05Z07:00`, a `Z` immediately followed by an unsigned offset
fn zulu_with_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    let (head, offset) = text.rsplit_once('Z')?;
    let bytes = offset.as_bytes();
    let is_offset = bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());
    if !is_offset {
        return None;
    }
    DateTime::parse_from_rfc3339(&format!("{head}+{offset}")).ok()
}
