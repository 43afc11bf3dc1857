//! Input checks the resource model relies on: URL well-formedness and
//! navigation date normalization.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Stored in place of a nav date that could not be parsed.
pub const NAV_DATE_FALLBACK: &str = "00:00:00";

/// Output shape of a normalized nav date. Day precedes month.
pub const NAV_DATE_FORMAT: &str = "%Y-%d-%mT%H:%M:%SZ";

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M %z",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
];

/// Trailing designators that mark an otherwise naive time as UTC.
const UTC_SUFFIXES: &[&str] = &[" UTC", " GMT", "Z"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
];

/// Whether `candidate` is an absolute URL with a host.
pub fn is_well_formed_url(candidate: &str) -> bool {
    url::Url::parse(candidate).is_ok_and(|parsed| parsed.has_host())
}

/// Parse a free-form date or date-time string as a UTC instant.
///
/// Offsets are converted to UTC; inputs without a time of day resolve to
/// midnight.
pub fn parse_nav_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive_input = strip_utc_suffix(input);
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_input, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive_input, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

fn strip_utc_suffix(input: &str) -> &str {
    UTC_SUFFIXES
        .iter()
        .find_map(|suffix| input.strip_suffix(suffix))
        .map_or(input, str::trim_end)
}

/// Normalize `input` to the nav date stamp, or [`NAV_DATE_FALLBACK`].
pub fn normalize_nav_date(input: &str) -> String {
    match parse_nav_date(input) {
        Some(instant) => instant.format(NAV_DATE_FORMAT).to_string(),
        None => {
            tracing::debug!("unparsable navDate '{input}', using fallback");
            NAV_DATE_FALLBACK.to_owned()
        }
    }
}
