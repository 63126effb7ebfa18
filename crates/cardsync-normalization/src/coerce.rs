//! Numeric and date coercion for extracted field values.
//!
//! Both coercers return `None` for empty input and for input they cannot
//! parse. Parse failures are logged at `warn`; they never propagate.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

/// Canonical output format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Offset-aware timestamp formats tried after RFC 3339.
const OFFSET_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// Naive timestamp formats (no offset given).
const NAIVE_TIMESTAMP_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

#[derive(Clone, Copy)]
enum InputFormat {
    Date(&'static str),
    DateTime(&'static str),
}

/// Formats for values without a `T` separator, in priority order.
///
/// `MM/DD/YYYY` is tried before `DD/MM/YYYY`, so `03/04/2025` is read as
/// March 4th. Day-first input only parses when the day is above 12.
const FALLBACK_FORMATS: [InputFormat; 4] = [
    InputFormat::Date("%Y-%m-%d"),
    InputFormat::Date("%m/%d/%Y"),
    InputFormat::Date("%d/%m/%Y"),
    InputFormat::DateTime("%Y-%m-%d %H:%M:%S"),
];

/// Parse a number, ignoring whitespace and thousands separators.
///
/// ```
/// use cardsync_normalization::parse_number;
///
/// assert_eq!(parse_number(Some("1,234")), Some(1234.0));
/// assert_eq!(parse_number(Some(" 12 500.5 ")), Some(12500.5));
/// assert_eq!(parse_number(Some("")), None);
/// assert_eq!(parse_number(Some("abc")), None);
/// assert_eq!(parse_number(None), None);
/// ```
pub fn parse_number(value: Option<&str>) -> Option<f64> {
    let raw = value.filter(|raw| !raw.is_empty())?;
    let cleaned: String = raw
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            warn!(value = raw, "could not convert value to a number");
            None
        }
    }
}

/// Parse a date from a timestamp or one of the fallback date formats.
///
/// Timestamps keep the calendar date they were written in; a trailing `Z`
/// is read as `+00:00` and no timezone conversion takes place.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let raw = value.map(str::trim).filter(|raw| !raw.is_empty())?;
    let parsed = if raw.contains('T') {
        parse_timestamp(raw)
    } else {
        parse_fallback(raw)
    };
    if parsed.is_none() {
        warn!(value = raw, "could not parse date");
    }
    parsed
}

/// Parse a date and render it as `YYYY-MM-DD`.
///
/// ```
/// use cardsync_normalization::format_date;
///
/// assert_eq!(format_date(Some("2025-11-04T10:00:00.000Z")).as_deref(), Some("2025-11-04"));
/// assert_eq!(format_date(Some("11/04/2025")).as_deref(), Some("2025-11-04"));
/// assert_eq!(format_date(Some("not a date")), None);
/// ```
pub fn format_date(value: Option<&str>) -> Option<String> {
    parse_date(value).map(|date| date.format(DATE_FORMAT).to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let normalized = match raw.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => raw.to_string(),
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(timestamp.date_naive());
    }
    for format in OFFSET_TIMESTAMP_FORMATS {
        if let Ok(timestamp) = DateTime::parse_from_str(&normalized, format) {
            return Some(timestamp.date_naive());
        }
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
        .map(|timestamp| timestamp.date())
}

fn parse_fallback(raw: &str) -> Option<NaiveDate> {
    FALLBACK_FORMATS.iter().find_map(|format| match *format {
        InputFormat::Date(pattern) => NaiveDate::parse_from_str(raw, pattern).ok(),
        InputFormat::DateTime(pattern) => NaiveDateTime::parse_from_str(raw, pattern)
            .ok()
            .map(|timestamp| timestamp.date()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn number_strips_separators() {
        assert_eq!(parse_number(Some("1,234")), Some(1234.0));
        assert_eq!(parse_number(Some("10,000.50")), Some(10000.5));
        assert_eq!(parse_number(Some(" 7 ")), Some(7.0));
        assert_eq!(parse_number(Some("-3")), Some(-3.0));
    }

    #[test]
    fn number_rejects_garbage() {
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("   ")), None);
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(Some("$100")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn number_rejects_non_finite() {
        assert_eq!(parse_number(Some("inf")), None);
        assert_eq!(parse_number(Some("NaN")), None);
    }

    #[test]
    fn timestamp_with_zulu_suffix() {
        assert_eq!(
            parse_date(Some("2025-11-04T10:00:00.000Z")),
            date(2025, 11, 4)
        );
    }

    #[test]
    fn timestamp_keeps_written_date() {
        // 23:30 at -05:00 is already the next day in UTC; the written date is kept.
        assert_eq!(
            parse_date(Some("2025-11-04T23:30:00-05:00")),
            date(2025, 11, 4)
        );
        assert_eq!(parse_date(Some("2025-11-04T23:30:00")), date(2025, 11, 4));
        assert_eq!(parse_date(Some("2025-11-04T23:30")), date(2025, 11, 4));
    }

    #[test]
    fn malformed_timestamp_is_none() {
        assert_eq!(parse_date(Some("2025-11-04Tnoon")), None);
        assert_eq!(parse_date(Some("Tuesday")), None);
    }

    #[test]
    fn fallback_formats_in_order() {
        assert_eq!(parse_date(Some("2025-01-15")), date(2025, 1, 15));
        assert_eq!(parse_date(Some("11/04/2025")), date(2025, 11, 4));
        assert_eq!(parse_date(Some("25/12/2025")), date(2025, 12, 25));
        assert_eq!(parse_date(Some("2025-01-15 08:15:00")), date(2025, 1, 15));
    }

    #[test]
    fn ambiguous_slash_date_is_month_first() {
        assert_eq!(parse_date(Some("03/04/2025")), date(2025, 3, 4));
    }

    #[test]
    fn unparseable_date_is_none() {
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(Some("next week")), None);
        assert_eq!(parse_date(Some("2025-13-01")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn format_date_is_canonical() {
        assert_eq!(format_date(Some("1/5/2025")).as_deref(), Some("2025-01-05"));
    }
}
