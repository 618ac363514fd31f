//! Timestamp parsing and duration helpers.
//!
//! Time cells arrive either as text (ISO-8601 and a handful of common
//! spreadsheet layouts) or as numbers, which are read as seconds since the
//! Unix epoch. Everything is normalised to a naive UTC `NaiveDateTime` so that
//! ordering and subtraction are always defined.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::{SvError, SvResult};
use crate::value::CellValue;

pub type Timestamp = NaiveDateTime;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    // Slashed dates are month-first unless the month would be out of range.
    "%m/%d/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M:%S%.f",
];

/// Layouts carrying a UTC offset, `+0200` or `+02:00`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Date that time-only cells are placed on. Durations between such cells
/// stay exact as long as the log does not cross midnight.
pub fn time_only_anchor() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
}

/// Turn a decimal comma in the seconds field (`09:18:16,678`) into a dot.
fn normalise_fraction(s: &str) -> Cow<'_, str> {
    let Some(pos) = s.rfind(',') else {
        return Cow::Borrowed(s);
    };
    let (head, tail) = (&s[..pos], &s[pos + 1..]);
    let head_bytes = head.as_bytes();
    let seconds_before = head_bytes.len() >= 3
        && head_bytes[head_bytes.len() - 3] == b':'
        && head_bytes[head_bytes.len() - 2..].iter().all(u8::is_ascii_digit);
    let digits_after = tail
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count()
        > 0;
    if seconds_before && digits_after {
        Cow::Owned(format!("{}.{}", head, tail))
    } else {
        Cow::Borrowed(s)
    }
}

/// Parse a textual timestamp.
///
/// Offsets are applied and dropped, leaving naive UTC. Time-only values land
/// on [`time_only_anchor`]. Bare numbers are epoch seconds.
pub fn parse_timestamp(text: &str) -> SvResult<Timestamp> {
    let fail = || SvError::TimeParse {
        value: text.to_string(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(fail());
    }
    let s = normalise_fraction(trimmed);
    let s = s.as_ref();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.naive_utc());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).ok_or_else(fail);
        }
    }
    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return time_only_anchor().map(|d| d.and_time(t)).ok_or_else(fail);
        }
    }
    if let Ok(secs) = s.parse::<f64>() {
        return from_epoch_seconds(secs).ok_or_else(fail);
    }
    Err(fail())
}

/// Convert a table cell into a timestamp.
pub fn timestamp_from_cell(cell: &CellValue) -> SvResult<Timestamp> {
    match cell {
        CellValue::Number(secs) => from_epoch_seconds(*secs).ok_or_else(|| SvError::TimeParse {
            value: secs.to_string(),
        }),
        CellValue::Text(s) => parse_timestamp(s),
        CellValue::Empty => Err(SvError::TimeParse {
            value: String::new(),
        }),
    }
}

/// Seconds since the Unix epoch, fractional part kept to nanoseconds.
pub fn from_epoch_seconds(secs: f64) -> Option<Timestamp> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let mut nanos = ((secs - whole) * 1e9).round() as u32;
    let mut whole = whole as i64;
    if nanos >= 1_000_000_000 {
        whole += 1;
        nanos = 0;
    }
    DateTime::from_timestamp(whole, nanos).map(|dt| dt.naive_utc())
}

/// Total seconds of a span at microsecond resolution.
pub fn total_seconds(span: TimeDelta) -> f64 {
    match span.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => span.num_milliseconds() as f64 / 1e3,
    }
}

/// Halfway point between `start` and `start + span`.
pub fn midpoint(start: Timestamp, span: TimeDelta) -> SvResult<Timestamp> {
    start
        .checked_add_signed(span / 2)
        .ok_or(SvError::Invariant {
            what: "timestamp midpoint out of range",
        })
}

/// Render seconds the way the label text shows them: integral values keep
/// one decimal (`2.0`), other values use the shortest round-trip form, and
/// magnitudes below `1e-4` or from `1e16` switch to exponent form (`5e-05`).
pub fn format_seconds(secs: f64) -> String {
    let magnitude = secs.abs();
    if !secs.is_finite() {
        format!("{}", secs)
    } else if secs != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{:e}", secs);
        match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            None => sci,
        }
    } else if secs.fract() == 0.0 {
        format!("{:.1}", secs)
    } else {
        format!("{}", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
    }

    #[test]
    fn parses_common_layouts() {
        let expected = ts(2024, 9, 20, 9, 18, 16, 678);
        assert_eq!(parse_timestamp("2024-09-20T09:18:16.678").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-09-20 09:18:16.678").unwrap(), expected);
        assert_eq!(parse_timestamp("2024/09/20 09:18:16.678").unwrap(), expected);
        assert_eq!(parse_timestamp("20-09-2024 09:18:16.678").unwrap(), expected);
        assert_eq!(parse_timestamp("20.09.2024 09:18:16.678").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-09-20T09:18:16.678Z").unwrap(),
            expected
        );
    }

    #[test]
    fn parses_without_fraction_or_seconds() {
        assert_eq!(
            parse_timestamp("2024-09-20 09:18:16").unwrap(),
            ts(2024, 9, 20, 9, 18, 16, 0)
        );
        assert_eq!(
            parse_timestamp("2024-09-20 09:18").unwrap(),
            ts(2024, 9, 20, 9, 18, 0, 0)
        );
        assert_eq!(
            parse_timestamp("2024-09-20").unwrap(),
            ts(2024, 9, 20, 0, 0, 0, 0)
        );
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let t = parse_timestamp("2024-09-20T11:18:16+02:00").unwrap();
        assert_eq!(t.hour(), 9);
    }

    #[test]
    fn numeric_cells_are_epoch_seconds() {
        let t0 = timestamp_from_cell(&CellValue::Number(0.0)).unwrap();
        let t1 = timestamp_from_cell(&CellValue::Number(1.5)).unwrap();
        assert_eq!(total_seconds(t1 - t0), 1.5);
        let t2 = parse_timestamp("3").unwrap();
        assert_eq!(total_seconds(t2 - t0), 3.0);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = parse_timestamp("not a time").unwrap_err();
        assert!(matches!(err, SvError::TimeParse { .. }));
        assert!(timestamp_from_cell(&CellValue::Empty).is_err());
        assert!(timestamp_from_cell(&CellValue::Number(f64::NAN)).is_err());
    }

    #[test]
    fn midpoint_is_halfway() {
        let start = ts(2024, 1, 1, 0, 0, 0, 0);
        let end = ts(2024, 1, 1, 0, 0, 3, 0);
        let mid = midpoint(start, end - start).unwrap();
        assert_eq!(mid, ts(2024, 1, 1, 0, 0, 1, 500));
    }

    #[test]
    fn seconds_formatting() {
        assert_eq!(format_seconds(2.0), "2.0");
        assert_eq!(format_seconds(1.5), "1.5");
        assert_eq!(format_seconds(0.123), "0.123");
        assert_eq!(format_seconds(-4.0), "-4.0");
        assert_eq!(format_seconds(0.0), "0.0");
        assert_eq!(format_seconds(0.0001), "0.0001");
    }

    #[test]
    fn tiny_and_huge_seconds_use_exponent_form() {
        assert_eq!(format_seconds(0.00005), "5e-05");
        assert_eq!(format_seconds(0.000001), "1e-06");
        assert_eq!(format_seconds(1.5e-7), "1.5e-07");
        assert_eq!(format_seconds(1e16), "1e+16");
        assert_eq!(format_seconds(1e22), "1e+22");
    }

    #[test]
    fn time_only_values_share_an_anchor_date() {
        let anchor = time_only_anchor().unwrap();
        let a = parse_timestamp("09:18:16.678").unwrap();
        assert_eq!(a.date(), anchor);
        assert_eq!(a.time(), ts(2024, 1, 1, 9, 18, 16, 678).time());
        let b = parse_timestamp("09:18:18").unwrap();
        assert_eq!(total_seconds(b - a), 1.322);
        assert_eq!(
            parse_timestamp("09:18").unwrap(),
            anchor.and_hms_opt(9, 18, 0).unwrap()
        );
    }

    #[test]
    fn slashed_dates_prefer_month_first() {
        assert_eq!(
            parse_timestamp("20/09/2024 09:18:16").unwrap(),
            ts(2024, 9, 20, 9, 18, 16, 0)
        );
        assert_eq!(
            parse_timestamp("09/20/2024 09:18:16.678").unwrap(),
            ts(2024, 9, 20, 9, 18, 16, 678)
        );
        // Ambiguous day and month read month-first.
        assert_eq!(
            parse_timestamp("01/02/2024 00:00:00").unwrap(),
            ts(2024, 1, 2, 0, 0, 0, 0)
        );
        assert_eq!(
            parse_timestamp("20/09/2024").unwrap(),
            ts(2024, 9, 20, 0, 0, 0, 0)
        );
    }

    #[test]
    fn offsets_without_colon() {
        assert_eq!(
            parse_timestamp("2024-09-20T09:18:16+0200").unwrap(),
            ts(2024, 9, 20, 7, 18, 16, 0)
        );
        assert_eq!(
            parse_timestamp("2024-09-20 09:18:16.678-0130").unwrap(),
            ts(2024, 9, 20, 10, 48, 16, 678)
        );
    }

    #[test]
    fn comma_fractional_seconds() {
        assert_eq!(
            parse_timestamp("2024-09-20 09:18:16,678").unwrap(),
            ts(2024, 9, 20, 9, 18, 16, 678)
        );
        let t = parse_timestamp("09:18:16,5").unwrap();
        assert_eq!(t.time(), ts(2024, 1, 1, 9, 18, 16, 500).time());
        // Commas elsewhere are left alone.
        assert!(parse_timestamp("20,5").is_err());
    }
}
