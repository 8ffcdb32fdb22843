//! Date sniffing and display.
//!
//! A value is shown as a timestamp when two parsers agree on it:
//!
//! 1. [`parse_loose`], a permissive parser that accepts the usual spellings of
//!    dates and date-times (RFC 3339, RFC 2822, slashed and named-month forms)
//! 2. a strict allow-list of exact input patterns
//!
//! The loose parser alone accepts too much; the allow-list alone would pass
//! shapes (such as `DD/MM/YYYY` with a day above 12) that the loose parser
//! reads differently. Bare integers are never dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::data::CellValue;

/// Display pattern for reformatted dates (`DD MMM YYYY HH:mm`).
pub const TIMESTAMP_FORMAT: &str = "%d %b %Y %H:%M";

/// Date-time shapes carrying a UTC offset, read as wall-clock time in that offset.
const LOOSE_OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

const LOOSE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y %H:%M:%S",
    "%A, %B %d, %Y %I:%M %p",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%b %d %Y %H:%M:%S",
];

const LOOSE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%A, %B %d, %Y",
    "%a %b %d %Y",
];

/// Exact date patterns: `YYYY-MM-DD`, `YYYYMMDD`, `DD/MM/YYYY`, and the short
/// and long English locale dates.
const STRICT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%d/%m/%Y", "%m/%d/%Y", "%B %-d, %Y"];

/// Long English locale date-times (`Month D, YYYY h:mm AM`, with or without weekday).
const STRICT_DATETIME_FORMATS: &[&str] = &["%B %-d, %Y %-I:%M %p", "%A, %B %-d, %Y %-I:%M %p"];

/// Heuristically decide whether a cell holds a date or timestamp.
///
/// Never fails. Null is never a date, a [`CellValue::Timestamp`] always is.
/// Anything else is classified by its string form: bare integer literals are
/// rejected outright, and the rest must satisfy both [`parse_loose`] and the
/// strict allow-list.
pub fn looks_like_date(value: &CellValue) -> bool {
    let text = match value {
        CellValue::Null => return false,
        CellValue::Timestamp(_) => return true,
        other => other.to_string(),
    };

    if is_bare_integer(&text) {
        return false;
    }

    parse_loose(value).is_some() && matches_allow_list(&text)
}

/// Permissive date parse of a cell.
///
/// Text is tried against RFC 3339, RFC 2822 and a list of common spellings;
/// offsets are kept as the wall-clock time they describe. Numbers are epoch
/// milliseconds. Null and booleans never parse.
pub fn parse_loose(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Null | CellValue::Bool(_) => None,
        CellValue::Timestamp(ts) => Some(*ts),
        CellValue::Number(ms) if ms.is_finite() => {
            DateTime::from_timestamp_millis(*ms as i64).map(|dt| dt.naive_utc())
        }
        CellValue::Number(_) => None,
        CellValue::Text(s) => parse_loose_str(s),
    }
}

/// Render a date-time in the display pattern, e.g. `01 May 2023 00:00`.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_loose_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_local());
    }
    for fmt in LOOSE_OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }

    // A trailing Z is UTC; the wall-clock reading is the same
    let naive = s.strip_suffix(['Z', 'z']).unwrap_or(s);
    for fmt in LOOSE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(dt);
        }
    }
    for fmt in LOOSE_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    year_month(s).map(|d| d.and_time(NaiveTime::MIN))
}

/// True when reading the leading integer of `s` and printing it back gives `s`.
///
/// The leading integer is optional whitespace, an optional sign, then digits up
/// to the first non-digit. `"42"` and `"-7"` qualify; `"042"`, `"+7"`,
/// `" 7"` and `"2023-05-01"` do not.
fn is_bare_integer(s: &str) -> bool {
    let body = s.trim_start();
    let (negative, digits) = match body.as_bytes().first() {
        Some(b'-') => (true, &body[1..]),
        Some(b'+') => (false, &body[1..]),
        _ => (false, body),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return false;
    }

    let trimmed = digits.trim_start_matches('0');
    let canonical = match (negative, trimmed.is_empty()) {
        (_, true) => "0".to_string(),
        (true, false) => format!("-{}", trimmed),
        (false, false) => trimmed.to_string(),
    };
    canonical == s
}

/// Strict parse: the text must match one of the allowed patterns exactly.
fn matches_allow_list(s: &str) -> bool {
    let date_match = STRICT_DATE_FORMATS.iter().any(|fmt| {
        NaiveDate::parse_from_str(s, fmt)
            .map(|d| d.format(fmt).to_string() == s)
            .unwrap_or(false)
    });
    let datetime_match = || {
        STRICT_DATETIME_FORMATS.iter().any(|fmt| {
            NaiveDateTime::parse_from_str(s, fmt)
                .map(|dt| dt.format(fmt).to_string() == s)
                .unwrap_or(false)
        })
    };

    date_match || datetime_match() || is_iso8601(s)
}

/// ISO-8601 in its extended form: `YYYY-MM`, `YYYY-MM-DD`, optionally followed
/// by `T` (or a space) and `HH`, `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`, then an
/// optional `Z` or `±HH`, `±HHMM`, `±HH:MM` offset.
fn is_iso8601(s: &str) -> bool {
    let (date, time) = match s.find(['T', ' ']) {
        Some(split) => (&s[..split], Some(&s[split + 1..])),
        None => (s, None),
    };

    let date_ok = match date.len() {
        7 => time.is_none() && year_month(date).is_some(),
        10 => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(|d| d.format("%Y-%m-%d").to_string() == date)
            .unwrap_or(false),
        _ => false,
    };
    if !date_ok {
        return false;
    }

    match time {
        None => true,
        Some(time) => {
            let (clock, offset) = split_offset(time);
            is_iso_clock(clock) && offset.map(is_iso_offset).unwrap_or(true)
        }
    }
}

/// `YYYY-MM` as the first day of that month.
fn year_month(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return None;
    }
    if !s[..4].bytes().chain(s[5..].bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[..4].parse().ok()?;
    let month = s[5..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn split_offset(time: &str) -> (&str, Option<&str>) {
    if let Some(clock) = time.strip_suffix('Z') {
        return (clock, None);
    }
    match time.find(['+', '-']) {
        Some(pos) => (&time[..pos], Some(&time[pos + 1..])),
        None => (time, None),
    }
}

fn is_iso_clock(clock: &str) -> bool {
    let (hms, fraction) = match clock.split_once('.') {
        Some((hms, fraction)) => (hms, Some(fraction)),
        None => (clock, None),
    };
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }

    let parts: Vec<&str> = hms.split(':').collect();
    if parts.iter().any(|p| p.len() != 2 || !p.bytes().all(|b| b.is_ascii_digit())) {
        return false;
    }
    // A fraction only follows whole seconds
    if fraction.is_some() && parts.len() != 3 {
        return false;
    }

    let mut numbers = parts.iter().filter_map(|p| p.parse::<u32>().ok());
    let hour = numbers.next().unwrap_or(99);
    let minute = numbers.next().unwrap_or(0);
    let second = numbers.next().unwrap_or(0);
    parts.len() <= 3 && NaiveTime::from_hms_opt(hour, minute, second).is_some()
}

fn is_iso_offset(offset: &str) -> bool {
    let digits: String = offset.chars().filter(|c| *c != ':').collect();
    let shape_ok = match offset.len() {
        2 | 4 => !offset.contains(':'),
        5 => offset.as_bytes()[2] == b':',
        _ => false,
    };
    if !shape_ok || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let hours: u32 = digits[..2].parse().unwrap_or(99);
    let minutes: u32 = match digits.get(2..) {
        Some(m) if !m.is_empty() => m.parse().unwrap_or(99),
        _ => 0,
    };
    hours <= 23 && minutes <= 59
}
