//! Date normalization.
//!
//! Spreadsheet dates arrive as `DD/MM/YYYY` text, ISO text, two-digit-year text,
//! or legacy numeric day serials. Every routine here returns `None` instead of
//! failing, and never returns a date whose components disagree with the input.

use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Two-digit years above this value belong to the 1900s, the rest to the 2000s.
pub const TWO_DIGIT_YEAR_PIVOT: u32 = 50;

/// Largest accepted day serial.
pub const MAX_DAY_SERIAL: f64 = 100_000.0;

/// Fallback layouts: chrono format plus the position of (year, month, day)
/// among the numeric groups of the token.
const FALLBACK_LAYOUTS: [(&str, bool, [usize; 3]); 6] = [
    ("%d-%m-%Y", false, [2, 1, 0]),
    ("%d.%m.%Y", false, [2, 1, 0]),
    ("%Y/%m/%d", false, [0, 1, 2]),
    ("%Y.%m.%d", false, [0, 1, 2]),
    ("%d/%m/%Y %H:%M", true, [2, 1, 0]),
    ("%d/%m/%Y %H:%M:%S", true, [2, 1, 0]),
];

fn dmy_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})$").expect("invalid dmy regex")
    })
}

fn iso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ].*)?$").expect("invalid iso regex")
    })
}

/// Expands a two-digit year around [`TWO_DIGIT_YEAR_PIVOT`].
///
/// # Examples
///
/// ```
/// use premium_leave_engine::parsing::pivot_two_digit_year;
///
/// assert_eq!(pivot_two_digit_year(28), 2028);
/// assert_eq!(pivot_two_digit_year(50), 2050);
/// assert_eq!(pivot_two_digit_year(51), 1951);
/// ```
pub fn pivot_two_digit_year(yy: u32) -> i32 {
    let yy = (yy % 100) as i32;
    if yy > TWO_DIGIT_YEAR_PIVOT as i32 {
        1900 + yy
    } else {
        2000 + yy
    }
}

/// Reads a year written with two or four digits.
pub(crate) fn expand_year(digits: &str) -> Option<i32> {
    match digits.len() {
        2 => digits.parse::<u32>().ok().map(pivot_two_digit_year),
        4 => digits.parse::<i32>().ok(),
        _ => None,
    }
}

/// Parses a date token.
///
/// Supported forms, tried in order:
/// 1. `DD/MM/YYYY`, `D/M/YYYY` and `DD/MM/YY`
/// 2. ISO `YYYY-MM-DD`, optionally followed by a time part
/// 3. a few alternative layouts (`DD-MM-YYYY`, `DD.MM.YYYY`, `YYYY/MM/DD`, with
///    or without a time), re-checked against the token's own numbers
///
/// Impossible calendar dates such as `31/04/2024` yield `None`.
///
/// # Examples
///
/// ```
/// use premium_leave_engine::parsing::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date("05/03/2026"), NaiveDate::from_ymd_opt(2026, 3, 5));
/// assert_eq!(parse_date("2026-03-05"), NaiveDate::from_ymd_opt(2026, 3, 5));
/// assert_eq!(parse_date("31/04/2024"), None);
/// assert_eq!(parse_date("33/13/2020"), None);
/// ```
pub fn parse_date(token: &str) -> Option<NaiveDate> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if let Some(caps) = dmy_re().captures(token) {
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let year = expand_year(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = iso_re().captures(token) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    parse_with_fallback_layouts(token)
}

fn parse_with_fallback_layouts(token: &str) -> Option<NaiveDate> {
    let groups: Vec<u32> = token
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().ok())
        .collect::<Option<_>>()?;

    FALLBACK_LAYOUTS
        .iter()
        .find_map(|(layout, has_time, [y, m, d])| {
            let parsed = if *has_time {
                NaiveDateTime::parse_from_str(token, layout)
                    .ok()
                    .map(|dt| dt.date())
            } else {
                NaiveDate::parse_from_str(token, layout).ok()
            }?;
            let matches = groups.get(*y).copied() == u32::try_from(parsed.year()).ok()
                && groups.get(*m).copied() == Some(parsed.month())
                && groups.get(*d).copied() == Some(parsed.day());
            matches.then_some(parsed)
        })
}

/// Converts a legacy spreadsheet day serial into a date.
///
/// The epoch is 1899-12-30, so serials that already compensate for the
/// historical 1900 leap-year bug are not corrected a second time. Only
/// integers in `[1, 100000]` are accepted.
///
/// # Examples
///
/// ```
/// use premium_leave_engine::parsing::serial_to_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(serial_to_date(45292.0), NaiveDate::from_ymd_opt(2024, 1, 1));
/// assert_eq!(serial_to_date(1.0), NaiveDate::from_ymd_opt(1899, 12, 31));
/// assert_eq!(serial_to_date(45292.5), None);
/// assert_eq!(serial_to_date(0.0), None);
/// ```
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial.fract() != 0.0 || !(1.0..=MAX_DAY_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial as i64))
}

/// Reads a spreadsheet cell as a date: text forms first, then day serials.
pub fn parse_cell_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    parse_date(cell).or_else(|| {
        cell.replace(',', ".")
            .parse::<f64>()
            .ok()
            .and_then(serial_to_date)
    })
}
