//! Month-range expansion for legacy premium-leave sheets.
//!
//! Legacy sheets carry a start month and an end month, each with or without a
//! year. [`expand_range_for_year`] infers the missing years and emits one
//! [`LeavePeriod`] per calendar month of the span, inclusive.

use std::sync::OnceLock;

use chrono::{Datelike, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{LeavePeriod, MAX_BLOCK_MONTHS, PeriodKind, months_between};

use super::dates::{expand_year, parse_date};
use super::months::{MONTH_ALTERNATION, month_from_name};
use super::text::normalize_text;

/// A month with an optional year, as written on one side of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthYear {
    /// Month, 1-12.
    pub month: u32,
    /// Year, when the text stated one.
    pub year: Option<i32>,
}

fn numeric_month_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})\s*[/.\-]\s*(\d{4}|\d{2})$").expect("invalid numeric month regex")
    })
}

fn iso_month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{1,2})$").expect("invalid iso month regex"))
}

fn named_month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"^({MONTH_ALTERNATION})\.?(?:\s*(?:de\s+|/|-|\s)\s*(\d{{4}}|\d{{2}}))?$"
        ))
        .expect("invalid named month regex")
    })
}

/// Reads one side of a month range.
///
/// Accepts month names and abbreviations (`novembro`, `nov.`), optionally
/// followed by a year (`nov/2025`, `novembro de 2025`, `nov-25`), numeric
/// `MM/AAAA`, ISO `AAAA-MM` and full dates.
///
/// # Examples
///
/// ```
/// use premium_leave_engine::parsing::{MonthYear, parse_month_year};
///
/// assert_eq!(parse_month_year("Novembro"), Some(MonthYear { month: 11, year: None }));
/// assert_eq!(parse_month_year("fev/2026"), Some(MonthYear { month: 2, year: Some(2026) }));
/// assert_eq!(parse_month_year("03/2027"), Some(MonthYear { month: 3, year: Some(2027) }));
/// assert_eq!(parse_month_year("quando possível"), None);
/// ```
pub fn parse_month_year(text: &str) -> Option<MonthYear> {
    let text = normalize_text(text);
    if text.is_empty() {
        return None;
    }

    if let Some(date) = parse_date(&text) {
        return Some(MonthYear {
            month: date.month(),
            year: Some(date.year()),
        });
    }

    if let Some(caps) = numeric_month_year_re().captures(&text) {
        let month: u32 = caps[1].parse().ok()?;
        return (1..=12).contains(&month).then_some(MonthYear {
            month,
            year: Some(expand_year(&caps[2])?),
        });
    }

    if let Some(caps) = iso_month_re().captures(&text) {
        let month: u32 = caps[2].parse().ok()?;
        return (1..=12).contains(&month).then_some(MonthYear {
            month,
            year: Some(caps[1].parse().ok()?),
        });
    }

    let caps = named_month_re().captures(&text)?;
    let month = month_from_name(&caps[1])?;
    let year = match caps.get(2) {
        Some(year) => Some(expand_year(year.as_str())?),
        None => None,
    };
    Some(MonthYear { month, year })
}

/// Infers the `(start_year, end_year)` of a range.
///
/// Explicit years win. A missing side inherits the other side's year, moved by
/// one when the end month precedes the start month. With no years at all both
/// sides default to `default_year`. The end year is then pushed forward until
/// the range is no longer inverted.
pub fn infer_years(start: MonthYear, end: MonthYear, default_year: i32) -> (i32, i32) {
    let wraps = end.month < start.month;
    let (start_year, mut end_year) = match (start.year, end.year) {
        (Some(s), Some(e)) => (s, e),
        (Some(s), None) => (s, if wraps { s + 1 } else { s }),
        (None, Some(e)) => (if wraps { e - 1 } else { e }, e),
        (None, None) => (default_year, if wraps { default_year + 1 } else { default_year }),
    };

    while months_between(start_year, start.month, end_year, end.month) < 0 {
        end_year += 1;
    }

    (start_year, end_year)
}

/// Expands a start/end month pair, defaulting missing years to `default_year`.
///
/// Returns an empty vector when either side cannot be read or the span is
/// longer than [`MAX_BLOCK_MONTHS`].
///
/// # Example
///
/// ```
/// use premium_leave_engine::parsing::expand_range_for_year;
///
/// let periods = expand_range_for_year("novembro", "fevereiro", 2026);
/// let keys: Vec<String> = periods.iter().map(|p| p.month_key()).collect();
/// assert_eq!(keys, vec!["2026-11", "2026-12", "2027-01", "2027-02"]);
/// ```
pub fn expand_range_for_year(
    start_text: &str,
    end_text: &str,
    default_year: i32,
) -> Vec<LeavePeriod> {
    let (Some(start), Some(end)) = (parse_month_year(start_text), parse_month_year(end_text))
    else {
        return Vec::new();
    };

    let (start_year, end_year) = infer_years(start, end, default_year);
    let span = months_between(start_year, start.month, end_year, end.month) + 1;
    let count = match u32::try_from(span) {
        Ok(count) if count <= MAX_BLOCK_MONTHS => count,
        _ => return Vec::new(),
    };

    let source = format!("{} a {}", start_text.trim(), end_text.trim());
    LeavePeriod::series(start_year, start.month, count, 1, PeriodKind::PremiumLeave)
        .into_iter()
        .map(|period| period.with_months_count(count).with_source(source.clone()))
        .collect()
}

/// Expands a start/end month pair, defaulting missing years to the current year.
pub fn expand_range(start_text: &str, end_text: &str) -> Vec<LeavePeriod> {
    expand_range_for_year(start_text, end_text, Local::now().year())
}
