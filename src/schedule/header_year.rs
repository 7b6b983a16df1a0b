//! Schedule forms that take their year from the column header.
//!
//! Some sheets encode the year per column (`CRONOGRAMA 2026`) and leave it out
//! of the cells, which then read `2 meses 10/03` or `2 meses 10/03 - 09/05`.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::models::{LeavePeriod, MAX_BLOCK_MONTHS, PeriodKind, months_between};
use crate::parsing::{MONTH_ALTERNATION, month_from_name};

fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"\b(\d{{1,3}})\s+mes(?:es)?\s+(\d{{1,2}})/(\d{{1,2}}|{MONTH_ALTERNATION})\b"
        ))
        .expect("invalid header block regex")
    })
}

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"\b(\d{{1,3}})\s+mes(?:es)?\s+(\d{{1,2}})/(\d{{1,2}}|{MONTH_ALTERNATION})\.?\s*(?:-|–|—|a|ate)\s*(\d{{1,2}})/(\d{{1,2}}|{MONTH_ALTERNATION})\b"
        ))
        .expect("invalid header range regex")
    })
}

fn month_part(text: &str) -> Option<u32> {
    match text.parse::<u32>() {
        Ok(month) => (1..=12).contains(&month).then_some(month),
        Err(_) => month_from_name(text),
    }
}

fn month_count(caps: &Captures<'_>) -> Option<u32> {
    let count: u32 = caps[1].parse().ok()?;
    (1..=MAX_BLOCK_MONTHS).contains(&count).then_some(count)
}

/// The match must not continue into an explicit year (`10/03/2026`).
fn ends_without_year(text: &str, end: usize) -> bool {
    !text[end..].starts_with('/')
}

/// `<N> meses <DD>/<MM>`: N consecutive months from that day in `year`.
pub fn header_year_block(text: &str, year: i32) -> Option<Vec<LeavePeriod>> {
    let caps = block_re().captures(text)?;
    if !ends_without_year(text, caps.get(0)?.end()) {
        return None;
    }
    let count = month_count(&caps)?;
    let day: u32 = caps[2].parse().ok()?;
    let month = month_part(&caps[3])?;
    NaiveDate::from_ymd_opt(year, month, day)?;

    let periods = LeavePeriod::series(year, month, count, 1, PeriodKind::Consecutive)
        .into_iter()
        .map(|p| p.with_months_count(count))
        .collect();
    Some(periods)
}

/// `<N> meses <DD>/<MM> - <DD>/<MM>`: every calendar month the span touches.
///
/// The end date rolls into the next year when its month precedes the start
/// month.
pub fn header_year_range(text: &str, year: i32) -> Option<Vec<LeavePeriod>> {
    let caps = range_re().captures(text)?;
    if !ends_without_year(text, caps.get(0)?.end()) {
        return None;
    }
    let count = month_count(&caps)?;

    let start_day: u32 = caps[2].parse().ok()?;
    let start_month = month_part(&caps[3])?;
    let end_day: u32 = caps[4].parse().ok()?;
    let end_month = month_part(&caps[5])?;
    let end_year = if end_month < start_month { year + 1 } else { year };

    let start = NaiveDate::from_ymd_opt(year, start_month, start_day)?;
    let end = NaiveDate::from_ymd_opt(end_year, end_month, end_day)?;
    if end < start {
        return None;
    }

    let span = months_between(year, start_month, end_year, end_month) + 1;
    let span = u32::try_from(span).ok()?;
    let periods = LeavePeriod::series(year, start_month, span, 1, PeriodKind::Consecutive)
        .into_iter()
        .map(|p| p.with_months_count(count))
        .collect();
    Some(periods)
}
