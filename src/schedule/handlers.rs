//! The ordered schedule pattern handlers.
//!
//! Each handler is a pure function over normalized text (lower-case, no
//! diacritics, single spaces) returning the periods it recognized, or `None`
//! when its phrasing is absent. [`HANDLERS`] fixes the priority order.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::models::{LeavePeriod, MAX_BLOCK_MONTHS, PeriodKind};
use crate::parsing::{MONTH_ALTERNATION, MONTH_NAME_ALTERNATION, month_from_name, parse_date};
use crate::parsing::pivot_two_digit_year;

/// Number of yearly periods emitted for an open-ended annual cadence.
pub const ANNUAL_OCCURRENCES: u32 = 5;

/// Number of monthly periods emitted for an open-ended monthly cadence.
pub const MONTHLY_OCCURRENCES: u32 = 12;

/// A named schedule recognizer.
#[derive(Debug, Clone, Copy)]
pub struct PatternHandler {
    /// Stable identifier, reported in diagnostics.
    pub name: &'static str,
    /// The recognizer.
    pub matcher: fn(&str) -> Option<Vec<LeavePeriod>>,
}

/// Every header-agnostic handler, highest priority first.
pub const HANDLERS: [PatternHandler; 7] = [
    PatternHandler {
        name: "starts_at",
        matcher: starts_at,
    },
    PatternHandler {
        name: "from_date_recurring",
        matcher: from_date_recurring,
    },
    PatternHandler {
        name: "specific_plus_annual",
        matcher: specific_plus_annual,
    },
    PatternHandler {
        name: "bare_dates",
        matcher: bare_dates,
    },
    PatternHandler {
        name: "listed_months",
        matcher: listed_months,
    },
    PatternHandler {
        name: "abbreviated_month_year",
        matcher: abbreviated_month_year,
    },
    PatternHandler {
        name: "month_year_annual",
        matcher: month_year_annual,
    },
];

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new(&$pattern).expect(concat!("invalid ", stringify!($name))))
        }
    };
}

cached_regex!(
    starts_at_re,
    r"inicio\s+em:?\s*(?:(\d{1,2})/)?(\d{1,2})/(\d{4})\b"
);
cached_regex!(
    from_date_re,
    r"a\s+partir\s+de:?\s*(?:(\d{1,2})/)?(\d{1,2})/(\d{4})\b"
);
cached_regex!(
    from_year_re,
    r"a\s+partir\s+de:?\s*(?:o\s+ano\s+de\s+)?(\d{4})\b"
);
cached_regex!(month_count_re, r"\(?\s*(\d{1,3})\s+mes(?:es)?\b");
cached_regex!(every_year_re, r"\b(?:cada|por)\s+ano\b");
cached_regex!(
    full_month_name_re,
    format!(r"\b({MONTH_NAME_ALTERNATION})\b")
);
cached_regex!(full_date_re, r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b");
cached_regex!(any_date_re, r"\b\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})\b");
cached_regex!(listed_months_re, r"\bmes(?:es)?\s*:\s*(.+)$");
cached_regex!(
    listed_month_token_re,
    format!(r"\b(?:(\d{{1,2}})|({MONTH_ALTERNATION}))\.?/(\d{{4}})\b")
);
cached_regex!(
    abbreviated_re,
    r"\b(jan|fev|mar|abr|mai|jun|jul|ago|set|out|nov|dez)\.?\s*[-/]\s*(\d{2})\b"
);
cached_regex!(
    month_slash_year_re,
    format!(r"\b({MONTH_ALTERNATION})\.?\s*/\s*(\d{{4}})\b")
);
cached_regex!(
    once_a_year_re,
    r"\b(?:uma|1)\s+(?:vez\s+)?por\s+ano\b|\ba\s+cada\s+ano\b"
);

/// Reads the `(day?, month, year)` groups shared by the date-anchored handlers.
///
/// Returns the year and month; an explicit day must form a real date.
fn anchored_month(caps: &Captures<'_>) -> Option<(i32, u32)> {
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;
    match caps.get(1) {
        Some(day) => {
            let day: u32 = day.as_str().parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)?;
        }
        None if !(1..=12).contains(&month) => return None,
        None => {}
    }
    Some((year, month))
}

/// `início em <MM/AAAA | DD/MM/AAAA> [(N meses)] [consecutivos]`.
pub fn starts_at(text: &str) -> Option<Vec<LeavePeriod>> {
    let caps = starts_at_re().captures(text)?;
    let (year, month) = anchored_month(&caps)?;

    let tail = &text[caps.get(0)?.end()..];
    let count = match month_count_re().captures(tail) {
        Some(count) => Some(count[1].parse::<u32>().ok()?),
        None => None,
    };
    if count.is_some_and(|c| c == 0 || c > MAX_BLOCK_MONTHS) {
        return None;
    }

    if text.contains("consecutiv") {
        let count = count.unwrap_or(1);
        let periods = LeavePeriod::series(year, month, count, 1, PeriodKind::Consecutive)
            .into_iter()
            .map(|p| p.with_months_count(count))
            .collect();
        return Some(periods);
    }

    let period = LeavePeriod::month(year, month, PeriodKind::Single)?;
    Some(vec![match count {
        Some(count) => period.with_months_count(count),
        None => period,
    }])
}

/// `a partir de <MM/AAAA | DD/MM/AAAA>`, yearly when `cada ano` / `por ano`
/// is present and monthly otherwise.
pub fn from_date_recurring(text: &str) -> Option<Vec<LeavePeriod>> {
    let caps = from_date_re().captures(text)?;
    let (year, month) = anchored_month(&caps)?;

    if every_year_re().is_match(text) {
        Some(LeavePeriod::series(
            year,
            month,
            ANNUAL_OCCURRENCES,
            12,
            PeriodKind::Annual,
        ))
    } else {
        Some(LeavePeriod::series(
            year,
            month,
            MONTHLY_OCCURRENCES,
            1,
            PeriodKind::Monthly,
        ))
    }
}

/// `<mês> de cada ano a partir de <AAAA>`, plus any specific `DD/MM/AAAA`
/// stated elsewhere in the text.
pub fn specific_plus_annual(text: &str) -> Option<Vec<LeavePeriod>> {
    if !every_year_re().is_match(text) {
        return None;
    }
    let month = month_from_name(&full_month_name_re().captures(text)?[1])?;
    let year: i32 = from_year_re().captures(text)?[1].parse().ok()?;

    let mut periods: Vec<LeavePeriod> = full_date_re()
        .find_iter(text)
        .find_map(|m| parse_date(m.as_str()))
        .and_then(|date| LeavePeriod::containing(date, PeriodKind::Specific))
        .into_iter()
        .collect();
    periods.extend(LeavePeriod::series(
        year,
        month,
        ANNUAL_OCCURRENCES,
        12,
        PeriodKind::AnnualRecurring,
    ));
    Some(periods)
}

/// Standalone `DD/MM/AAAA` dates, one month each, when the text has no
/// `início em` or `a partir de` anchor.
pub fn bare_dates(text: &str) -> Option<Vec<LeavePeriod>> {
    if text.contains("inicio em") || text.contains("a partir de") {
        return None;
    }
    let periods: Vec<LeavePeriod> = any_date_re()
        .find_iter(text)
        .filter_map(|m| parse_date(m.as_str()))
        .filter_map(|date| LeavePeriod::containing(date, PeriodKind::Specific))
        .collect();
    (!periods.is_empty()).then_some(periods)
}

/// `meses: 09/2026; 09/2027`, one month per listed token.
pub fn listed_months(text: &str) -> Option<Vec<LeavePeriod>> {
    let list = listed_months_re().captures(text)?.get(1)?.as_str();
    let periods: Vec<LeavePeriod> = listed_month_token_re()
        .captures_iter(list)
        .filter_map(|caps| {
            let month = match (caps.get(1), caps.get(2)) {
                (Some(number), _) => number.as_str().parse().ok()?,
                (None, Some(name)) => month_from_name(name.as_str())?,
                (None, None) => return None,
            };
            let year = caps[3].parse().ok()?;
            LeavePeriod::month(year, month, PeriodKind::Specific)
        })
        .collect();
    (!periods.is_empty()).then_some(periods)
}

/// `jan.-28` style tokens with two-digit years.
pub fn abbreviated_month_year(text: &str) -> Option<Vec<LeavePeriod>> {
    let periods: Vec<LeavePeriod> = abbreviated_re()
        .captures_iter(text)
        .filter_map(|caps| {
            let month = month_from_name(&caps[1])?;
            let yy: u32 = caps[2].parse().ok()?;
            LeavePeriod::month(pivot_two_digit_year(yy), month, PeriodKind::Single)
        })
        .collect();
    (!periods.is_empty()).then_some(periods)
}

/// `jan/2030` with an explicit once-a-year cadence.
pub fn month_year_annual(text: &str) -> Option<Vec<LeavePeriod>> {
    if !once_a_year_re().is_match(text) {
        return None;
    }
    let caps = month_slash_year_re().captures(text)?;
    let month = month_from_name(&caps[1])?;
    let year: i32 = caps[2].parse().ok()?;
    Some(LeavePeriod::series(
        year,
        month,
        ANNUAL_OCCURRENCES,
        12,
        PeriodKind::Annual,
    ))
}
