//! Free-text leave schedule interpretation.
//!
//! A schedule cell such as `início em 03/2026 (12 meses consecutivos)` is
//! normalized and offered to an ordered table of [`PatternHandler`]s; the first
//! handler returning at least one period wins. Text asserting a yearly cadence
//! with no anchor year is rejected up front as ambiguous.
//!
//! # Example
//!
//! ```
//! use premium_leave_engine::schedule::parse_schedule;
//!
//! let periods = parse_schedule("Início em 01/2026 (3 meses consecutivos)");
//! let keys: Vec<String> = periods.iter().map(|p| p.month_key()).collect();
//! assert_eq!(keys, vec!["2026-01", "2026-02", "2026-03"]);
//!
//! assert!(parse_schedule("um mês a cada ano").is_empty());
//! ```

mod handlers;
mod header_year;

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::models::LeavePeriod;
use crate::parsing::normalize_text;

pub use handlers::{ANNUAL_OCCURRENCES, HANDLERS, MONTHLY_OCCURRENCES, PatternHandler};
pub use header_year::{header_year_block, header_year_range};

/// Result of interpreting one schedule cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// The cell was blank: nothing scheduled.
    Empty,
    /// A handler recognized the text.
    Parsed {
        /// Name of the handler that matched.
        handler: &'static str,
        /// The periods it produced, in handler order.
        periods: Vec<LeavePeriod>,
    },
    /// A yearly cadence without any anchor year.
    Ambiguous,
    /// Non-blank text no handler recognized.
    Unrecognized,
}

impl ScheduleOutcome {
    /// Periods produced, empty unless [`ScheduleOutcome::Parsed`].
    pub fn periods(&self) -> &[LeavePeriod] {
        match self {
            ScheduleOutcome::Parsed { periods, .. } => periods,
            _ => &[],
        }
    }

    /// Consumes the outcome, returning its periods.
    pub fn into_periods(self) -> Vec<LeavePeriod> {
        match self {
            ScheduleOutcome::Parsed { periods, .. } => periods,
            _ => Vec::new(),
        }
    }
}

fn ambiguous_cadence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:um|1)\s+mes\s+(?:a\s+cada|por|cada)\s+ano\b")
            .expect("invalid ambiguous cadence regex")
    })
}

fn four_digit_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{4}\b").expect("invalid year regex"))
}

/// True for the "one month each year" phrasing with no 4-digit year anywhere.
///
/// Expects normalized text.
pub fn is_ambiguous(normalized: &str) -> bool {
    ambiguous_cadence_re().is_match(normalized) && !four_digit_year_re().is_match(normalized)
}

fn run_handlers(handlers: &[PatternHandler], normalized: &str, source: &str) -> ScheduleOutcome {
    for handler in handlers {
        let Some(periods) = (handler.matcher)(normalized) else {
            continue;
        };
        if periods.is_empty() {
            continue;
        }
        debug!(
            handler = handler.name,
            periods = periods.len(),
            "Schedule text matched"
        );
        let periods = periods
            .into_iter()
            .map(|p| p.with_source(source.to_string()))
            .collect();
        return ScheduleOutcome::Parsed {
            handler: handler.name,
            periods,
        };
    }
    ScheduleOutcome::Unrecognized
}

/// Interprets a schedule cell, reporting which handler matched or why none did.
pub fn interpret_schedule(text: &str) -> ScheduleOutcome {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return ScheduleOutcome::Empty;
    }
    if is_ambiguous(&normalized) {
        debug!(text = %text.trim(), "Schedule text is ambiguous");
        return ScheduleOutcome::Ambiguous;
    }
    run_handlers(&HANDLERS, &normalized, text.trim())
}

/// Converts a schedule cell into leave periods.
///
/// An empty result for non-blank text means the text needs human review; use
/// [`interpret_schedule`] to tell the cases apart.
pub fn parse_schedule(text: &str) -> Vec<LeavePeriod> {
    interpret_schedule(text).into_periods()
}

/// Like [`interpret_schedule`], first trying the `<N> meses <DD>/<MM>` forms
/// against the year taken from the column header.
///
/// The ambiguity guard runs before any form is tried; a header year does not
/// anchor the "one month each year" phrasing.
pub fn interpret_schedule_with_year(text: &str, header_year: Option<i32>) -> ScheduleOutcome {
    let Some(year) = header_year else {
        return interpret_schedule(text);
    };
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return ScheduleOutcome::Empty;
    }
    if is_ambiguous(&normalized) {
        debug!(text = %text.trim(), "Schedule text is ambiguous");
        return ScheduleOutcome::Ambiguous;
    }

    let header_handlers: [(&'static str, fn(&str, i32) -> Option<Vec<LeavePeriod>>); 2] = [
        ("header_year_range", header_year_range),
        ("header_year_block", header_year_block),
    ];
    for (name, matcher) in header_handlers {
        if let Some(periods) = matcher(&normalized, year) {
            debug!(handler = name, year, periods = periods.len(), "Schedule text matched");
            let source = text.trim();
            return ScheduleOutcome::Parsed {
                handler: name,
                periods: periods
                    .into_iter()
                    .map(|p| p.with_source(source.to_string()))
                    .collect(),
            };
        }
    }

    interpret_schedule(text)
}

/// Like [`parse_schedule`], using `header_year` for cells that omit the year.
///
/// # Example
///
/// ```
/// use premium_leave_engine::schedule::parse_schedule_with_year;
///
/// let periods = parse_schedule_with_year("2 meses 10/03", Some(2026));
/// assert_eq!(periods.len(), 2);
/// assert_eq!(periods[0].month_key(), "2026-03");
/// ```
pub fn parse_schedule_with_year(text: &str, header_year: Option<i32>) -> Vec<LeavePeriod> {
    interpret_schedule_with_year(text, header_year).into_periods()
}
