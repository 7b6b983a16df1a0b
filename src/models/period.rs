//! Leave period model.
//!
//! Schedules are month-granular: every [`LeavePeriod`] starts on the first day
//! of a calendar month and ends on the last day of that same month, whatever day
//! the source text mentioned.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Largest block of consecutive months a single cell may describe.
///
/// Anything longer is treated as a data-entry error rather than expanded.
pub const MAX_BLOCK_MONTHS: u32 = 120;

/// How a leave period was expressed in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodKind {
    /// One month, stated on its own.
    Single,
    /// One month of a block of consecutive months.
    Consecutive,
    /// A specific date (or month) stated explicitly.
    Specific,
    /// One month of a monthly cadence.
    Monthly,
    /// One month of a yearly cadence.
    Annual,
    /// One month of a yearly cadence anchored on a named month.
    AnnualRecurring,
    /// One month of a leave grant read from a structured premium-leave table.
    PremiumLeave,
}

/// A single month of scheduled leave.
///
/// # Example
///
/// ```
/// use premium_leave_engine::models::{LeavePeriod, PeriodKind};
/// use chrono::NaiveDate;
///
/// let period = LeavePeriod::month(2024, 2, PeriodKind::Single).unwrap();
/// assert_eq!(period.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePeriod {
    /// First day of the month.
    pub start: NaiveDate,
    /// Last day of the month.
    pub end: NaiveDate,
    /// How the period was expressed.
    pub kind: PeriodKind,
    /// Size of the block this period belongs to, when the source stated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_count: Option<u32>,
    /// The text the period was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
}

impl LeavePeriod {
    /// Builds the period covering `month` of `year`.
    ///
    /// Returns `None` when the month is out of range or the year is outside
    /// chrono's supported calendar.
    pub fn month(year: i32, month: u32, kind: PeriodKind) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = last_day_of_month(year, month)?;
        Some(Self {
            start,
            end,
            kind,
            months_count: None,
            source_text: None,
        })
    }

    /// Builds the period covering the month that contains `date`.
    pub fn containing(date: NaiveDate, kind: PeriodKind) -> Option<Self> {
        Self::month(date.year(), date.month(), kind)
    }

    /// Builds `count` periods starting at `month` of `year`, each `step` months
    /// after the previous one.
    ///
    /// A `step` of 1 gives consecutive months, 12 gives the same month in
    /// successive years.
    pub fn series(year: i32, month: u32, count: u32, step: u32, kind: PeriodKind) -> Vec<Self> {
        (0..count)
            .filter_map(|i| {
                let (y, m) = shift_month(year, month, i64::from(i) * i64::from(step))?;
                Self::month(y, m, kind)
            })
            .collect()
    }

    /// Records the size of the block this period belongs to.
    pub fn with_months_count(mut self, count: u32) -> Self {
        self.months_count = Some(count);
        self
    }

    /// Records the text this period was derived from.
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Calendar year of the period.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// `YYYY-MM` key of the period.
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.start.year(), self.start.month())
    }
}

/// Returns the last day of `month` in `year`.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = shift_month(year, month, 1)?;
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Moves `(year, month)` by `delta` months, rolling over year boundaries.
pub fn shift_month(year: i32, month: u32, delta: i64) -> Option<(i32, u32)> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let index = i64::from(year) * 12 + i64::from(month - 1) + delta;
    let y = i32::try_from(index.div_euclid(12)).ok()?;
    let m = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    Some((y, m))
}

/// Number of whole calendar months from `(from_year, from_month)` to
/// `(to_year, to_month)`. Negative when the target precedes the origin.
pub fn months_between(from_year: i32, from_month: u32, to_year: i32, to_month: u32) -> i64 {
    (i64::from(to_year) - i64::from(from_year)) * 12 + i64::from(to_month) - i64::from(from_month)
}
