//! Urgency classification and summary statistics.
//!
//! The classifier turns an employee's age, tenure and leave balance into an
//! urgency tier against explicit thresholds; the aggregator rolls classified
//! records up for reporting.

mod statistics;
mod urgency;

pub use statistics::{Statistics, aggregate};
pub use urgency::{UrgencyInput, age_on, assess, classify, whole_months_between};
