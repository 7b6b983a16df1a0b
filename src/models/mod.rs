//! Core data models for the Premium Leave Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod fields;
mod period;
mod problem;
mod urgency;

pub use employee::{EmployeeRecord, Sex};
pub use fields::{CanonicalField, CanonicalFields, RawRow};
pub use period::{
    LeavePeriod, MAX_BLOCK_MONTHS, PeriodKind, last_day_of_month, months_between, shift_month,
};
pub use problem::{DataProblem, ProblemReason};
pub use urgency::{UrgencyAssessment, UrgencyRule, UrgencyTier};
