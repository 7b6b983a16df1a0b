//! Configuration types for urgency classification.
//!
//! These structures are deserialized from the YAML files of a configuration
//! directory and handed to the classifier as explicit, immutable values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Sex;

/// Largest accepted mandatory-retirement age.
pub const MAX_RETIREMENT_AGE: u32 = 120;

/// Retirement-eligibility thresholds and urgency bands.
///
/// Months are counted to the mandatory-retirement date. The bands must satisfy
/// `critical_max_months <= high_max_months <= moderate_max_months`.
///
/// # Example
///
/// ```
/// use premium_leave_engine::config::UrgencyThresholds;
/// use premium_leave_engine::models::Sex;
/// use rust_decimal::Decimal;
///
/// let thresholds = UrgencyThresholds::default();
/// assert_eq!(thresholds.mandatory_retirement_age, 75);
/// assert_eq!(thresholds.min_points(Sex::Female), Decimal::from(93));
/// assert!(thresholds.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyThresholds {
    /// Age of compulsory retirement.
    pub mandatory_retirement_age: u32,
    /// Minimum age plus tenure for men to retire voluntarily.
    pub min_points_male: Decimal,
    /// Minimum age plus tenure for women to retire voluntarily.
    pub min_points_female: Decimal,
    /// Minimum age for men to retire voluntarily.
    pub min_age_male: u32,
    /// Minimum age for women to retire voluntarily.
    pub min_age_female: u32,
    /// Upper bound, in months to retirement, of the critical band.
    pub critical_max_months: i64,
    /// Upper bound of the high band.
    pub high_max_months: i64,
    /// Upper bound of the moderate band.
    pub moderate_max_months: i64,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            mandatory_retirement_age: 75,
            min_points_male: Decimal::from(103),
            min_points_female: Decimal::from(93),
            min_age_male: 62,
            min_age_female: 57,
            critical_max_months: 24,
            high_max_months: 60,
            moderate_max_months: 84,
        }
    }
}

impl UrgencyThresholds {
    /// Points threshold for `sex`; unknown sex uses the male threshold.
    pub fn min_points(&self, sex: Sex) -> Decimal {
        match sex {
            Sex::Female => self.min_points_female,
            Sex::Male | Sex::Unknown => self.min_points_male,
        }
    }

    /// Minimum age for `sex`; unknown sex uses the male threshold.
    pub fn min_age(&self, sex: Sex) -> u32 {
        match sex {
            Sex::Female => self.min_age_female,
            Sex::Male | Sex::Unknown => self.min_age_male,
        }
    }

    /// Checks that the thresholds are internally consistent.
    pub fn validate(&self) -> EngineResult<()> {
        if self.mandatory_retirement_age == 0 {
            return Err(invalid("mandatory_retirement_age must be positive"));
        }
        if self.mandatory_retirement_age > MAX_RETIREMENT_AGE {
            return Err(invalid(format!(
                "mandatory_retirement_age must not exceed {}, got {}",
                MAX_RETIREMENT_AGE, self.mandatory_retirement_age
            )));
        }
        if self.min_age_male == 0 || self.min_age_female == 0 {
            return Err(invalid("minimum ages must be positive"));
        }
        if self.min_points_male <= Decimal::ZERO || self.min_points_female <= Decimal::ZERO {
            return Err(invalid("minimum points must be positive"));
        }
        if self.critical_max_months < 0 {
            return Err(invalid("critical_max_months must not be negative"));
        }
        if self.critical_max_months > self.high_max_months
            || self.high_max_months > self.moderate_max_months
        {
            return Err(invalid(format!(
                "bands must satisfy critical <= high <= moderate, got {} / {} / {}",
                self.critical_max_months, self.high_max_months, self.moderate_max_months
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidThresholds {
        message: message.into(),
    }
}
