//! Employee record model and related types.
//!
//! This module defines the [`EmployeeRecord`] produced for every usable
//! spreadsheet row, together with the [`Sex`] enum the retirement rules depend on.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CanonicalFields, LeavePeriod, UrgencyAssessment, UrgencyTier};

/// Sex as recorded in the spreadsheet; retirement thresholds differ by sex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Not recorded or not recognized.
    #[default]
    Unknown,
}

impl Sex {
    /// Reads a sex cell (`M`, `Masculino`, `F`, `Feminino`, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use premium_leave_engine::models::Sex;
    ///
    /// assert_eq!(Sex::parse(" feminino "), Sex::Female);
    /// assert_eq!(Sex::parse("M"), Sex::Male);
    /// assert_eq!(Sex::parse(""), Sex::Unknown);
    /// ```
    pub fn parse(text: &str) -> Sex {
        let upper = text.trim().to_uppercase();
        match upper.as_str() {
            "M" | "MASC" | "MASC." | "MASCULINO" | "HOMEM" => Sex::Male,
            "F" | "FEM" | "FEM." | "FEMININO" | "MULHER" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

/// A classified employee.
///
/// When `schedule_parse_failed` is true, `periods` is empty and the matching
/// data-quality problem must be surfaced to the user: the employee does not
/// have "no leave", their schedule could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Canonical identifying fields.
    pub fields: CanonicalFields,
    /// Age in whole years, when known.
    pub age_years: Option<u32>,
    /// Sex.
    pub sex: Sex,
    /// Date of birth, when known.
    pub birth_date: Option<NaiveDate>,
    /// Date of admission into service, when known.
    pub admission_date: Option<NaiveDate>,
    /// Years of service.
    pub tenure_years: Decimal,
    /// Total premium-leave months accrued.
    pub total_accrued_months: u32,
    /// Premium-leave months already used.
    pub used_months: u32,
    /// Scheduled leave, sorted by start date.
    pub periods: Vec<LeavePeriod>,
    /// True when a non-empty schedule could not be interpreted.
    pub schedule_parse_failed: bool,
    /// The urgency tier.
    pub urgency_tier: UrgencyTier,
    /// How the tier was decided.
    pub urgency: UrgencyAssessment,
}

impl EmployeeRecord {
    /// Employee name.
    pub fn name(&self) -> &str {
        &self.fields.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_male_variants() {
        for text in ["M", "m", "Masculino", "MASC.", " homem "] {
            assert_eq!(Sex::parse(text), Sex::Male, "{text}");
        }
    }

    #[test]
    fn test_parse_female_variants() {
        for text in ["F", "f", "Feminino", "fem", "Mulher"] {
            assert_eq!(Sex::parse(text), Sex::Female, "{text}");
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Sex::parse("X"), Sex::Unknown);
        assert_eq!(Sex::parse("   "), Sex::Unknown);
    }

    #[test]
    fn test_sex_serialization() {
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"female\"");
        assert_eq!(serde_json::to_string(&Sex::Unknown).unwrap(), "\"unknown\"");
    }
}
