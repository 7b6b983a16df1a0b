//! Retirement-urgency classification.
//!
//! The classifier walks a fixed priority ladder. The first two rungs are
//! overrides (leave at risk regardless of distance to retirement) and take
//! precedence over the time-distance bands.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::UrgencyThresholds;
use crate::models::{Sex, UrgencyAssessment, UrgencyRule, UrgencyTier};

/// Everything the classifier needs to know about one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyInput {
    /// Age in whole years; derived from `birth_date` when absent.
    pub age_years: Option<u32>,
    /// Years of service.
    pub tenure_years: Decimal,
    /// Leave months already taken.
    pub used_months: u32,
    /// Leave months scheduled from the current month on.
    pub scheduled_months: u32,
    /// Leave months accrued in total.
    pub total_accrued_months: u32,
    /// Sex; unknown uses the male thresholds.
    pub sex: Sex,
    /// Date of birth, for a precise retirement date.
    pub birth_date: Option<NaiveDate>,
}

/// Age in whole years on `today`, `None` for a birth date in the future.
///
/// # Example
///
/// ```
/// use premium_leave_engine::classification::age_on;
/// use chrono::NaiveDate;
///
/// let birth = NaiveDate::from_ymd_opt(1960, 6, 15).unwrap();
/// assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2026, 6, 14).unwrap()), Some(65));
/// assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()), Some(66));
/// ```
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Whole calendar months from `from` to `to`, truncated toward zero.
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months = i64::from(to.year() - from.year()) * 12 + i64::from(to.month())
        - i64::from(from.month());
    if months > 0 && to.day() < from.day() {
        months -= 1;
    } else if months < 0 && to.day() > from.day() {
        months += 1;
    }
    months
}

/// Months from `today` until compulsory retirement.
///
/// Uses the birth date when known, otherwise `(mandatory age - age) * 12`.
fn months_to_mandatory_retirement(
    age: Option<u32>,
    birth_date: Option<NaiveDate>,
    thresholds: &UrgencyThresholds,
    today: NaiveDate,
) -> Option<i64> {
    if let Some(birth) = birth_date {
        let months = thresholds.mandatory_retirement_age.checked_mul(12)?;
        let retirement = birth.checked_add_months(Months::new(months))?;
        return Some(whole_months_between(today, retirement));
    }
    age.map(|age| (i64::from(thresholds.mandatory_retirement_age) - i64::from(age)) * 12)
}

/// Classifies an employee and records how the tier was reached.
///
/// # Arguments
///
/// * `input` - The employee's age, tenure, leave balance and sex
/// * `thresholds` - Eligibility thresholds and urgency bands
/// * `today` - The date the classification is made on
///
/// # Returns
///
/// An [`UrgencyAssessment`] with the tier, the rule that fired and the derived
/// quantities. Without an age or a birth date the tier is `Low` and the rule
/// is [`UrgencyRule::InsufficientData`].
///
/// # Example
///
/// ```
/// use premium_leave_engine::classification::{UrgencyInput, assess};
/// use premium_leave_engine::config::UrgencyThresholds;
/// use premium_leave_engine::models::{Sex, UrgencyRule, UrgencyTier};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = UrgencyInput {
///     age_years: Some(64),
///     tenure_years: Decimal::from(40),
///     total_accrued_months: 6,
///     sex: Sex::Male,
///     ..UrgencyInput::default()
/// };
/// let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let assessment = assess(&input, &UrgencyThresholds::default(), today);
///
/// assert_eq!(assessment.tier, UrgencyTier::Critical);
/// assert_eq!(assessment.rule, UrgencyRule::EligibleWithRemainingLeave);
/// ```
pub fn assess(
    input: &UrgencyInput,
    thresholds: &UrgencyThresholds,
    today: NaiveDate,
) -> UrgencyAssessment {
    let age = input
        .age_years
        .or_else(|| input.birth_date.and_then(|birth| age_on(birth, today)));

    let remaining_leave_months = (i64::from(input.total_accrued_months)
        - i64::from(input.used_months)
        - i64::from(input.scheduled_months))
    .max(0);

    let audit_input = serde_json::json!({
        "age_years": age,
        "tenure_years": input.tenure_years.normalize().to_string(),
        "used_months": input.used_months,
        "scheduled_months": input.scheduled_months,
        "total_accrued_months": input.total_accrued_months,
        "sex": input.sex,
        "birth_date": input.birth_date,
        "today": today,
    });

    let (Some(age), Some(months_to_retirement)) = (
        age,
        months_to_mandatory_retirement(age, input.birth_date, thresholds, today),
    ) else {
        return UrgencyAssessment {
            tier: UrgencyTier::Low,
            rule: UrgencyRule::InsufficientData,
            points: input.tenure_years,
            eligible_now: false,
            remaining_leave_months,
            months_to_mandatory_retirement: None,
            input: audit_input,
            reasoning: "No age or birth date available - defaulting to Low".to_string(),
        };
    };

    let points = Decimal::from(age) + input.tenure_years;
    let min_points = thresholds.min_points(input.sex);
    let min_age = thresholds.min_age(input.sex);
    let eligible_now = points >= min_points && age >= min_age;

    let (tier, rule, reasoning) = if eligible_now && remaining_leave_months > 0 {
        (
            UrgencyTier::Critical,
            UrgencyRule::EligibleWithRemainingLeave,
            format!(
                "Eligible to retire now ({} points >= {}, age {} >= {}) with {} leave months remaining",
                points.normalize(),
                min_points.normalize(),
                age,
                min_age,
                remaining_leave_months
            ),
        )
    } else if remaining_leave_months > months_to_retirement {
        (
            UrgencyTier::Critical,
            UrgencyRule::LeaveExceedsTimeToRetirement,
            format!(
                "{} leave months remaining > {} months to mandatory retirement",
                remaining_leave_months, months_to_retirement
            ),
        )
    } else if months_to_retirement <= thresholds.critical_max_months {
        (
            UrgencyTier::Critical,
            UrgencyRule::CriticalBand,
            format!(
                "{} months to mandatory retirement <= {}",
                months_to_retirement, thresholds.critical_max_months
            ),
        )
    } else if months_to_retirement <= thresholds.high_max_months {
        (
            UrgencyTier::High,
            UrgencyRule::HighBand,
            format!(
                "{} months to mandatory retirement <= {}",
                months_to_retirement, thresholds.high_max_months
            ),
        )
    } else if months_to_retirement <= thresholds.moderate_max_months {
        (
            UrgencyTier::Moderate,
            UrgencyRule::ModerateBand,
            format!(
                "{} months to mandatory retirement <= {}",
                months_to_retirement, thresholds.moderate_max_months
            ),
        )
    } else {
        (
            UrgencyTier::Low,
            UrgencyRule::BeyondBands,
            format!(
                "{} months to mandatory retirement > {}",
                months_to_retirement, thresholds.moderate_max_months
            ),
        )
    };

    UrgencyAssessment {
        tier,
        rule,
        points,
        eligible_now,
        remaining_leave_months,
        months_to_mandatory_retirement: Some(months_to_retirement),
        input: audit_input,
        reasoning,
    }
}

/// Classifies an employee into an urgency tier.
pub fn classify(
    input: &UrgencyInput,
    thresholds: &UrgencyThresholds,
    today: NaiveDate,
) -> UrgencyTier {
    assess(input, thresholds, today).tier
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 1, 15)
    }

    fn thresholds() -> UrgencyThresholds {
        UrgencyThresholds::default()
    }

    fn input(age: u32, tenure: i64, accrued: u32) -> UrgencyInput {
        UrgencyInput {
            age_years: Some(age),
            tenure_years: Decimal::from(tenure),
            total_accrued_months: accrued,
            sex: Sex::Male,
            ..UrgencyInput::default()
        }
    }

    // ==========================================================================
    // Derived quantities
    // ==========================================================================

    #[test]
    fn test_age_on_birthday_boundary() {
        let birth = date(1970, 3, 10);
        assert_eq!(age_on(birth, date(2026, 3, 9)), Some(55));
        assert_eq!(age_on(birth, date(2026, 3, 10)), Some(56));
        assert_eq!(age_on(date(2030, 1, 1), today()), None);
    }

    #[test]
    fn test_whole_months_between_truncates() {
        assert_eq!(whole_months_between(date(2026, 1, 15), date(2026, 3, 15)), 2);
        assert_eq!(whole_months_between(date(2026, 1, 15), date(2026, 3, 14)), 1);
        assert_eq!(whole_months_between(date(2026, 3, 15), date(2026, 1, 16)), -1);
        assert_eq!(whole_months_between(date(2026, 3, 15), date(2026, 1, 15)), -2);
    }

    #[test]
    fn test_remaining_leave_never_negative() {
        let mut i = input(40, 10, 3);
        i.used_months = 2;
        i.scheduled_months = 5;
        assert_eq!(assess(&i, &thresholds(), today()).remaining_leave_months, 0);
    }

    #[test]
    fn test_points_add_fractional_tenure() {
        let mut i = input(60, 0, 0);
        i.tenure_years = Decimal::new(3125, 2);
        assert_eq!(assess(&i, &thresholds(), today()).points, Decimal::new(9125, 2));
    }

    #[test]
    fn test_months_to_retirement_from_age() {
        let a = assess(&input(70, 10, 0), &thresholds(), today());
        assert_eq!(a.months_to_mandatory_retirement, Some(60));
    }

    #[test]
    fn test_months_to_retirement_from_birth_date() {
        let i = UrgencyInput {
            age_years: None,
            birth_date: Some(date(1952, 7, 20)),
            ..input(0, 10, 0)
        };
        // Retires 2027-07-20: 18 whole months after 2026-01-15.
        let a = assess(&i, &thresholds(), today());
        assert_eq!(a.months_to_mandatory_retirement, Some(18));
        assert_eq!(a.input["age_years"], serde_json::json!(73));
    }

    // ==========================================================================
    // Ladder
    // ==========================================================================

    #[test]
    fn test_eligible_with_leave_is_critical_regardless_of_distance() {
        let a = assess(&input(64, 40, 5), &thresholds(), today());
        assert!(a.eligible_now);
        assert_eq!(a.remaining_leave_months, 5);
        assert_eq!(a.months_to_mandatory_retirement, Some(132));
        assert_eq!(a.tier, UrgencyTier::Critical);
        assert_eq!(a.rule, UrgencyRule::EligibleWithRemainingLeave);
    }

    #[test]
    fn test_eligibility_requires_points_and_age() {
        // Points met, age not met.
        let a = assess(&input(55, 50, 5), &thresholds(), today());
        assert!(!a.eligible_now);
        // Age met, points not met.
        let a = assess(&input(63, 10, 5), &thresholds(), today());
        assert!(!a.eligible_now);
    }

    #[test]
    fn test_leave_exceeding_time_to_retirement_is_critical() {
        let a = assess(&input(70, 5, 90), &thresholds(), today());
        assert!(!a.eligible_now);
        assert_eq!(a.tier, UrgencyTier::Critical);
        assert_eq!(a.rule, UrgencyRule::LeaveExceedsTimeToRetirement);
    }

    #[test]
    fn test_time_bands() {
        let cases = [
            (74, UrgencyTier::Critical, UrgencyRule::CriticalBand),
            (73, UrgencyTier::Critical, UrgencyRule::CriticalBand),
            (72, UrgencyTier::High, UrgencyRule::HighBand),
            (70, UrgencyTier::High, UrgencyRule::HighBand),
            (69, UrgencyTier::Moderate, UrgencyRule::ModerateBand),
            (68, UrgencyTier::Moderate, UrgencyRule::ModerateBand),
            (67, UrgencyTier::Low, UrgencyRule::BeyondBands),
        ];
        for (age, tier, rule) in cases {
            let a = assess(&input(age, 0, 0), &thresholds(), today());
            assert_eq!((a.tier, a.rule), (tier, rule), "age {age}");
        }
    }

    #[test]
    fn test_not_eligible_no_leave_far_from_retirement_is_low() {
        let i = UrgencyInput {
            age_years: None,
            birth_date: Some(date(1959, 5, 15)),
            ..input(0, 0, 0)
        };
        let a = assess(&i, &thresholds(), today());
        assert_eq!(a.months_to_mandatory_retirement, Some(100));
        assert!(!a.eligible_now);
        assert_eq!(a.tier, UrgencyTier::Low);

        let i = UrgencyInput {
            birth_date: Some(date(1959, 5, 14)),
            ..i
        };
        assert_eq!(
            assess(&i, &thresholds(), today()).months_to_mandatory_retirement,
            Some(99)
        );
    }

    #[test]
    fn test_female_thresholds() {
        let mut i = input(58, 36, 2);
        i.sex = Sex::Female;
        assert_eq!(classify(&i, &thresholds(), today()), UrgencyTier::Critical);
        i.sex = Sex::Male;
        assert_eq!(classify(&i, &thresholds(), today()), UrgencyTier::Low);
    }

    #[test]
    fn test_unknown_sex_uses_stricter_thresholds() {
        let mut i = input(58, 36, 2);
        i.sex = Sex::Unknown;
        assert!(!assess(&i, &thresholds(), today()).eligible_now);
    }

    #[test]
    fn test_missing_age_and_birth_date_is_low() {
        let i = UrgencyInput {
            age_years: None,
            ..input(0, 30, 12)
        };
        let a = assess(&i, &thresholds(), today());
        assert_eq!(a.tier, UrgencyTier::Low);
        assert_eq!(a.rule, UrgencyRule::InsufficientData);
        assert_eq!(a.months_to_mandatory_retirement, None);
    }

    #[test]
    fn test_unvalidated_retirement_age_does_not_overflow() {
        let t = UrgencyThresholds {
            mandatory_retirement_age: u32::MAX,
            ..UrgencyThresholds::default()
        };
        let i = UrgencyInput {
            age_years: None,
            birth_date: Some(date(1960, 1, 1)),
            ..input(0, 10, 0)
        };
        let a = assess(&i, &t, today());
        assert_eq!(a.months_to_mandatory_retirement, None);
        assert_eq!(a.tier, UrgencyTier::Low);
        assert_eq!(a.rule, UrgencyRule::InsufficientData);
    }

    #[test]
    fn test_custom_bands() {
        let t = UrgencyThresholds {
            critical_max_months: 6,
            high_max_months: 12,
            moderate_max_months: 24,
            ..UrgencyThresholds::default()
        };
        assert_eq!(classify(&input(74, 0, 0), &t, today()), UrgencyTier::High);
        assert_eq!(classify(&input(73, 0, 0), &t, today()), UrgencyTier::Moderate);
        assert_eq!(classify(&input(72, 0, 0), &t, today()), UrgencyTier::Low);
    }

    #[test]
    fn test_assessment_records_inputs() {
        let a = assess(&input(64, 40, 5), &thresholds(), today());
        assert_eq!(a.input["tenure_years"], "40");
        assert_eq!(a.input["sex"], "male");
        assert_eq!(a.input["today"], "2026-01-15");
        assert!(a.reasoning.contains("Eligible to retire now"));
    }
}
