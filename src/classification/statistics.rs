//! Summary statistics over classified employee records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{EmployeeRecord, UrgencyTier};

/// Roll-up of a batch of employee records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of records.
    pub total_employees: usize,
    /// Records per urgency tier; every tier is present, possibly with zero.
    pub total_by_tier: BTreeMap<UrgencyTier, usize>,
    /// Scheduled leave periods per `YYYY-MM` month.
    pub total_by_month: BTreeMap<String, usize>,
    /// Scheduled leave periods per year.
    pub total_by_year: BTreeMap<i32, usize>,
    /// Youngest known age.
    pub min_age: Option<u32>,
    /// Oldest known age.
    pub max_age: Option<u32>,
    /// Records whose schedule text could not be interpreted.
    pub schedule_failures: usize,
}

/// Aggregates records into [`Statistics`].
///
/// # Example
///
/// ```
/// use premium_leave_engine::classification::aggregate;
/// use premium_leave_engine::models::UrgencyTier;
///
/// let stats = aggregate(&[]);
/// assert_eq!(stats.total_employees, 0);
/// assert_eq!(stats.total_by_tier[&UrgencyTier::Critical], 0);
/// assert_eq!(stats.min_age, None);
/// ```
pub fn aggregate(records: &[EmployeeRecord]) -> Statistics {
    let mut stats = Statistics {
        total_employees: records.len(),
        total_by_tier: UrgencyTier::ALL.iter().map(|tier| (*tier, 0)).collect(),
        ..Statistics::default()
    };

    for record in records {
        *stats.total_by_tier.entry(record.urgency_tier).or_insert(0) += 1;

        for period in &record.periods {
            *stats.total_by_month.entry(period.month_key()).or_insert(0) += 1;
            *stats.total_by_year.entry(period.year()).or_insert(0) += 1;
        }

        if let Some(age) = record.age_years {
            stats.min_age = Some(stats.min_age.map_or(age, |min| min.min(age)));
            stats.max_age = Some(stats.max_age.map_or(age, |max| max.max(age)));
        }

        if record.schedule_parse_failed {
            stats.schedule_failures += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CanonicalFields, LeavePeriod, PeriodKind, Sex, UrgencyAssessment, UrgencyRule,
    };
    use rust_decimal::Decimal;

    fn record(age: Option<u32>, tier: UrgencyTier, months: &[(i32, u32)]) -> EmployeeRecord {
        EmployeeRecord {
            fields: CanonicalFields {
                name: "Servidor".to_string(),
                ..CanonicalFields::default()
            },
            age_years: age,
            sex: Sex::Unknown,
            birth_date: None,
            admission_date: None,
            tenure_years: Decimal::ZERO,
            total_accrued_months: 0,
            used_months: 0,
            periods: months
                .iter()
                .filter_map(|(y, m)| LeavePeriod::month(*y, *m, PeriodKind::Single))
                .collect(),
            schedule_parse_failed: false,
            urgency_tier: tier,
            urgency: UrgencyAssessment {
                tier,
                rule: UrgencyRule::BeyondBands,
                points: Decimal::ZERO,
                eligible_now: false,
                remaining_leave_months: 0,
                months_to_mandatory_retirement: None,
                input: serde_json::Value::Null,
                reasoning: String::new(),
            },
        }
    }

    #[test]
    fn test_every_tier_key_present() {
        let stats = aggregate(&[record(Some(50), UrgencyTier::High, &[])]);
        assert_eq!(stats.total_by_tier.len(), 4);
        assert_eq!(stats.total_by_tier[&UrgencyTier::High], 1);
        assert_eq!(stats.total_by_tier[&UrgencyTier::Low], 0);
    }

    #[test]
    fn test_periods_grouped_by_month_and_year() {
        let stats = aggregate(&[
            record(Some(60), UrgencyTier::Critical, &[(2026, 3), (2026, 4)]),
            record(Some(45), UrgencyTier::Low, &[(2026, 3), (2027, 1)]),
        ]);
        assert_eq!(stats.total_by_month["2026-03"], 2);
        assert_eq!(stats.total_by_month["2026-04"], 1);
        assert_eq!(stats.total_by_month["2027-01"], 1);
        assert_eq!(stats.total_by_year[&2026], 3);
        assert_eq!(stats.total_by_year[&2027], 1);
    }

    #[test]
    fn test_age_range_ignores_unknown_ages() {
        let stats = aggregate(&[
            record(Some(60), UrgencyTier::Low, &[]),
            record(None, UrgencyTier::Low, &[]),
            record(Some(38), UrgencyTier::Low, &[]),
        ]);
        assert_eq!(stats.total_employees, 3);
        assert_eq!(stats.min_age, Some(38));
        assert_eq!(stats.max_age, Some(60));
    }

    #[test]
    fn test_counts_schedule_failures() {
        let mut failed = record(Some(50), UrgencyTier::Low, &[]);
        failed.schedule_parse_failed = true;
        let stats = aggregate(&[failed, record(Some(50), UrgencyTier::Low, &[])]);
        assert_eq!(stats.schedule_failures, 1);
    }

    #[test]
    fn test_serializes_with_string_keys() {
        let stats = aggregate(&[record(Some(50), UrgencyTier::Moderate, &[(2026, 9)])]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_by_tier"]["moderate"], 1);
        assert_eq!(json["total_by_month"]["2026-09"], 1);
        assert_eq!(json["total_by_year"]["2026"], 1);
    }
}
