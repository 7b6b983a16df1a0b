//! Property tests for date normalization, schedule expansion and urgency
//! classification.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use premium_leave_engine::classification::{UrgencyInput, classify};
use premium_leave_engine::config::UrgencyThresholds;
use premium_leave_engine::models::{LeavePeriod, Sex};
use premium_leave_engine::parsing::{
    MONTH_NAMES, expand_range_for_year, parse_date, serial_to_date,
};
use premium_leave_engine::schedule::{interpret_schedule, parse_schedule};

fn is_month_granular(period: &LeavePeriod) -> bool {
    let next_month = if period.start.month() == 12 {
        NaiveDate::from_ymd_opt(period.start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(period.start.year(), period.start.month() + 1, 1)
    };
    period.start.day() == 1 && next_month.and_then(|d| d.pred_opt()) == Some(period.end)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn day_first_dates_match_the_calendar(day in 1u32..=31, month in 1u32..=12, year in 1950i32..=2099) {
        let text = format!("{:02}/{:02}/{}", day, month, year);
        prop_assert_eq!(parse_date(&text), NaiveDate::from_ymd_opt(year, month, day));
    }

    #[test]
    fn day_serials_are_strictly_increasing(serial in 1u32..100_000) {
        let today = serial_to_date(f64::from(serial));
        let tomorrow = serial_to_date(f64::from(serial + 1));
        prop_assert!(today.is_some());
        prop_assert_eq!(today.and_then(|d| d.succ_opt()), tomorrow);
    }

    #[test]
    fn consecutive_blocks_are_month_granular(month in 1u32..=12, year in 2000i32..=2060, count in 1u32..=24) {
        let text = format!("início em {:02}/{} ({} meses consecutivos)", month, year, count);
        let periods = parse_schedule(&text);
        prop_assert_eq!(periods.len(), count as usize);
        prop_assert!(periods.iter().all(is_month_granular));
        prop_assert!(periods.windows(2).all(|w| w[0].end < w[1].start));
    }

    #[test]
    fn arbitrary_text_never_panics_and_stays_month_granular(text in "\\PC{0,80}") {
        let outcome = interpret_schedule(&text);
        prop_assert!(outcome.periods().iter().all(is_month_granular));
    }

    #[test]
    fn month_ranges_are_never_inverted(start in 0usize..12, end in 0usize..12, year in 2000i32..=2060) {
        let periods = expand_range_for_year(MONTH_NAMES[start], MONTH_NAMES[end], year);
        prop_assert!(!periods.is_empty());
        prop_assert!(periods.len() <= 12);
        prop_assert_eq!(periods[0].start.month() as usize, start + 1);
        prop_assert_eq!(periods[0].start.year(), year);
        prop_assert_eq!(periods[periods.len() - 1].start.month() as usize, end + 1);
        prop_assert!(periods.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn older_employees_are_never_less_urgent(age in 18u32..75, tenure in 0i64..45) {
        let thresholds = UrgencyThresholds::default();
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let input = |age: u32| UrgencyInput {
            age_years: Some(age),
            tenure_years: tenure.into(),
            sex: Sex::Male,
            ..UrgencyInput::default()
        };
        let younger = classify(&input(age), &thresholds, today);
        let older = classify(&input(age + 1), &thresholds, today);
        prop_assert!(older <= younger, "age {} is {:?} but age {} is {:?}", age + 1, older, age, younger);
    }
}
