//! Integration tests for the Premium Leave Engine.
//!
//! This suite drives whole sheets through the public API:
//! - Generic free-text schedule sheets
//! - Legacy premium-leave start/end sheets
//! - Process-oriented grant sheets
//! - Configuration loading
//! - Data-quality reporting

use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::Value;

use premium_leave_engine::batch::{BatchOptions, BatchOutcome, process_batch};
use premium_leave_engine::classification::{UrgencyInput, classify};
use premium_leave_engine::config::{ConfigLoader, UrgencyThresholds};
use premium_leave_engine::models::{ProblemReason, Sex, UrgencyTier};
use premium_leave_engine::parsing::TableFormat;
use premium_leave_engine::schedule::parse_schedule;

// =============================================================================
// Test Helpers
// =============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
}

fn create_options() -> BatchOptions {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    BatchOptions::from_config(&config, today())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn run(headers: &[&str], rows: &[&[&str]]) -> BatchOutcome {
    let rows: Vec<Vec<String>> = rows.iter().map(|row| strings(row)).collect();
    process_batch(&strings(headers), &rows, &create_options())
}

fn month_keys(outcome: &BatchOutcome, record: usize) -> Vec<String> {
    outcome.records[record]
        .periods
        .iter()
        .map(|p| p.month_key())
        .collect()
}

// =============================================================================
// Generic schedule sheets
// =============================================================================

#[test]
fn test_generic_sheet_end_to_end() {
    let outcome = run(
        &["Servidor(a)", "CPF", "Lotação", "Sexo", "Idade", "Cronograma"],
        &[
            &["Ana Lima", "111.222.333-44", "EEF Centro", "F", "59", "início em 03/2026 (3 meses consecutivos)"],
            &["Bruno Dias", "555.666.777-88", "SEDUC", "M", "73", "a partir de 01/07/2026, um mês por ano"],
            &["Carla Reis", "", "EEF Norte", "F", "41", "meses: 09/2026; 09/2027"],
        ],
    );

    assert_eq!(outcome.format, TableFormat::Generic);
    assert_eq!(outcome.records.len(), 3);
    assert!(outcome.problems.is_empty(), "{:?}", outcome.problems);

    assert_eq!(outcome.records[0].fields.lotacao, "EEF Centro");
    assert_eq!(month_keys(&outcome, 0), vec!["2026-03", "2026-04", "2026-05"]);
    assert_eq!(
        month_keys(&outcome, 1),
        vec!["2026-07", "2027-07", "2028-07", "2029-07", "2030-07"]
    );
    assert_eq!(month_keys(&outcome, 2), vec!["2026-09", "2027-09"]);

    // 24 months to mandatory retirement.
    assert_eq!(outcome.records[1].urgency_tier, UrgencyTier::Critical);
    assert_eq!(outcome.records[2].urgency_tier, UrgencyTier::Low);
}

#[test]
fn test_one_unparsable_schedule_in_n_rows() {
    let rows: Vec<Vec<String>> = (0..10)
        .map(|i| {
            let schedule = if i == 6 {
                "conforme necessidade do setor".to_string()
            } else {
                format!("início em {:02}/2026", i + 1)
            };
            vec![format!("Servidor {i}"), "50".to_string(), schedule]
        })
        .collect();
    let outcome = process_batch(
        &strings(&["Nome", "Idade", "Cronograma"]),
        &rows,
        &create_options(),
    );

    assert_eq!(outcome.records.len(), 10);
    assert_eq!(outcome.problems.len(), 1);
    assert_eq!(outcome.problems[0].row, 6);
    assert_eq!(outcome.problems[0].reason, ProblemReason::UnparsableSchedule);
    assert_eq!(outcome.problems[0].employee_name.as_deref(), Some("Servidor 6"));
    assert!(outcome.records[6].schedule_parse_failed);
    assert!(outcome.records[6].periods.is_empty());
    assert_eq!(outcome.statistics.schedule_failures, 1);
}

#[test]
fn test_ambiguous_and_missing_names_reported() {
    let outcome = run(
        &["Nome", "Cronograma"],
        &[
            &["Ana", "um mês a cada ano"],
            &["", "início em 03/2026"],
            &["Bia", "jan/2030 uma por ano"],
        ],
    );

    assert_eq!(outcome.records.len(), 2);
    let reasons: Vec<ProblemReason> = outcome.problems.iter().map(|p| p.reason).collect();
    assert_eq!(
        reasons,
        vec![ProblemReason::AmbiguousSchedule, ProblemReason::MissingName]
    );
    assert_eq!(outcome.records[1].periods.len(), 5);
}

#[test]
fn test_header_year_hints() {
    let headers = strings(&["Nome", "LP 2026", "LP 2027"]);
    let rows = vec![strings(&["Ana", "2 meses 10/03 - 09/05", "1 mês 01/agosto"])];
    let options = create_options()
        .with_header_year("LP 2026", 2026)
        .with_header_year("LP 2027", 2027);

    let outcome = process_batch(&headers, &rows, &options);
    assert!(outcome.problems.is_empty(), "{:?}", outcome.problems);
    assert_eq!(
        month_keys(&outcome, 0),
        vec!["2026-03", "2026-04", "2026-05", "2027-08"]
    );
}

// =============================================================================
// Premium-leave sheets
// =============================================================================

#[test]
fn test_premium_leave_sheet() {
    let outcome = run(
        &["Nome", "Início da Licença Prêmio", "Fim da Licença Prêmio"],
        &[
            &["Ana", "novembro", "fevereiro"],
            &["Bia", "mar/2027", "mai/2027"],
            &["Caio", "a definir", "a definir"],
        ],
    );

    assert_eq!(outcome.format, TableFormat::PremiumLeave);
    assert_eq!(
        month_keys(&outcome, 0),
        vec!["2026-11", "2026-12", "2027-01", "2027-02"]
    );
    assert_eq!(month_keys(&outcome, 1), vec!["2027-03", "2027-04", "2027-05"]);
    assert_eq!(outcome.problems.len(), 1);
    assert_eq!(outcome.problems[0].reason, ProblemReason::UnparsableRange);
}

// =============================================================================
// Process-oriented sheets
// =============================================================================

#[test]
fn test_process_oriented_sheet_groups_grants() {
    let outcome = run(
        &["Nome", "CPF", "Nº Processo", "Data de Emissão", "Data de Início", "Qtd. Dias", "Idade"],
        &[
            &["Ana Lima", "111.222.333-44", "2025/001", "02/12/2025", "01/04/2026", "90", "70"],
            &["Ana Lima", "111.222.333-44", "2025/014", "10/12/2025", "01/10/2026", "30", "70"],
            &["Bia Reis", "999.888.777-66", "2025/020", "11/12/2025", "2026-02-01", "15", "45"],
        ],
    );

    assert_eq!(outcome.format, TableFormat::ProcessOriented);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(
        month_keys(&outcome, 0),
        vec!["2026-04", "2026-05", "2026-06", "2026-10"]
    );
    assert_eq!(month_keys(&outcome, 1), vec!["2026-02"]);
    assert_eq!(outcome.statistics.total_by_year[&2026], 5);
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_eligible_with_leave_is_critical() {
    let input = UrgencyInput {
        age_years: Some(65),
        tenure_years: 40.into(),
        total_accrued_months: 5,
        sex: Sex::Male,
        ..UrgencyInput::default()
    };
    assert_eq!(
        classify(&input, &UrgencyThresholds::default(), today()),
        UrgencyTier::Critical
    );
}

#[test]
fn test_far_from_retirement_without_leave_is_low() {
    let thresholds = UrgencyThresholds::default();
    assert_eq!(thresholds.moderate_max_months, 84);
    // Retirement on 2034-05-10: exactly 100 months away.
    let input = UrgencyInput {
        birth_date: NaiveDate::from_ymd_opt(1959, 5, 10),
        sex: Sex::Female,
        ..UrgencyInput::default()
    };
    assert_eq!(classify(&input, &thresholds, today()), UrgencyTier::Low);
}

// =============================================================================
// Schedules
// =============================================================================

#[test]
fn test_schedule_examples() {
    let periods = parse_schedule("início em 01/2026 (3 meses consecutivos)");
    let ends: Vec<NaiveDate> = periods.iter().map(|p| p.end).collect();
    assert_eq!(
        ends,
        vec![
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        ]
    );
    assert!(parse_schedule("um mês a cada ano").is_empty());
    assert_eq!(parse_schedule("jan/2030 uma por ano").len(), 5);
}

// =============================================================================
// Output shape
// =============================================================================

#[test]
fn test_outcome_serializes_for_reports() {
    let outcome = run(
        &["Nome", "Idade", "Cronograma"],
        &[&["Ana", "74", "início em 03/2026"], &["", "", "x"]],
    );
    let json: Value = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["format"], "generic");
    assert_eq!(json["records"][0]["urgency_tier"], "critical");
    assert_eq!(json["records"][0]["urgency"]["rule"], "critical_band");
    assert_eq!(json["records"][0]["periods"][0]["kind"], "single");
    assert_eq!(json["records"][0]["fields"]["ref"], "");
    assert_eq!(json["problems"][0]["reason"], "missing_name");
    assert!(json["problems"][0]["employee_name"].is_null());
    assert_eq!(json["statistics"]["total_by_tier"]["critical"], 1);
    assert!(json["batch_id"].is_string());

    let parsed: BatchOutcome = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, outcome);
}

#[test]
fn test_alias_overrides_flow_into_batches() {
    let mut overrides = HashMap::new();
    overrides.insert(
        premium_leave_engine::models::CanonicalField::Name,
        vec!["Colaborador".to_string()],
    );
    let mut options = create_options();
    options.schema = options
        .schema
        .clone()
        .merged(premium_leave_engine::parsing::AliasOverrides(overrides));

    let rows = vec![strings(&["Ana", "início em 03/2026"])];
    let outcome = process_batch(&strings(&["Colaborador", "Cronograma"]), &rows, &options);
    assert_eq!(outcome.records[0].name(), "Ana");
}
