//! Batch processing of spreadsheet rows.
//!
//! [`process_batch`] detects the sheet format once and folds the rows into
//! classified [`EmployeeRecord`]s. A malformed row never aborts the batch: it
//! becomes a [`DataProblem`] and processing continues.
//!
//! # Example
//!
//! ```
//! use premium_leave_engine::batch::{BatchOptions, process_batch};
//! use premium_leave_engine::parsing::TableFormat;
//! use chrono::NaiveDate;
//!
//! let headers = vec!["Nome".to_string(), "Idade".to_string(), "Cronograma".to_string()];
//! let rows = vec![
//!     vec!["Ana Lima".to_string(), "58".to_string(), "início em 03/2026".to_string()],
//!     vec!["Rui Costa".to_string(), "61".to_string(), "quando der".to_string()],
//! ];
//! let options = BatchOptions {
//!     today: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
//!     ..BatchOptions::default()
//! };
//!
//! let outcome = process_batch(&headers, &rows, &options);
//! assert_eq!(outcome.format, TableFormat::Generic);
//! assert_eq!(outcome.records.len(), 2);
//! assert_eq!(outcome.problems.len(), 1);
//! assert!(outcome.records[1].schedule_parse_failed);
//! ```

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Instant;

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::classification::{Statistics, UrgencyInput, age_on, aggregate, assess, whole_months_between};
use crate::config::{ConfigLoader, UrgencyThresholds};
use crate::models::{
    CanonicalFields, DataProblem, EmployeeRecord, LeavePeriod, MAX_BLOCK_MONTHS, PeriodKind,
    ProblemReason, RawRow, Sex,
};
use crate::parsing::{
    FieldSchema, TableFormat, TableLayout, detect_layout, expand_range_for_year, parse_cell_date,
    resolve, resolve_column, resolve_value,
};
use crate::schedule::{ScheduleOutcome, interpret_schedule, interpret_schedule_with_year};

/// Headers of the free-text schedule column.
pub const SCHEDULE_ALIASES: &[&str] = &[
    "CRONOGRAMA",
    "PROGRAMACAO",
    "PREVISAO DE GOZO",
    "PERIODO DE GOZO",
    "AGENDAMENTO",
];
/// Headers of the age column.
pub const AGE_ALIASES: &[&str] = &["IDADE", "IDADE ATUAL"];
/// Headers of the birth-date column.
pub const BIRTH_DATE_ALIASES: &[&str] = &[
    "DATA DE NASCIMENTO",
    "DATA NASCIMENTO",
    "NASCIMENTO",
    "DT NASC",
];
/// Headers of the sex column.
pub const SEX_ALIASES: &[&str] = &["SEXO", "GENERO"];
/// Headers of the admission-date column.
pub const ADMISSION_ALIASES: &[&str] = &["DATA DE ADMISSAO", "ADMISSAO", "DATA DE EXERCICIO"];
/// Headers of the years-of-service column.
pub const TENURE_ALIASES: &[&str] = &["TEMPO DE SERVICO", "ANOS DE SERVICO"];
/// Headers of the accrued leave-months column.
pub const ACCRUED_ALIASES: &[&str] = &["MESES ADQUIRIDOS", "TOTAL DE MESES", "LICENCAS ADQUIRIDAS"];
/// Headers of the used leave-months column.
pub const USED_ALIASES: &[&str] = &["MESES USUFRUIDOS", "MESES GOZADOS", "USUFRUIDOS"];

/// Years of service per accrual block.
pub const ACCRUAL_BLOCK_YEARS: u32 = 5;
/// Leave months granted per accrual block.
pub const MONTHS_PER_ACCRUAL_BLOCK: u32 = 3;
/// Leave days counted as one leave month.
pub const DAYS_PER_LEAVE_MONTH: u32 = 30;

const MAX_PLAUSIBLE_AGE: u32 = 120;

/// Per-batch parameters.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Thresholds for urgency classification.
    pub thresholds: UrgencyThresholds,
    /// Canonical field aliases.
    pub schema: FieldSchema,
    /// Schedule columns whose cells omit the year, keyed by exact header.
    pub header_years: HashMap<String, i32>,
    /// The date the batch is evaluated on.
    pub today: NaiveDate,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::new(
            UrgencyThresholds::default(),
            FieldSchema::default(),
            Local::now().date_naive(),
        )
    }
}

impl BatchOptions {
    /// Creates options without header-year hints.
    pub fn new(thresholds: UrgencyThresholds, schema: FieldSchema, today: NaiveDate) -> Self {
        Self {
            thresholds,
            schema,
            header_years: HashMap::new(),
            today,
        }
    }

    /// Creates options from a loaded configuration.
    pub fn from_config(config: &ConfigLoader, today: NaiveDate) -> Self {
        Self::new(config.thresholds().clone(), config.schema().clone(), today)
    }

    /// Declares that cells under `header` take their year from `year`.
    pub fn with_header_year(mut self, header: impl Into<String>, year: i32) -> Self {
        self.header_years.insert(header.into(), year);
        self
    }
}

/// Everything produced from one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Identifier for log correlation.
    pub batch_id: Uuid,
    /// When the batch was processed.
    pub processed_at: DateTime<Utc>,
    /// Detected sheet format.
    pub format: TableFormat,
    /// One record per employee.
    pub records: Vec<EmployeeRecord>,
    /// Data-quality problems, in row order.
    pub problems: Vec<DataProblem>,
    /// Summary over `records`.
    pub statistics: Statistics,
}

struct ProblemLog {
    batch_id: Uuid,
    problems: Vec<DataProblem>,
}

impl ProblemLog {
    fn push(&mut self, problem: DataProblem) {
        warn!(
            batch_id = %self.batch_id,
            row = problem.row,
            reason = ?problem.reason,
            field = problem.field.as_deref().unwrap_or(""),
            "{}",
            problem.message
        );
        self.problems.push(problem);
    }
}

/// Per-employee facts read from auxiliary columns.
#[derive(Debug, Default)]
struct Profile {
    age_years: Option<u32>,
    sex: Sex,
    birth_date: Option<NaiveDate>,
    admission_date: Option<NaiveDate>,
    tenure_years: Decimal,
    accrued_months: Option<u32>,
    used_months: Option<u32>,
}

struct Draft {
    fields: CanonicalFields,
    profile: Profile,
    periods: Vec<LeavePeriod>,
    had_failure: bool,
}

/// Reads the leading integer of a cell (`"90"`, `"90 dias"`, `"3,0"`).
fn leading_count(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim().replace(',', ".");
    Decimal::from_str(&text).ok()
}

/// Leave months accrued for `tenure_years` of service.
///
/// # Example
///
/// ```
/// use premium_leave_engine::batch::accrued_months_for_tenure;
/// use rust_decimal::Decimal;
///
/// assert_eq!(accrued_months_for_tenure(Decimal::new(149, 1)), 6);
/// assert_eq!(accrued_months_for_tenure(Decimal::from(15)), 9);
/// ```
pub fn accrued_months_for_tenure(tenure_years: Decimal) -> u32 {
    let years = tenure_years.trunc().to_u32().unwrap_or(0);
    years / ACCRUAL_BLOCK_YEARS * MONTHS_PER_ACCRUAL_BLOCK
}

fn read_date(
    row: &RawRow,
    index: usize,
    name: &str,
    aliases: &[&str],
    log: &mut ProblemLog,
) -> Option<NaiveDate> {
    let (header, cell) = resolve_column(row, aliases)?;
    let date = parse_cell_date(cell);
    if date.is_none() {
        log.push(
            DataProblem::new(
                index,
                ProblemReason::UnparsableDate,
                format!("Date '{}' could not be read", cell),
            )
            .for_employee(name)
            .in_field(header),
        );
    }
    date
}

fn read_profile(
    row: &RawRow,
    index: usize,
    name: &str,
    today: NaiveDate,
    log: &mut ProblemLog,
) -> Profile {
    let birth_date = read_date(row, index, name, BIRTH_DATE_ALIASES, log);
    let admission_date = read_date(row, index, name, ADMISSION_ALIASES, log);

    let age_years = leading_count(resolve_value(row, AGE_ALIASES))
        .filter(|age| *age <= MAX_PLAUSIBLE_AGE)
        .or_else(|| birth_date.and_then(|birth| age_on(birth, today)));

    let tenure_years = parse_decimal(resolve_value(row, TENURE_ALIASES))
        .or_else(|| {
            admission_date.map(|admitted| {
                let months = whole_months_between(admitted, today).max(0);
                (Decimal::from(months) / Decimal::from(12)).round_dp(2)
            })
        })
        .unwrap_or(Decimal::ZERO);

    Profile {
        age_years,
        sex: Sex::parse(resolve_value(row, SEX_ALIASES)),
        birth_date,
        admission_date,
        tenure_years,
        accrued_months: leading_count(resolve_value(row, ACCRUED_ALIASES)),
        used_months: leading_count(resolve_value(row, USED_ALIASES)),
    }
}

/// Folds one schedule outcome into the draft, flagging failures.
fn absorb_schedule(
    outcome: ScheduleOutcome,
    cell: &str,
    header: &str,
    index: usize,
    draft: &mut Draft,
    log: &mut ProblemLog,
) {
    let (reason, message) = match outcome {
        ScheduleOutcome::Empty => return,
        ScheduleOutcome::Parsed { periods, .. } => {
            draft.periods.extend(periods);
            return;
        }
        ScheduleOutcome::Ambiguous => (
            ProblemReason::AmbiguousSchedule,
            format!(
                "Schedule '{}' repeats yearly without stating a year",
                cell.trim()
            ),
        ),
        ScheduleOutcome::Unrecognized => (
            ProblemReason::UnparsableSchedule,
            format!("Schedule '{}' could not be interpreted", cell.trim()),
        ),
    };
    draft.had_failure = true;
    log.push(
        DataProblem::new(index, reason, message)
            .for_employee(draft.fields.name.clone())
            .in_field(header),
    );
}

fn read_generic_schedule(
    row: &RawRow,
    index: usize,
    options: &BatchOptions,
    draft: &mut Draft,
    log: &mut ProblemLog,
) {
    for (header, cell) in row.columns() {
        if let Some(year) = options.header_years.get(header) {
            let outcome = interpret_schedule_with_year(cell, Some(*year));
            absorb_schedule(outcome, cell, header, index, draft, log);
        }
    }

    if let Some((header, cell)) = resolve_column(row, SCHEDULE_ALIASES) {
        if !options.header_years.contains_key(header) {
            absorb_schedule(interpret_schedule(cell), cell, header, index, draft, log);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn read_premium_range(
    row: &RawRow,
    index: usize,
    headers: &[String],
    start: usize,
    end: usize,
    options: &BatchOptions,
    draft: &mut Draft,
    log: &mut ProblemLog,
) {
    let start_text = row.cell(start).unwrap_or("").trim();
    let end_text = row.cell(end).unwrap_or("").trim();
    if start_text.is_empty() && end_text.is_empty() {
        return;
    }

    let start_header = headers.get(start).map(String::as_str).unwrap_or("");
    let end_header = headers.get(end).map(String::as_str).unwrap_or("");
    let year = options
        .header_years
        .get(start_header)
        .or_else(|| options.header_years.get(end_header))
        .copied()
        .unwrap_or_else(|| options.today.year());

    let periods = expand_range_for_year(start_text, end_text, year);
    if periods.is_empty() {
        draft.had_failure = true;
        log.push(
            DataProblem::new(
                index,
                ProblemReason::UnparsableRange,
                format!(
                    "Leave range '{}' to '{}' could not be read",
                    start_text, end_text
                ),
            )
            .for_employee(draft.fields.name.clone())
            .in_field(start_header),
        );
        return;
    }
    draft.periods.extend(periods);
}

#[allow(clippy::too_many_arguments)]
fn read_grant(
    row: &RawRow,
    index: usize,
    headers: &[String],
    process: usize,
    start_date: usize,
    leave_days: usize,
    draft: &mut Draft,
    log: &mut ProblemLog,
) {
    let start_cell = row.cell(start_date).unwrap_or("").trim();
    let days_cell = row.cell(leave_days).unwrap_or("").trim();
    if start_cell.is_empty() && days_cell.is_empty() {
        return;
    }
    let header = |column: usize| headers.get(column).cloned().unwrap_or_default();

    let Some(start) = parse_cell_date(start_cell) else {
        draft.had_failure = true;
        log.push(
            DataProblem::new(
                index,
                ProblemReason::UnparsableDate,
                format!("Leave start date '{}' could not be read", start_cell),
            )
            .for_employee(draft.fields.name.clone())
            .in_field(header(start_date)),
        );
        return;
    };

    let Some(days) = leading_count(days_cell).filter(|days| *days > 0) else {
        draft.had_failure = true;
        log.push(
            DataProblem::new(
                index,
                ProblemReason::UnparsableRange,
                format!("Leave days '{}' is not a positive number", days_cell),
            )
            .for_employee(draft.fields.name.clone())
            .in_field(header(leave_days)),
        );
        return;
    };

    let months = days.div_ceil(DAYS_PER_LEAVE_MONTH);
    if months > MAX_BLOCK_MONTHS {
        draft.had_failure = true;
        log.push(
            DataProblem::new(
                index,
                ProblemReason::UnparsableRange,
                format!(
                    "Leave days '{}' exceed the {}-month limit for one grant",
                    days_cell, MAX_BLOCK_MONTHS
                ),
            )
            .for_employee(draft.fields.name.clone())
            .in_field(header(leave_days)),
        );
        return;
    }

    let process_number = row.cell(process).unwrap_or("").trim();
    let source = if process_number.is_empty() {
        format!("{} ({} dias)", start_cell, days)
    } else {
        format!("processo {}: {} ({} dias)", process_number, start_cell, days)
    };
    draft.periods.extend(
        LeavePeriod::series(
            start.year(),
            start.month(),
            months,
            1,
            PeriodKind::PremiumLeave,
        )
        .into_iter()
        .map(|p| p.with_months_count(months).with_source(source.clone())),
    );
}

fn finish(draft: Draft, options: &BatchOptions) -> EmployeeRecord {
    let Draft {
        fields,
        profile,
        mut periods,
        had_failure,
    } = draft;

    periods.sort_by_key(|p| p.start);
    let schedule_parse_failed = had_failure && periods.is_empty();

    let current_month = options.today.with_day(1).unwrap_or(options.today);
    let upcoming = periods.iter().filter(|p| p.start >= current_month).count();
    let past = periods.len() - upcoming;
    let scheduled_months = u32::try_from(upcoming).unwrap_or(u32::MAX);
    let used_months = profile
        .used_months
        .unwrap_or_else(|| u32::try_from(past).unwrap_or(u32::MAX));
    let total_accrued_months = profile
        .accrued_months
        .unwrap_or_else(|| accrued_months_for_tenure(profile.tenure_years));

    let input = UrgencyInput {
        age_years: profile.age_years,
        tenure_years: profile.tenure_years,
        used_months,
        scheduled_months,
        total_accrued_months,
        sex: profile.sex,
        birth_date: profile.birth_date,
    };
    let urgency = assess(&input, &options.thresholds, options.today);

    EmployeeRecord {
        fields,
        age_years: profile.age_years,
        sex: profile.sex,
        birth_date: profile.birth_date,
        admission_date: profile.admission_date,
        tenure_years: profile.tenure_years,
        total_accrued_months,
        used_months,
        periods,
        schedule_parse_failed,
        urgency_tier: urgency.tier,
        urgency,
    }
}

/// Processes a whole sheet.
///
/// # Arguments
///
/// * `headers` - The header row
/// * `rows` - Data rows, already split into cells; ragged rows are padded
/// * `options` - Thresholds, aliases, header-year hints and evaluation date
///
/// # Returns
///
/// A [`BatchOutcome`] with one record per employee. In `generic` and
/// `premium-leave` sheets every named row is one employee; in `new` sheets rows
/// are grants and are grouped by CPF, or by name when the CPF is blank. Rows
/// without a name are reported and skipped; blank rows are ignored.
pub fn process_batch(
    headers: &[String],
    rows: &[Vec<String>],
    options: &BatchOptions,
) -> BatchOutcome {
    let batch_id = Uuid::new_v4();
    let start_time = Instant::now();
    let layout = detect_layout(headers);
    let format = layout.format();
    info!(
        batch_id = %batch_id,
        rows = rows.len(),
        format = %format,
        "Processing batch"
    );

    let mut log = ProblemLog {
        batch_id,
        problems: Vec::new(),
    };
    let mut drafts: Vec<Draft> = Vec::new();
    let mut by_identity: HashMap<String, usize> = HashMap::new();

    for (index, cells) in rows.iter().enumerate() {
        let row = RawRow::from_cells(headers, cells);
        if row.is_blank() {
            continue;
        }

        let fields = resolve(&row, &options.schema);
        if fields.name.is_empty() {
            log.push(DataProblem::new(
                index,
                ProblemReason::MissingName,
                "No employee name found in row",
            ));
            continue;
        }

        let position = match layout {
            TableLayout::ProcessOriented { .. } => by_identity.get(&fields.identity_key()).copied(),
            _ => None,
        };
        let position = match position {
            Some(position) => position,
            None => {
                let key = fields.identity_key();
                let profile = read_profile(&row, index, &fields.name, options.today, &mut log);
                drafts.push(Draft {
                    fields,
                    profile,
                    periods: Vec::new(),
                    had_failure: false,
                });
                if matches!(layout, TableLayout::ProcessOriented { .. }) {
                    by_identity.insert(key, drafts.len() - 1);
                }
                drafts.len() - 1
            }
        };
        let draft = &mut drafts[position];

        match layout {
            TableLayout::ProcessOriented {
                process,
                start_date,
                leave_days,
                ..
            } => read_grant(
                &row, index, headers, process, start_date, leave_days, draft, &mut log,
            ),
            TableLayout::PremiumLeave { start, end } => {
                read_premium_range(&row, index, headers, start, end, options, draft, &mut log)
            }
            TableLayout::Generic => read_generic_schedule(&row, index, options, draft, &mut log),
        }
    }

    let records: Vec<EmployeeRecord> = drafts
        .into_iter()
        .map(|draft| finish(draft, options))
        .collect();
    let statistics = aggregate(&records);

    info!(
        batch_id = %batch_id,
        records = records.len(),
        problems = log.problems.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Batch processed"
    );

    BatchOutcome {
        batch_id,
        processed_at: Utc::now(),
        format,
        records,
        problems: log.problems,
        statistics,
    }
}
