//! Cell-level parsing for leave spreadsheets.
//!
//! This module covers header normalization and canonical field resolution,
//! date and month-name parsing, table-format detection and expansion of
//! legacy start/end month ranges into leave periods.

mod dates;
mod field_resolver;
mod months;
mod period_generator;
mod table_format;
mod text;

pub use dates::{
    MAX_DAY_SERIAL, TWO_DIGIT_YEAR_PIVOT, parse_cell_date, parse_date, pivot_two_digit_year,
    serial_to_date,
};
pub use field_resolver::{
    AliasOverrides, FieldSchema, MIN_CONTAINMENT_LEN, resolve, resolve_column, resolve_value,
};
pub use months::{MONTH_ABBREVIATIONS, MONTH_NAMES, month_from_name};
pub use period_generator::{
    MonthYear, expand_range, expand_range_for_year, infer_years, parse_month_year,
};
pub use table_format::{TableFormat, TableLayout, detect_format, detect_layout};
pub use text::{fold_diacritics, normalize_header, normalize_text};

pub(crate) use months::{MONTH_ALTERNATION, MONTH_NAME_ALTERNATION};
