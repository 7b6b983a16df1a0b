//! Table-format detection.
//!
//! Three row shapes are in circulation:
//!
//! - **new**: one row per leave grant, with process number, issue date, start
//!   date and number of days;
//! - **premium-leave**: legacy sheets with "start of premium leave" and
//!   "end of premium leave" month columns;
//! - **generic**: free-text schedule ("cronograma") sheets.
//!
//! The `new` check runs first because its columns can coexist with header text
//! that looks like the legacy labels.

use serde::{Deserialize, Serialize};

use super::text::normalize_header;

/// The row shape of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableFormat {
    /// Process-oriented rows, one leave grant per row.
    #[serde(rename = "new")]
    ProcessOriented,
    /// Legacy start-month/end-month rows.
    #[serde(rename = "premium-leave")]
    PremiumLeave,
    /// Free-text schedule rows.
    #[serde(rename = "generic")]
    Generic,
}

impl std::fmt::Display for TableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableFormat::ProcessOriented => write!(f, "new"),
            TableFormat::PremiumLeave => write!(f, "premium-leave"),
            TableFormat::Generic => write!(f, "generic"),
        }
    }
}

/// A detected format together with the positions of its key columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// Process-oriented sheet.
    ProcessOriented {
        /// Process number column.
        process: usize,
        /// Issue date column.
        issue_date: usize,
        /// Leave start date column.
        start_date: usize,
        /// Leave days column.
        leave_days: usize,
    },
    /// Legacy premium-leave sheet.
    PremiumLeave {
        /// Start-month column.
        start: usize,
        /// End-month column.
        end: usize,
    },
    /// Free-text schedule sheet.
    Generic,
}

impl TableLayout {
    /// The format this layout belongs to.
    pub fn format(&self) -> TableFormat {
        match self {
            TableLayout::ProcessOriented { .. } => TableFormat::ProcessOriented,
            TableLayout::PremiumLeave { .. } => TableFormat::PremiumLeave,
            TableLayout::Generic => TableFormat::Generic,
        }
    }
}

fn words(header: &str) -> impl Iterator<Item = &str> {
    header
        .split(|c: char| !c.is_alphanumeric() && c != '.')
        .filter(|w| !w.is_empty())
}

fn mentions_premium_leave(header: &str) -> bool {
    header.contains("PREMIO") || words(header).any(|w| w == "LP" || w == "L.P.")
}

fn is_premium_start(header: &str) -> bool {
    mentions_premium_leave(header) && header.contains("INICIO")
}

fn is_premium_end(header: &str) -> bool {
    mentions_premium_leave(header)
        && (header.contains("FIM") || header.contains("TERMINO") || header.contains("FINAL"))
}

fn is_leave_days(header: &str) -> bool {
    words(header).any(|w| w == "DIAS" || w == "DIA")
}

/// Detects the layout of a sheet from its header row.
///
/// # Example
///
/// ```
/// use premium_leave_engine::parsing::{TableFormat, detect_layout};
///
/// let headers: Vec<String> = ["Nome", "Início da Licença Prêmio", "Fim da Licença Prêmio"]
///     .iter()
///     .map(|h| h.to_string())
///     .collect();
/// let layout = detect_layout(&headers);
/// assert_eq!(layout.format(), TableFormat::PremiumLeave);
/// ```
pub fn detect_layout(headers: &[String]) -> TableLayout {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let find = |predicate: &dyn Fn(&str) -> bool| normalized.iter().position(|h| predicate(h));

    let process = find(&|h: &str| h.contains("PROCESSO"));
    let issue_date = find(&|h: &str| h.contains("EMISSAO"));
    let start_date = find(&|h: &str| h.contains("INICIO"));
    let leave_days = find(&is_leave_days);
    if let (Some(process), Some(issue_date), Some(start_date), Some(leave_days)) =
        (process, issue_date, start_date, leave_days)
    {
        return TableLayout::ProcessOriented {
            process,
            issue_date,
            start_date,
            leave_days,
        };
    }

    if let (Some(start), Some(end)) = (find(&is_premium_start), find(&is_premium_end)) {
        return TableLayout::PremiumLeave { start, end };
    }

    TableLayout::Generic
}

/// Detects the format of a sheet from its header row.
pub fn detect_format(headers: &[String]) -> TableFormat {
    detect_layout(headers).format()
}
