//! Data-quality problem model.

use serde::{Deserialize, Serialize};

/// Why a row was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemReason {
    /// No employee name could be resolved; the row produced no record.
    MissingName,
    /// Schedule text was present but no pattern recognized it.
    UnparsableSchedule,
    /// Schedule text states a yearly recurrence without any anchor year.
    AmbiguousSchedule,
    /// A start/end month range could not be read.
    UnparsableRange,
    /// A date cell could not be read.
    UnparsableDate,
}

/// A data-quality problem found while processing one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataProblem {
    /// Employee the problem belongs to, when the name was readable.
    pub employee_name: Option<String>,
    /// Human-readable description.
    pub message: String,
    /// Header of the offending column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Zero-based index of the data row.
    pub row: usize,
    /// Machine-readable reason.
    pub reason: ProblemReason,
}

impl DataProblem {
    /// Creates a problem for `row`.
    pub fn new(row: usize, reason: ProblemReason, message: impl Into<String>) -> Self {
        Self {
            employee_name: None,
            message: message.into(),
            field: None,
            row,
            reason,
        }
    }

    /// Attaches the employee name.
    pub fn for_employee(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.employee_name = if name.trim().is_empty() { None } else { Some(name) };
        self
    }

    /// Attaches the offending column header.
    pub fn in_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_all_parts() {
        let problem = DataProblem::new(4, ProblemReason::UnparsableSchedule, "unreadable")
            .for_employee("Ana")
            .in_field("CRONOGRAMA");
        assert_eq!(problem.row, 4);
        assert_eq!(problem.employee_name.as_deref(), Some("Ana"));
        assert_eq!(problem.field.as_deref(), Some("CRONOGRAMA"));
    }

    #[test]
    fn test_blank_name_stays_none() {
        let problem = DataProblem::new(0, ProblemReason::MissingName, "no name").for_employee("  ");
        assert!(problem.employee_name.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let problem = DataProblem::new(1, ProblemReason::AmbiguousSchedule, "no year");
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["employee_name"], serde_json::Value::Null);
        assert_eq!(json["reason"], "ambiguous_schedule");
        assert!(json.get("field").is_none());
    }
}
