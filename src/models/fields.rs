//! Spreadsheet row and canonical field models.

use serde::{Deserialize, Serialize};

/// One spreadsheet line as `(header, cell)` pairs, in column order.
///
/// # Example
///
/// ```
/// use premium_leave_engine::models::RawRow;
///
/// let headers = vec!["Nome".to_string(), "CPF".to_string()];
/// let cells = vec!["Maria Souza".to_string()];
/// let row = RawRow::from_cells(&headers, &cells);
///
/// assert_eq!(row.len(), 2);
/// assert_eq!(row.cell(1), Some(""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    columns: Vec<(String, String)>,
}

impl RawRow {
    /// Creates a row from explicit `(header, cell)` pairs.
    pub fn new(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    /// Zips pre-split cells with their headers.
    ///
    /// Missing trailing cells become empty strings and cells beyond the last
    /// header are dropped, so ragged rows never fail.
    pub fn from_cells(headers: &[String], cells: &[String]) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), cells.get(i).cloned().unwrap_or_default()))
            .collect();
        Self { columns }
    }

    /// Iterates over `(header, cell)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(h, c)| (h.as_str(), c.as_str()))
    }

    /// Cell text at a column position.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|(_, c)| c.as_str())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True when every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.columns.iter().all(|(_, c)| c.trim().is_empty())
    }
}

/// The canonical fields every employee row is reduced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    /// Employee name.
    Name,
    /// Taxpayer number.
    Cpf,
    /// Identity document number.
    Rg,
    /// Job title.
    Cargo,
    /// Posting.
    Lotacao,
    /// Administrative unit.
    Unidade,
    /// Registration/reference number.
    Reference,
}

impl CanonicalField {
    /// Every canonical field, in resolution order.
    pub const ALL: [CanonicalField; 7] = [
        CanonicalField::Name,
        CanonicalField::Cpf,
        CanonicalField::Rg,
        CanonicalField::Cargo,
        CanonicalField::Lotacao,
        CanonicalField::Unidade,
        CanonicalField::Reference,
    ];
}

/// Canonical fields extracted from a row. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalFields {
    /// Employee name.
    pub name: String,
    /// Taxpayer number.
    pub cpf: String,
    /// Identity document number.
    pub rg: String,
    /// Job title.
    pub cargo: String,
    /// Posting.
    pub lotacao: String,
    /// Administrative unit.
    pub unidade: String,
    /// Registration/reference number.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Column position the name was read from.
    pub raw_column_index: Option<usize>,
}

impl CanonicalFields {
    /// Sets the value of a canonical field.
    pub fn set(&mut self, field: CanonicalField, value: String) {
        match field {
            CanonicalField::Name => self.name = value,
            CanonicalField::Cpf => self.cpf = value,
            CanonicalField::Rg => self.rg = value,
            CanonicalField::Cargo => self.cargo = value,
            CanonicalField::Lotacao => self.lotacao = value,
            CanonicalField::Unidade => self.unidade = value,
            CanonicalField::Reference => self.reference = value,
        }
    }

    /// Key used to group rows belonging to the same employee: CPF digits when
    /// present, otherwise the upper-cased name.
    pub fn identity_key(&self) -> String {
        let digits: String = self.cpf.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            self.name.trim().to_uppercase()
        } else {
            digits
        }
    }
}
