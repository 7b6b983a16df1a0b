//! Canonical field resolution.
//!
//! Spreadsheet headers vary wildly in case, accents and wording. A
//! [`FieldSchema`] lists, for every [`CanonicalField`], the header aliases it may
//! appear under; [`resolve`] reduces a [`RawRow`] to [`CanonicalFields`].

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::{CanonicalField, CanonicalFields, RawRow};

use super::text::normalize_header;

/// Shortest alias or header length eligible for containment matching.
///
/// Keeps two-letter aliases like `RG` from matching inside `CARGO`.
pub const MIN_CONTAINMENT_LEN: usize = 3;

/// Ordered header aliases for every canonical field.
///
/// Aliases are stored normalized (no diacritics, upper-case).
///
/// # Example
///
/// ```
/// use premium_leave_engine::models::CanonicalField;
/// use premium_leave_engine::parsing::FieldSchema;
///
/// let schema = FieldSchema::default()
///     .with_aliases(CanonicalField::Reference, ["Matrícula SIAPE"]);
/// assert_eq!(schema.aliases(CanonicalField::Reference), ["MATRICULA SIAPE"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    aliases: HashMap<CanonicalField, Vec<String>>,
}

impl Default for FieldSchema {
    fn default() -> Self {
        let defaults: [(CanonicalField, &[&str]); 7] = [
            (
                CanonicalField::Name,
                &[
                    "NOME",
                    "NOME DO SERVIDOR",
                    "NOME COMPLETO",
                    "SERVIDOR",
                    "SERVIDOR(A)",
                    "FUNCIONARIO",
                ],
            ),
            (CanonicalField::Cpf, &["CPF", "C.P.F."]),
            (CanonicalField::Rg, &["RG", "REGISTRO GERAL", "IDENTIDADE"]),
            (CanonicalField::Cargo, &["CARGO", "FUNCAO", "CARGO/FUNCAO"]),
            (
                CanonicalField::Lotacao,
                &["LOTACAO", "SETOR", "LOCAL DE TRABALHO"],
            ),
            (
                CanonicalField::Unidade,
                &["UNIDADE", "UNIDADE ADMINISTRATIVA", "ORGAO", "SECRETARIA"],
            ),
            (
                CanonicalField::Reference,
                &["REF", "REFERENCIA", "MATRICULA"],
            ),
        ];

        let mut schema = Self {
            aliases: HashMap::new(),
        };
        for (field, aliases) in defaults {
            schema = schema.with_aliases(field, aliases.iter().copied());
        }
        schema
    }
}

impl FieldSchema {
    /// Replaces the aliases of one field.
    pub fn with_aliases<I, S>(mut self, field: CanonicalField, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = aliases
            .into_iter()
            .map(|alias| normalize_header(alias.as_ref()))
            .filter(|alias| !alias.is_empty())
            .collect();
        self.aliases.insert(field, normalized);
        self
    }

    /// Aliases of one field, in priority order.
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        self.aliases.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Applies overrides loaded from configuration on top of this schema.
    pub fn merged(self, overrides: AliasOverrides) -> Self {
        overrides
            .0
            .into_iter()
            .fold(self, |schema, (field, aliases)| schema.with_aliases(field, aliases))
    }
}

/// Alias overrides as read from `aliases.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AliasOverrides(pub HashMap<CanonicalField, Vec<String>>);

fn is_boundary(c: Option<char>) -> bool {
    c.is_none_or(|c| !c.is_alphanumeric())
}

/// Byte offsets where `needle` occurs in `haystack` at the start of a word.
fn word_starts<'h>(haystack: &'h str, needle: &'h str) -> impl Iterator<Item = usize> + 'h {
    haystack
        .match_indices(needle)
        .map(|(at, _)| at)
        .filter(move |at| is_boundary(haystack[..*at].chars().next_back()))
}

/// Word endings accepted after an alias, so plural headers resolve.
const PLURAL_SUFFIXES: [&str; 2] = ["S", "ES"];

/// `needle` starts a word of `haystack` and the word either ends there or
/// continues only with a plural ending (`CPF` in `CPF DO SERVIDOR`,
/// `SERVIDOR` in `SERVIDORES`, but not `NOME` in `NOMEACAO`).
fn contains_word(haystack: &str, needle: &str) -> bool {
    word_starts(haystack, needle).any(|at| {
        let rest = &haystack[at + needle.len()..];
        is_boundary(rest.chars().next())
            || PLURAL_SUFFIXES.iter().any(|suffix| {
                rest.strip_prefix(suffix)
                    .is_some_and(|tail| is_boundary(tail.chars().next()))
            })
    })
}

/// `needle` begins a word of `haystack`, so abbreviations match (`UNID` in
/// `UNIDADE`) but word endings do not (`IDADE` in `IDENTIDADE`).
fn contains_word_prefix(haystack: &str, needle: &str) -> bool {
    word_starts(haystack, needle).next().is_some()
}

struct HeaderIndex<'a> {
    entries: Vec<(usize, String, &'a str)>,
}

impl<'a> HeaderIndex<'a> {
    fn new(row: &'a RawRow) -> Self {
        let entries = row
            .columns()
            .enumerate()
            .map(|(i, (header, cell))| (i, normalize_header(header), cell.trim()))
            .collect();
        Self { entries }
    }

    /// Finds the cell for the first matching alias.
    ///
    /// Exact header matches take precedence; when any column matches exactly,
    /// containment is not attempted even if that column's cell is blank.
    /// Containment is word-anchored: the header holds the alias as whole
    /// words (plural endings allowed), or the header is a word prefix of the
    /// alias.
    fn lookup<S: AsRef<str>>(&self, aliases: &[S]) -> Option<(usize, &'a str)> {
        let mut saw_exact = false;
        for alias in aliases {
            let alias = alias.as_ref();
            for (index, header, cell) in &self.entries {
                if header == alias {
                    saw_exact = true;
                    if !cell.is_empty() {
                        return Some((*index, *cell));
                    }
                }
            }
        }
        if saw_exact {
            return None;
        }

        for alias in aliases {
            let alias = alias.as_ref();
            if alias.len() < MIN_CONTAINMENT_LEN {
                continue;
            }
            for (index, header, cell) in &self.entries {
                if header.len() < MIN_CONTAINMENT_LEN || cell.is_empty() {
                    continue;
                }
                if contains_word(header, alias) || contains_word_prefix(alias, header) {
                    return Some((*index, *cell));
                }
            }
        }
        None
    }
}

/// Reduces a row to its canonical fields.
///
/// Never fails; fields without a matching column are empty strings.
///
/// # Example
///
/// ```
/// use premium_leave_engine::models::RawRow;
/// use premium_leave_engine::parsing::{FieldSchema, resolve};
///
/// let headers = vec!["Nome do Servidor".to_string(), "Lotação".to_string()];
/// let cells = vec!["Ana Lima".to_string(), "SEDUC".to_string()];
/// let fields = resolve(&RawRow::from_cells(&headers, &cells), &FieldSchema::default());
///
/// assert_eq!(fields.name, "Ana Lima");
/// assert_eq!(fields.lotacao, "SEDUC");
/// assert_eq!(fields.cpf, "");
/// assert_eq!(fields.raw_column_index, Some(0));
/// ```
pub fn resolve(row: &RawRow, schema: &FieldSchema) -> CanonicalFields {
    let index = HeaderIndex::new(row);
    let mut fields = CanonicalFields::default();

    for field in CanonicalField::ALL {
        if let Some((column, value)) = index.lookup(schema.aliases(field)) {
            if field == CanonicalField::Name {
                fields.raw_column_index = Some(column);
            }
            fields.set(field, value.to_string());
        }
    }

    fields
}

/// Looks up an auxiliary column by alias with the same matching rules as
/// [`resolve`]. Returns the matched header and its trimmed cell.
pub fn resolve_column<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<(&'a str, &'a str)> {
    let normalized: Vec<String> = aliases.iter().map(|a| normalize_header(a)).collect();
    let (column, value) = HeaderIndex::new(row).lookup(&normalized)?;
    let header = row.columns().nth(column).map(|(h, _)| h)?;
    Some((header, value))
}

/// Like [`resolve_column`] but returns only the cell, `""` when absent.
pub fn resolve_value<'a>(row: &'a RawRow, aliases: &[&str]) -> &'a str {
    resolve_column(row, aliases).map(|(_, v)| v).unwrap_or("")
}
