//! The Portuguese month table.
//!
//! One table serves the date normalizer, the schedule matcher and the period
//! generator. The system is locale-fixed; there is no other language.

use super::text::fold_diacritics;

/// Full month names, without diacritics, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "marco",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Three-letter abbreviations, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Regex alternation matching any full name or abbreviation, longest first so
/// that `marco` wins over `mar`.
pub(crate) const MONTH_ALTERNATION: &str = "janeiro|fevereiro|marco|abril|maio|junho|julho|agosto|setembro|outubro|novembro|dezembro|jan|fev|mar|abr|mai|jun|jul|ago|set|out|nov|dez";

/// Regex alternation matching full names only.
pub(crate) const MONTH_NAME_ALTERNATION: &str = "janeiro|fevereiro|marco|abril|maio|junho|julho|agosto|setembro|outubro|novembro|dezembro";

/// Looks up a month (1-12) by full name or abbreviation.
///
/// Case, diacritics, surrounding whitespace and a trailing period are ignored.
///
/// # Examples
///
/// ```
/// use premium_leave_engine::parsing::month_from_name;
///
/// assert_eq!(month_from_name("Março"), Some(3));
/// assert_eq!(month_from_name("set."), Some(9));
/// assert_eq!(month_from_name("sept"), None);
/// ```
pub fn month_from_name(text: &str) -> Option<u32> {
    let folded = fold_diacritics(text.trim()).to_lowercase();
    let key = folded.trim_end_matches('.');
    MONTH_NAMES
        .iter()
        .position(|name| *name == key)
        .or_else(|| MONTH_ABBREVIATIONS.iter().position(|abbr| *abbr == key))
        .map(|index| index as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_full_name_resolves() {
        for (i, name) in MONTH_NAMES.iter().enumerate() {
            assert_eq!(month_from_name(name), Some(i as u32 + 1));
        }
    }

    #[test]
    fn test_every_abbreviation_resolves() {
        for (i, abbr) in MONTH_ABBREVIATIONS.iter().enumerate() {
            assert_eq!(month_from_name(abbr), Some(i as u32 + 1));
        }
    }

    #[test]
    fn test_lookup_ignores_case_accents_and_period() {
        assert_eq!(month_from_name("MARÇO"), Some(3));
        assert_eq!(month_from_name(" Dez. "), Some(12));
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert_eq!(month_from_name(""), None);
        assert_eq!(month_from_name("january"), None);
        assert_eq!(month_from_name("ja"), None);
    }

    #[test]
    fn test_alternations_cover_table() {
        for name in MONTH_NAMES {
            assert!(MONTH_NAME_ALTERNATION.split('|').any(|n| n == name));
            assert!(MONTH_ALTERNATION.split('|').any(|n| n == name));
        }
        for abbr in MONTH_ABBREVIATIONS {
            assert!(MONTH_ALTERNATION.split('|').any(|n| n == abbr));
        }
    }
}
