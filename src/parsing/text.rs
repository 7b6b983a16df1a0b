//! Text normalization shared by header matching and schedule parsing.

use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

/// Removes diacritics by decomposing to NFD and dropping combining marks.
///
/// # Examples
///
/// ```
/// use premium_leave_engine::parsing::fold_diacritics;
///
/// assert_eq!(fold_diacritics("Lotação"), "Lotacao");
/// assert_eq!(fold_diacritics("início em março"), "inicio em marco");
/// ```
pub fn fold_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Header form used for alias matching: no diacritics, upper-case, single
/// spaces, trimmed.
pub fn normalize_header(text: &str) -> String {
    collapse_whitespace(&fold_diacritics(text).to_uppercase())
}

/// Free-text form used by the schedule matcher: no diacritics, lower-case,
/// single spaces, trimmed.
pub fn normalize_text(text: &str) -> String {
    collapse_whitespace(&fold_diacritics(text).to_lowercase())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
