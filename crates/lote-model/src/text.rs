//! Text folding for comparisons across header variants and display names.
//!
//! Spreadsheet headers and entity names arrive with mixed casing, Latin
//! diacritics, and arbitrary separators. Folding reduces both sides of a
//! comparison to the same shape without losing word boundaries.

/// Folds text for comparison: lowercased, diacritics stripped, separators
/// replaced with single spaces.
pub fn fold(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        match ch {
            '_' | '-' | '.' | '/' | '\\' => out.push(' '),
            _ => out.push(fold_char(ch)),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deterministic slug for headers with no known alias: folded text with
/// spaces replaced by underscores and non-alphanumeric characters dropped.
pub fn slug(raw: &str) -> String {
    fold(raw)
        .chars()
        .map(|ch| if ch == ' ' { '_' } else { ch })
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .collect()
}

/// Lowercases one character and strips Latin-1 diacritics.
///
/// The header corpus is Portuguese; this table covers the accented forms
/// that actually occur in spreadsheet exports.
fn fold_char(ch: char) -> char {
    match ch.to_ascii_lowercase() {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        other => other,
    }
}
