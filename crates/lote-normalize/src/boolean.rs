//! Locale-tolerant boolean parsing.

use lote_model::fold;

/// Parses a truthy/falsy token, ignoring case and diacritics.
///
/// Unrecognized input yields `None`; the caller applies a field-specific
/// default. It is never silently coerced to `false`.
pub fn normalize_bool(raw: &str) -> Option<bool> {
    match fold(raw).as_str() {
        "1" | "true" | "ativo" | "sim" | "yes" | "s" => Some(true),
        "0" | "false" | "inativo" | "nao" | "no" | "n" => Some(false),
        _ => None,
    }
}
