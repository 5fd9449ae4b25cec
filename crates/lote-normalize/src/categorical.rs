//! Categorical (enum) value normalization.

use lote_model::{FoldedSet, fold};

/// Maps loose categorical input onto a canonical variant.
///
/// Tiers, each tried only when the previous misses:
/// 1. fold-insensitive exact match;
/// 2. compact match (alphanumeric characters only, so `"em-rota"` finds
///    `"Em rota"`);
/// 3. unique-prefix match (`"pend"` finds `"Pendente"`); an ambiguous
///    prefix matches nothing.
pub fn normalize_enum(raw: &str, variants: &[&str]) -> Option<String> {
    let folded = fold(raw);
    if folded.is_empty() {
        return None;
    }
    if let Some(canonical) = FoldedSet::new(variants.iter().copied()).get(raw) {
        return Some(canonical.to_string());
    }
    let compacted = compact(&folded);
    for variant in variants {
        if compact(&fold(variant)) == compacted {
            return Some((*variant).to_string());
        }
    }
    let mut prefix_hit = None;
    for variant in variants {
        if fold(variant).starts_with(&folded) {
            if prefix_hit.is_some() {
                return None;
            }
            prefix_hit = Some((*variant).to_string());
        }
    }
    prefix_hit
}

fn compact(folded: &str) -> String {
    folded.chars().filter(char::is_ascii_alphanumeric).collect()
}
