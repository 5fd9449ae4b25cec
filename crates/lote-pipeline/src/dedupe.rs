//! Composite-key deduplication.

use std::collections::BTreeSet;

use lote_model::{CanonicalRecord, fold};

/// Tracks composite keys across existing data and the running batch.
///
/// Keys are case-insensitive; the strategy functions already fold their
/// output, and folding again here keeps the invariant even for
/// caller-supplied existing keys.
#[derive(Debug, Default)]
pub struct Deduplicator {
    existing: BTreeSet<String>,
    seen_in_batch: BTreeSet<String>,
}

impl Deduplicator {
    pub fn new<I, S>(existing_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            existing: existing_keys
                .into_iter()
                .map(|key| fold(key.as_ref()))
                .collect(),
            seen_in_batch: BTreeSet::new(),
        }
    }

    /// Admits a key, recording it as seen. Returns `false` when the key
    /// collides with existing data or an earlier row of this batch;
    /// first occurrence wins.
    pub fn admit(&mut self, key: &str) -> bool {
        let key = fold(key);
        if self.existing.contains(&key) {
            return false;
        }
        self.seen_in_batch.insert(key)
    }
}

/// Batch deduplication: keeps the first record per composite key,
/// preserving order. Records whose key function yields nothing are kept;
/// absence of a key is not a collision.
pub fn dedupe<F>(
    records: Vec<CanonicalRecord>,
    existing_keys: &BTreeSet<String>,
    key_fn: F,
) -> Vec<CanonicalRecord>
where
    F: Fn(&CanonicalRecord) -> Option<String>,
{
    let mut dedup = Deduplicator::new(existing_keys.iter());
    records
        .into_iter()
        .filter(|record| match key_fn(record) {
            Some(key) => dedup.admit(&key),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lote_model::Value;

    fn named(name: &str) -> CanonicalRecord {
        let mut record = CanonicalRecord::new();
        record.insert("nome", Value::Text(name.into()));
        record
    }

    fn key_fn(record: &CanonicalRecord) -> Option<String> {
        record.text("nome").map(str::to_string)
    }

    #[test]
    fn first_occurrence_wins_within_a_batch() {
        let kept = dedupe(
            vec![named("Ana"), named("ANA"), named("Bia")],
            &BTreeSet::new(),
            key_fn,
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].text("nome"), Some("Ana"));
        assert_eq!(kept[1].text("nome"), Some("Bia"));
    }

    #[test]
    fn existing_keys_block_reimports() {
        let existing: BTreeSet<String> = ["ana".to_string()].into();
        let kept = dedupe(vec![named("Ana"), named("Bia")], &existing, key_fn);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text("nome"), Some("Bia"));
    }

    #[test]
    fn keyless_records_are_kept() {
        let kept = dedupe(
            vec![CanonicalRecord::new(), CanonicalRecord::new()],
            &BTreeSet::new(),
            key_fn,
        );
        assert_eq!(kept.len(), 2);
    }
}
