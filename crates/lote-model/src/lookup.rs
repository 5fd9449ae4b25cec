//! Fold-insensitive lookup preserving original spellings.

use std::collections::HashMap;

use crate::text::fold;

/// A set with fold-insensitive membership (case and diacritics ignored)
/// that hands back the original spelling on lookup.
///
/// Used for enum variant matching, where the stored canonical form
/// ("Pendente") must survive a lookup by "PENDENTE" or "pendênte".
#[derive(Debug, Clone, Default)]
pub struct FoldedSet {
    inner: HashMap<String, String>,
}

impl FoldedSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inner = HashMap::new();
        for name in names {
            let name = name.as_ref();
            inner.entry(fold(name)).or_insert_with(|| name.to_string());
        }
        Self { inner }
    }

    pub fn insert(&mut self, name: impl AsRef<str>) {
        let name = name.as_ref();
        self.inner.entry(fold(name)).or_insert_with(|| name.to_string());
    }

    /// The original spelling stored for a fold-equivalent name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(&fold(name)).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(&fold(name))
    }
}
