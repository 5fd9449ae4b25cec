//! Lightweight references to already-persisted related entities.

use serde::{Deserialize, Serialize};

/// Candidate for resolving a human-readable foreign-key reference.
///
/// Sourced from the caller's in-memory candidate list or from a remote
/// search; `active` drives the last-resort fallback tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
    #[serde(alias = "nome", alias = "name")]
    pub display_name: String,
    #[serde(default = "default_active", alias = "ativo")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl EntityRef {
    pub fn new(id: i64, display_name: impl Into<String>, active: bool) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            active,
        }
    }
}
