//! Resolution cascade implementation.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use lote_model::{EntityRef, fold};

/// Remote lookup hook for references no in-memory candidate satisfies.
///
/// Implemented by the remote store against
/// `GET /api/<entity>?search=<term>`.
#[async_trait]
pub trait ReferenceSearch: Send + Sync {
    async fn search(&self, entity: &str, term: &str) -> Result<Vec<EntityRef>, SearchError>;
}

/// Failure of the remote search hook. Resolution treats it as a miss and
/// continues to the fallback tier.
#[derive(Debug, Error)]
#[error("reference search failed: {0}")]
pub struct SearchError(pub String);

/// Which tier of the cascade produced an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    /// The reference was purely numeric and used as the id directly.
    DirectId,
    /// Exact display-name match among candidates.
    ExactName,
    /// Bidirectional substring match among candidates.
    PartialName,
    /// Exact name match among remote search results.
    RemoteSearch,
    /// No match at all; first active candidate taken.
    FirstActive,
    /// No match and no active candidate; first candidate taken.
    FirstCandidate,
}

/// What to do when every matching tier misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Take the first active candidate, else the first candidate. This
    /// preserves the historical import behavior; it is logged as a
    /// warning every time it fires.
    #[default]
    FirstActive,
    /// Treat an unmatched reference as unresolved.
    Reject,
}

/// A successful resolution and the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub id: i64,
    pub tier: ResolutionTier,
}

/// Resolves a human-readable reference to an internal id.
///
/// Tiers run in order, each only when the previous missed. Returns `None`
/// when nothing matches and the policy rejects fallback, or when there are
/// no candidates at all; the caller treats that as a fatal per-row error.
/// Deterministic for fixed inputs: repeated calls return the same id.
pub async fn resolve_reference(
    entity: &str,
    reference: &str,
    candidates: &[EntityRef],
    remote: Option<&dyn ReferenceSearch>,
    policy: FallbackPolicy,
) -> Option<Resolved> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    if reference.chars().all(|ch| ch.is_ascii_digit()) {
        if let Ok(id) = reference.parse::<i64>() {
            debug!(entity, reference, id, "reference resolved as direct id");
            return Some(Resolved {
                id,
                tier: ResolutionTier::DirectId,
            });
        }
    }

    let folded = fold(reference);

    for candidate in candidates {
        if fold(&candidate.display_name) == folded {
            debug!(entity, reference, id = candidate.id, "exact name match");
            return Some(Resolved {
                id: candidate.id,
                tier: ResolutionTier::ExactName,
            });
        }
    }

    for candidate in candidates {
        let name = fold(&candidate.display_name);
        if name.is_empty() {
            continue;
        }
        if name.contains(&folded) || folded.contains(&name) {
            debug!(entity, reference, id = candidate.id, "partial name match");
            return Some(Resolved {
                id: candidate.id,
                tier: ResolutionTier::PartialName,
            });
        }
    }

    if let Some(remote) = remote {
        match remote.search(entity, reference).await {
            Ok(results) => {
                for result in &results {
                    if fold(&result.display_name) == folded {
                        debug!(entity, reference, id = result.id, "remote search match");
                        return Some(Resolved {
                            id: result.id,
                            tier: ResolutionTier::RemoteSearch,
                        });
                    }
                }
                debug!(entity, reference, hits = results.len(), "remote search had no exact match");
            }
            Err(error) => {
                warn!(entity, reference, %error, "remote search failed, continuing to fallback");
            }
        }
    }

    match policy {
        FallbackPolicy::Reject => {
            debug!(entity, reference, "unmatched reference rejected by policy");
            None
        }
        FallbackPolicy::FirstActive => {
            if let Some(candidate) = candidates.iter().find(|candidate| candidate.active) {
                warn!(
                    entity,
                    reference,
                    fallback_id = candidate.id,
                    fallback_name = %candidate.display_name,
                    "no match; defaulting to first active candidate"
                );
                return Some(Resolved {
                    id: candidate.id,
                    tier: ResolutionTier::FirstActive,
                });
            }
            if let Some(candidate) = candidates.first() {
                warn!(
                    entity,
                    reference,
                    fallback_id = candidate.id,
                    fallback_name = %candidate.display_name,
                    "no match and no active candidate; defaulting to first candidate"
                );
                return Some(Resolved {
                    id: candidate.id,
                    tier: ResolutionTier::FirstCandidate,
                });
            }
            debug!(entity, reference, "no candidates to resolve against");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<EntityRef> {
        vec![
            EntityRef::new(1, "Restaurante do Zé Ltda", true),
            EntityRef::new(2, "Padaria Central", true),
            EntityRef::new(3, "Cantina Fechada", false),
        ]
    }

    #[tokio::test]
    async fn numeric_reference_is_the_id() {
        let resolved = resolve_reference("establishment", "42", &candidates(), None, FallbackPolicy::FirstActive)
            .await
            .unwrap();
        assert_eq!(resolved.id, 42);
        assert_eq!(resolved.tier, ResolutionTier::DirectId);
    }

    #[tokio::test]
    async fn exact_match_ignores_case_and_diacritics() {
        let resolved = resolve_reference(
            "establishment",
            "PADARIA CENTRAL",
            &candidates(),
            None,
            FallbackPolicy::FirstActive,
        )
        .await
        .unwrap();
        assert_eq!(resolved.id, 2);
        assert_eq!(resolved.tier, ResolutionTier::ExactName);
    }

    #[tokio::test]
    async fn substring_match_resolves_loose_references() {
        let resolved = resolve_reference(
            "establishment",
            "Restaurante do Zé",
            &candidates(),
            None,
            FallbackPolicy::FirstActive,
        )
        .await
        .unwrap();
        assert_eq!(resolved.id, 1);
        assert_eq!(resolved.tier, ResolutionTier::PartialName);
    }

    #[tokio::test]
    async fn remote_search_is_consulted_after_local_misses() {
        struct Fixed;
        #[async_trait]
        impl ReferenceSearch for Fixed {
            async fn search(&self, _entity: &str, _term: &str) -> Result<Vec<EntityRef>, SearchError> {
                Ok(vec![EntityRef::new(9, "Quiosque Novo", true)])
            }
        }
        let resolved = resolve_reference(
            "establishment",
            "quiosque novo",
            &[],
            Some(&Fixed),
            FallbackPolicy::Reject,
        )
        .await
        .unwrap();
        assert_eq!(resolved.id, 9);
        assert_eq!(resolved.tier, ResolutionTier::RemoteSearch);
    }

    #[tokio::test]
    async fn fallback_prefers_active_candidates() {
        let list = vec![
            EntityRef::new(3, "Cantina Fechada", false),
            EntityRef::new(2, "Padaria Central", true),
        ];
        let resolved = resolve_reference(
            "establishment",
            "Inexistente",
            &list,
            None,
            FallbackPolicy::FirstActive,
        )
        .await
        .unwrap();
        assert_eq!(resolved.id, 2);
        assert_eq!(resolved.tier, ResolutionTier::FirstActive);
    }

    #[tokio::test]
    async fn empty_candidates_and_no_remote_yield_none() {
        let resolved =
            resolve_reference("establishment", "Qualquer", &[], None, FallbackPolicy::FirstActive)
                .await;
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn reject_policy_turns_misses_into_none() {
        let resolved = resolve_reference(
            "establishment",
            "Inexistente",
            &candidates(),
            None,
            FallbackPolicy::Reject,
        )
        .await;
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn resolution_is_deterministic() {
        let list = candidates();
        let first = resolve_reference("establishment", "central", &list, None, FallbackPolicy::FirstActive)
            .await
            .unwrap();
        for _ in 0..3 {
            let again =
                resolve_reference("establishment", "central", &list, None, FallbackPolicy::FirstActive)
                    .await
                    .unwrap();
            assert_eq!(again, first);
        }
    }
}
