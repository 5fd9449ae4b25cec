//! Remote-then-local fallback composition.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use lote_model::CanonicalRecord;

use crate::error::StoreError;
use crate::repository::{Created, Repository};

/// Decorates a primary repository with a durable fallback.
///
/// Any primary failure triggers one fallback attempt; only both tiers
/// failing surfaces an error.
pub struct FallbackStore {
    primary: Arc<dyn Repository>,
    fallback: Arc<dyn Repository>,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn Repository>, fallback: Arc<dyn Repository>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl Repository for FallbackStore {
    async fn create(
        &self,
        endpoint: &str,
        record: &CanonicalRecord,
    ) -> Result<Created, StoreError> {
        let remote_error = match self.primary.create(endpoint, record).await {
            Ok(created) => return Ok(created),
            Err(error) => error,
        };
        warn!(endpoint, error = %remote_error, "remote persistence failed, trying local fallback");
        match self.fallback.create(endpoint, record).await {
            Ok(created) => Ok(created),
            Err(local_error) => Err(StoreError::BothTiersFailed {
                remote: Box::new(remote_error),
                local: Box::new(local_error),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::repository::CommitTier;
    use lote_model::Value;

    /// Primary that always refuses, simulating an unreachable API.
    struct AlwaysFails;

    #[async_trait]
    impl Repository for AlwaysFails {
        async fn create(
            &self,
            _endpoint: &str,
            _record: &CanonicalRecord,
        ) -> Result<Created, StoreError> {
            Err(StoreError::Api {
                status: 503,
                message: "unavailable".into(),
            })
        }
    }

    fn record() -> CanonicalRecord {
        let mut record = CanonicalRecord::new();
        record.insert("nome", Value::Text("Ana".into()));
        record
    }

    #[tokio::test]
    async fn primary_success_skips_the_fallback() {
        let primary = Arc::new(MemoryStore::new());
        let fallback = Arc::new(MemoryStore::new());
        let store = FallbackStore::new(primary.clone(), fallback.clone());

        let created = store.create("clientes", &record()).await.unwrap();
        assert_eq!(created.tier, CommitTier::Remote);
        assert_eq!(primary.count("clientes"), 1);
        assert_eq!(fallback.count("clientes"), 0);
    }

    #[tokio::test]
    async fn primary_failure_falls_back() {
        let fallback = Arc::new(MemoryStore::new());
        let store = FallbackStore::new(Arc::new(AlwaysFails), fallback.clone());

        let created = store.create("clientes", &record()).await.unwrap();
        // The memory fallback reports its own tier; with a LocalStore
        // behind it the tier is Local.
        assert_eq!(created.tier, CommitTier::Remote);
        assert_eq!(fallback.count("clientes"), 1);
    }

    #[tokio::test]
    async fn both_tiers_failing_is_one_error() {
        let store = FallbackStore::new(Arc::new(AlwaysFails), Arc::new(AlwaysFails));
        let error = store.create("clientes", &record()).await.unwrap_err();
        assert!(matches!(error, StoreError::BothTiersFailed { .. }));
    }

    #[tokio::test]
    async fn local_fallback_reports_local_tier() {
        let dir = tempfile::tempdir().unwrap();
        let store = FallbackStore::new(
            Arc::new(AlwaysFails),
            Arc::new(crate::local::LocalStore::new(dir.path())),
        );
        let created = store.create("clientes", &record()).await.unwrap();
        assert_eq!(created.tier, CommitTier::Local);
        assert_eq!(created.id, None);
    }
}
