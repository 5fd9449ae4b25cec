//! In-memory store for development, dry runs, and tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use lote_model::CanonicalRecord;

use crate::error::StoreError;
use crate::repository::{CommitTier, Created, Repository};

/// Stand-in for the remote API: accepts everything and assigns
/// sequential ids.
#[derive(Default)]
pub struct MemoryStore {
    next_id: AtomicI64,
    created: Mutex<BTreeMap<String, Vec<CanonicalRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            created: Mutex::new(BTreeMap::new()),
        }
    }

    /// Records accepted for an entity, in commit order.
    pub fn records(&self, endpoint: &str) -> Vec<CanonicalRecord> {
        self.created
            .lock()
            .map(|created| created.get(endpoint).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.records(endpoint).len()
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn create(
        &self,
        endpoint: &str,
        record: &CanonicalRecord,
    ) -> Result<Created, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut created) = self.created.lock() {
            created
                .entry(endpoint.to_string())
                .or_default()
                .push(record.clone());
        }
        Ok(Created {
            id: Some(id),
            tier: CommitTier::Remote,
        })
    }
}
