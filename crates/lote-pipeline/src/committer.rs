//! Sequential record committing.

use std::sync::Arc;

use tracing::debug;

use lote_model::{CanonicalRecord, ErrorCategory, RowIssue};
use lote_store::{CommitTier, Created, Repository};

/// Tally of one commit pass.
#[derive(Debug, Default)]
pub struct CommitOutcome {
    /// Records accepted by the remote API.
    pub remote: usize,
    /// Records queued in the local durable outbox.
    pub local: usize,
    /// Records both tiers refused, with row context.
    pub failures: Vec<RowIssue>,
}

impl CommitOutcome {
    pub fn imported(&self) -> usize {
        self.remote + self.local
    }

    pub fn record(&mut self, created: &Created) {
        match created.tier {
            CommitTier::Remote => self.remote += 1,
            CommitTier::Local => self.local += 1,
        }
    }
}

/// Commits surviving records one at a time through a repository.
///
/// Order is strictly sequential: later rows may depend on entities
/// created by earlier rows, and candidate caches are populated
/// incrementally, so parallel fan-out would race both.
pub struct BatchCommitter {
    repository: Arc<dyn Repository>,
    endpoint: String,
}

impl BatchCommitter {
    pub fn new(repository: Arc<dyn Repository>, endpoint: impl Into<String>) -> Self {
        Self {
            repository,
            endpoint: endpoint.into(),
        }
    }

    /// Commits one record, mapping a dual-tier failure to a row issue.
    pub async fn commit_record(
        &self,
        row_index: usize,
        record: &CanonicalRecord,
    ) -> Result<Created, RowIssue> {
        match self.repository.create(&self.endpoint, record).await {
            Ok(created) => {
                debug!(row_index, endpoint = %self.endpoint, tier = ?created.tier, "record committed");
                Ok(created)
            }
            Err(error) => Err(RowIssue::error(
                row_index,
                None,
                ErrorCategory::Commit,
                error.to_string(),
            )),
        }
    }

    /// Commits a prepared batch sequentially.
    pub async fn commit(&self, records: &[CanonicalRecord]) -> CommitOutcome {
        let mut outcome = CommitOutcome::default();
        for (row_index, record) in records.iter().enumerate() {
            match self.commit_record(row_index, record).await {
                Ok(created) => outcome.record(&created),
                Err(issue) => outcome.failures.push(issue),
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lote_model::Value;
    use lote_store::MemoryStore;

    fn named(name: &str) -> CanonicalRecord {
        let mut record = CanonicalRecord::new();
        record.insert("nome", Value::Text(name.into()));
        record
    }

    #[tokio::test]
    async fn commits_in_order() {
        let store = Arc::new(MemoryStore::new());
        let committer = BatchCommitter::new(store.clone(), "clientes");

        let outcome = committer
            .commit(&[named("Ana"), named("Bia"), named("Caio")])
            .await;
        assert_eq!(outcome.remote, 3);
        assert_eq!(outcome.local, 0);
        assert!(outcome.failures.is_empty());

        let names: Vec<_> = store
            .records("clientes")
            .iter()
            .map(|record| record.text("nome").unwrap_or_default().to_string())
            .collect();
        assert_eq!(names, ["Ana", "Bia", "Caio"]);
    }
}
