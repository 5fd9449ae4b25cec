//! The persistence seam the pipeline commits through.

use async_trait::async_trait;

use lote_model::CanonicalRecord;

use crate::error::StoreError;

/// Which persistence tier accepted a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitTier {
    /// The record reached the remote API (or its in-memory stand-in).
    Remote,
    /// The record landed in the local durable outbox, pending
    /// reconciliation.
    Local,
}

/// Outcome of persisting one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Created {
    /// Server-assigned id; the local outbox assigns none.
    pub id: Option<i64>,
    pub tier: CommitTier,
}

/// One create operation per record; commit order is the caller's concern
/// (the pipeline commits strictly sequentially).
#[async_trait]
pub trait Repository: Send + Sync {
    async fn create(
        &self,
        endpoint: &str,
        record: &CanonicalRecord,
    ) -> Result<Created, StoreError>;
}
