//! Local durable outbox.
//!
//! When the remote API is unreachable, accepted records append to a
//! line-oriented JSON file per entity so the operator's work survives the
//! outage. Draining the outbox back to the server is an operator workflow
//! outside the pipeline.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use lote_model::{CanonicalRecord, default_offset};

use crate::error::StoreError;
use crate::repository::{CommitTier, Created, Repository};

pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, endpoint: &str) -> PathBuf {
        self.dir.join(format!("{endpoint}.jsonl"))
    }

    /// Number of records queued for an entity, for operator reporting.
    pub fn pending_count(&self, endpoint: &str) -> Result<usize, StoreError> {
        let path = self.path_for(endpoint);
        if !path.exists() {
            return Ok(0);
        }
        let file = fs::File::open(&path).map_err(|source| StoreError::Outbox {
            operation: "read",
            path: path.clone(),
            source,
        })?;
        let mut count = 0;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| StoreError::Outbox {
                operation: "read",
                path: path.clone(),
                source,
            })?;
            if !line.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }
}

#[async_trait]
impl Repository for LocalStore {
    async fn create(
        &self,
        endpoint: &str,
        record: &CanonicalRecord,
    ) -> Result<Created, StoreError> {
        let path = self.path_for(endpoint);
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Outbox {
            operation: "create",
            path: self.dir.clone(),
            source,
        })?;
        let entry = json!({
            "endpoint": endpoint,
            "queued_at": chrono::Utc::now().with_timezone(&default_offset()).to_rfc3339(),
            "record": record,
        });
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Outbox {
                operation: "open",
                path: path.clone(),
                source,
            })?;
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');
        file.write_all(line.as_bytes())
            .and_then(|()| file.sync_data())
            .map_err(|source| StoreError::Outbox {
                operation: "append to",
                path: path.clone(),
                source,
            })?;
        debug!(endpoint, path = %path.display(), "record queued in local outbox");
        Ok(Created {
            id: None,
            tier: CommitTier::Local,
        })
    }
}
