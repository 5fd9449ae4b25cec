//! The import engine: one generic pipeline over any entity schema.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use lote_map::HeaderMapper;
use lote_model::{
    CanonicalRecord, EntityRef, EntitySchema, ErrorCategory, ImportError, ImportResult, RawRecord,
    Result, RowIssue, Value,
};
use lote_normalize::normalize_record;
use lote_resolve::{FallbackPolicy, ReferenceSearch, resolve_reference};
use lote_store::Repository;
use lote_validate::RuleSet;

use crate::aggregate::aggregate;
use crate::committer::{BatchCommitter, CommitOutcome};
use crate::dedupe::Deduplicator;

/// Tunables for one batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// What foreign-key resolution does when every matching tier misses.
    pub fallback_policy: FallbackPolicy,
}

/// Generic import pipeline for one entity type.
///
/// Rows are processed strictly one at a time, each to completion
/// (normalize, validate, resolve, dedupe-check, commit) before the next
/// row begins. Remote calls are awaited one at a time; parallel fan-out
/// would race the incremental dedupe state and foreign-key candidate
/// caches.
pub struct ImportEngine {
    schema: EntitySchema,
    repository: Arc<dyn Repository>,
    candidates: BTreeMap<String, Vec<EntityRef>>,
    search: Option<Arc<dyn ReferenceSearch>>,
    existing_keys: BTreeSet<String>,
    options: ImportOptions,
}

impl ImportEngine {
    pub fn new(schema: EntitySchema, repository: Arc<dyn Repository>) -> Self {
        Self {
            schema,
            repository,
            candidates: BTreeMap::new(),
            search: None,
            existing_keys: BTreeSet::new(),
            options: ImportOptions::default(),
        }
    }

    /// Seeds the in-memory candidate list for one referenced entity type.
    #[must_use]
    pub fn with_candidates(mut self, entity: impl Into<String>, list: Vec<EntityRef>) -> Self {
        self.candidates.insert(entity.into(), list);
        self
    }

    /// Installs the remote search hook used when candidates miss.
    #[must_use]
    pub fn with_search(mut self, search: Arc<dyn ReferenceSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Seeds composite keys of records already persisted, so re-imports
    /// of the same file drop silently instead of duplicating.
    #[must_use]
    pub fn with_existing_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.existing_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the batch. Errs only on total input absence; every per-row
    /// failure is collected into the result and the batch continues.
    pub async fn run(&self, rows: &[RawRecord]) -> Result<ImportResult> {
        if rows.is_empty() {
            return Err(ImportError::EmptyBatch);
        }
        let start = Instant::now();
        info!(
            entity = self.schema.name,
            rows = rows.len(),
            "import batch started"
        );

        let mapper = HeaderMapper::for_schema(&self.schema);
        let rules = RuleSet::for_schema(&self.schema);
        let mut dedup = Deduplicator::new(self.existing_keys.iter());
        let committer = BatchCommitter::new(self.repository.clone(), self.schema.endpoint);

        let mut row_errors: Vec<RowIssue> = Vec::new();
        let mut outcome = CommitOutcome::default();
        let mut duplicates = 0usize;

        for (row_index, raw) in rows.iter().enumerate() {
            let mapped = mapper.map_record(raw);
            let mut record = normalize_record(&mapped, &self.schema);

            let errors: Vec<RowIssue> = rules
                .check_record(&record, row_index)
                .into_iter()
                .filter(RowIssue::is_error)
                .collect();
            if !errors.is_empty() {
                debug!(row_index, count = errors.len(), "row failed validation");
                row_errors.extend(errors);
                continue;
            }

            if !self.resolve_foreign_keys(row_index, &mut record, &mut row_errors).await {
                continue;
            }

            if let Some(key) = self.schema.key.composite_key(&record) {
                if !dedup.admit(&key) {
                    duplicates += 1;
                    debug!(row_index, key = %key, "duplicate row skipped");
                    continue;
                }
            }

            match committer.commit_record(row_index, &record).await {
                Ok(created) => outcome.record(&created),
                Err(issue) => outcome.failures.push(issue),
            }
        }

        let result = aggregate(outcome, row_errors, duplicates);
        info!(
            entity = self.schema.name,
            imported = result.imported,
            errors = result.errors.len(),
            duplicates,
            duration_ms = start.elapsed().as_millis(),
            "import batch finished"
        );
        Ok(result)
    }

    /// Resolves every foreign-key field in place. Returns `false` when at
    /// least one reference could not be resolved; all unresolved
    /// references are reported, not just the first.
    async fn resolve_foreign_keys(
        &self,
        row_index: usize,
        record: &mut CanonicalRecord,
        row_errors: &mut Vec<RowIssue>,
    ) -> bool {
        let mut resolved_all = true;
        for fk in &self.schema.foreign_keys {
            let reference = match record.get(fk.field) {
                Some(Value::Text(text)) => text.clone(),
                Some(Value::Int(id)) => id.to_string(),
                _ => continue,
            };
            if reference.trim().is_empty() {
                continue;
            }
            let candidates = self
                .candidates
                .get(fk.entity)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let resolution = resolve_reference(
                fk.entity,
                &reference,
                candidates,
                self.search.as_deref(),
                self.options.fallback_policy,
            )
            .await;
            match resolution {
                Some(resolved) => {
                    record.remove(fk.field);
                    record.insert(fk.id_field(), Value::Int(resolved.id));
                }
                None => {
                    row_errors.push(RowIssue::error(
                        row_index,
                        Some(fk.field),
                        ErrorCategory::ForeignKey,
                        format!("could not resolve {} \"{reference}\"", fk.label),
                    ));
                    resolved_all = false;
                }
            }
        }
        resolved_all
    }
}
