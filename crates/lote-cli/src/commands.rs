//! Command implementations.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use lote_entities::{schema_for, schemas};
use lote_model::ImportResult;
use lote_pipeline::{ImportEngine, ImportOptions};
use lote_resolve::FallbackPolicy;
use lote_store::{FallbackStore, LocalStore, MemoryStore, RemoteStore};

use crate::cli::ImportArgs;
use crate::reader::read_rows;

/// Everything the summary needs to report one import run.
pub struct ImportOutcome {
    pub entity: String,
    pub rows_read: usize,
    pub result: ImportResult,
    /// Records waiting in the local outbox after the run.
    pub outbox_pending: Option<usize>,
    pub dry_run: bool,
}

pub async fn run_import(args: &ImportArgs) -> Result<ImportOutcome> {
    let schema = schema_for(&args.entity).ok_or_else(|| {
        let known: Vec<&str> = schemas().iter().map(|schema| schema.name).collect();
        anyhow!(
            "unknown entity \"{}\" (known: {})",
            args.entity,
            known.join(", ")
        )
    })?;

    let rows = read_rows(&args.file, args.delimiter)?;
    info!(
        entity = schema.name,
        file = %args.file.display(),
        rows = rows.len(),
        dry_run = args.dry_run,
        "starting import"
    );

    let options = ImportOptions {
        fallback_policy: if args.no_fk_fallback {
            FallbackPolicy::Reject
        } else {
            FallbackPolicy::FirstActive
        },
    };

    let endpoint = schema.endpoint;
    let entity = schema.name.to_string();
    let rows_read = rows.len();

    let (result, outbox_pending) = if args.dry_run {
        let engine = ImportEngine::new(schema, Arc::new(MemoryStore::new())).with_options(options);
        let result = engine
            .run(&rows)
            .await
            .with_context(|| format!("import {}", args.file.display()))?;
        (result, None)
    } else {
        let remote = Arc::new(RemoteStore::new(&args.api_url));
        let local = Arc::new(LocalStore::new(&args.outbox));
        let repository = Arc::new(FallbackStore::new(remote.clone(), local.clone()));
        let engine = ImportEngine::new(schema, repository)
            .with_search(remote)
            .with_options(options);
        let result = engine
            .run(&rows)
            .await
            .with_context(|| format!("import {}", args.file.display()))?;
        let pending = local.pending_count(endpoint).unwrap_or(0);
        (result, Some(pending))
    };

    Ok(ImportOutcome {
        entity,
        rows_read,
        result,
        outbox_pending,
        dry_run: args.dry_run,
    })
}

/// Prints the built-in schema catalog.
pub fn run_entities() {
    for schema in schemas() {
        let required: Vec<&str> = schema.required_fields().map(|spec| spec.key).collect();
        let references: Vec<&str> = schema.foreign_keys.iter().map(|fk| fk.entity).collect();
        println!(
            "{:<14} endpoint=/api/{:<17} required=[{}]{}",
            schema.name,
            schema.endpoint,
            required.join(", "),
            if references.is_empty() {
                String::new()
            } else {
                format!(" references=[{}]", references.join(", "))
            }
        );
    }
}
