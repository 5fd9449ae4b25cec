//! End-to-end engine tests over in-memory and failing stores.

use std::sync::Arc;

use async_trait::async_trait;

use lote_entities::{client, item, menu};
use lote_model::{CanonicalRecord, EntityRef, ImportError, RawRecord};
use lote_pipeline::{ImportEngine, ImportOptions};
use lote_resolve::FallbackPolicy;
use lote_store::{Created, FallbackStore, LocalStore, MemoryStore, Repository, StoreError};

fn row(pairs: &[(&str, &str)]) -> RawRecord {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

/// Remote stand-in that refuses every record.
struct UnreachableApi;

#[async_trait]
impl Repository for UnreachableApi {
    async fn create(
        &self,
        _endpoint: &str,
        _record: &CanonicalRecord,
    ) -> Result<Created, StoreError> {
        Err(StoreError::Api {
            status: 503,
            message: "service unavailable".into(),
        })
    }
}

#[tokio::test]
async fn valid_rows_import_exactly_once() {
    let store = Arc::new(MemoryStore::new());
    let engine = ImportEngine::new(client(), store.clone()).with_candidates(
        "establishment",
        vec![EntityRef::new(10, "Padaria Central", true)],
    );

    let result = engine
        .run(&[row(&[
            ("Nome Completo", "Ana Souza"),
            ("CPF", "123.456.789-09"),
            ("Estabelecimento", "Padaria Central"),
        ])])
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.imported, 1);
    assert!(result.errors.is_empty());

    let committed = store.records("clientes");
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].text("nome"), Some("Ana Souza"));
    assert_eq!(committed[0].int("estabelecimento_id"), Some(10));
    assert!(committed[0].get("estabelecimento").is_none());
}

#[tokio::test]
async fn missing_required_field_fails_only_that_row() {
    // Scenario: 3 rows, row 2 missing a required field.
    let store = Arc::new(MemoryStore::new());
    let engine = ImportEngine::new(client(), store.clone());

    let result = engine
        .run(&[
            row(&[("Nome", "Ana")]),
            row(&[("CPF", "12345678909")]),
            row(&[("Nome", "Caio")]),
        ])
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.imported, 2);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("row 2:"));
    assert!(result.errors[0].contains("\"Nome\""));
    assert_eq!(store.count("clientes"), 2);
}

#[tokio::test]
async fn remote_outage_saves_everything_locally() {
    // Scenario: remote commit always fails, local storage succeeds.
    let dir = tempfile::tempdir().unwrap();
    let local = Arc::new(LocalStore::new(dir.path()));
    let repository = Arc::new(FallbackStore::new(Arc::new(UnreachableApi), local.clone()));
    let engine = ImportEngine::new(client(), repository);

    let result = engine
        .run(&[
            row(&[("Nome", "Ana")]),
            row(&[("Nome", "Bia")]),
            row(&[("Nome", "Caio")]),
        ])
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.imported, 3);
    assert!(result.message.contains("saved locally"));
    assert!(result.errors.is_empty());
    assert_eq!(local.pending_count("clientes").unwrap(), 3);
}

#[tokio::test]
async fn duplicate_composite_keys_keep_the_first_row() {
    let store = Arc::new(MemoryStore::new());
    let engine = ImportEngine::new(client(), store.clone());

    let result = engine
        .run(&[
            row(&[("Nome", "Ana"), ("CPF", "123.456.789-09")]),
            row(&[("Nome", "Ana Maria"), ("CPF", "12345678909")]),
        ])
        .await
        .unwrap();

    assert_eq!(result.imported, 1);
    // Duplicates are an expected outcome of re-importing a file, not errors.
    assert!(result.errors.is_empty());
    assert!(result.message.contains("1 duplicate(s) skipped"));
    assert_eq!(store.records("clientes")[0].text("nome"), Some("Ana"));
}

#[tokio::test]
async fn reimporting_against_existing_keys_drops_silently() {
    let store = Arc::new(MemoryStore::new());
    let engine =
        ImportEngine::new(client(), store.clone()).with_existing_keys(["12345678909".to_string()]);

    let result = engine
        .run(&[row(&[("Nome", "Ana"), ("CPF", "123.456.789-09")])])
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.imported, 0);
    assert!(result.errors.is_empty());
    assert_eq!(store.count("clientes"), 0);
}

#[tokio::test]
async fn loose_reference_resolves_by_substring() {
    let store = Arc::new(MemoryStore::new());
    let engine = ImportEngine::new(menu(), store.clone()).with_candidates(
        "establishment",
        vec![EntityRef::new(7, "Restaurante do Zé Ltda", true)],
    );

    let result = engine
        .run(&[row(&[
            ("Nome", "Almoço Executivo"),
            ("Estabelecimento", "Restaurante do Zé"),
        ])])
        .await
        .unwrap();

    assert_eq!(result.imported, 1);
    assert_eq!(
        store.records("cardapios")[0].int("estabelecimento_id"),
        Some(7)
    );
}

#[tokio::test]
async fn unresolvable_reference_is_a_fatal_row_error() {
    // Scenario: empty candidate list and no remote search hook.
    let store = Arc::new(MemoryStore::new());
    let engine = ImportEngine::new(menu(), store.clone());

    let result = engine
        .run(&[row(&[
            ("Nome", "Almoço Executivo"),
            ("Estabelecimento", "Quiosque Fantasma"),
        ])])
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.imported, 0);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("Quiosque Fantasma"));
    assert_eq!(store.count("cardapios"), 0);
}

#[tokio::test]
async fn reject_policy_disables_the_first_active_fallback() {
    let store = Arc::new(MemoryStore::new());
    let candidates = vec![EntityRef::new(1, "Padaria Central", true)];

    let defaulted = ImportEngine::new(menu(), store.clone())
        .with_candidates("establishment", candidates.clone())
        .run(&[row(&[("Nome", "Café"), ("Estabelecimento", "Inexistente")])])
        .await
        .unwrap();
    assert_eq!(defaulted.imported, 1);

    let rejected = ImportEngine::new(menu(), store.clone())
        .with_candidates("establishment", candidates)
        .with_options(ImportOptions {
            fallback_policy: FallbackPolicy::Reject,
        })
        .run(&[row(&[("Nome", "Chá"), ("Estabelecimento", "Inexistente")])])
        .await
        .unwrap();
    assert_eq!(rejected.imported, 0);
    assert_eq!(rejected.errors.len(), 1);
}

#[tokio::test]
async fn numeric_references_skip_candidate_matching() {
    let store = Arc::new(MemoryStore::new());
    let engine = ImportEngine::new(item(), store.clone());

    let result = engine
        .run(&[row(&[
            ("Nome", "X-Salada"),
            ("Preço", "25,90"),
            ("Cardápio", "3"),
        ])])
        .await
        .unwrap();

    assert_eq!(result.imported, 1);
    let committed = &store.records("itens")[0];
    assert_eq!(committed.int("cardapio_id"), Some(3));
    assert_eq!(committed.int("preco"), Some(2590));
}

#[tokio::test]
async fn empty_input_aborts_the_batch() {
    let engine = ImportEngine::new(client(), Arc::new(MemoryStore::new()));
    let error = engine.run(&[]).await.unwrap_err();
    assert!(matches!(error, ImportError::EmptyBatch));
}

#[tokio::test]
async fn dual_tier_failure_reports_persistence_errors() {
    let repository = Arc::new(FallbackStore::new(
        Arc::new(UnreachableApi),
        Arc::new(UnreachableApi),
    ));
    let engine = ImportEngine::new(client(), repository);

    let result = engine.run(&[row(&[("Nome", "Ana")])]).await.unwrap();
    assert!(!result.success);
    assert_eq!(result.imported, 0);
    assert_eq!(result.errors.len(), 1);
    assert!(result.message.contains("persistence failures"));
}
