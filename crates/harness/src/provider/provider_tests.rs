// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::config::HarnessConfig;
use crate::generation::GenerationOptions;
use crate::mock::{MemoryDocumentStore, MockAuth, MockGenerationClient};
use mockprobe_capture::CaptureFile;
use rstest::rstest;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

fn keyed_config() -> HarnessConfig {
    HarnessConfig::default().with_api_key("test-key")
}

fn memory_drivers(store: &MemoryDocumentStore) -> Drivers {
    let store = store.clone();
    Drivers::new()
        .with_document_store(move |_: &HarnessConfig| Ok(Arc::new(store.clone())))
        .with_generation(|_: &HarnessConfig| Ok(Arc::new(MockGenerationClient::new())))
        .with_auth(|_: &HarnessConfig| Ok(Arc::new(MockAuth::new())))
}

async fn seed(store: &MemoryDocumentStore, collection: &str, count: usize) {
    let collection = store.collection(collection);
    for i in 0..count {
        collection.add(json!({ "n": i })).await.unwrap();
    }
}

#[rstest]
#[case("mock", ProviderMode::Mock)]
#[case("real", ProviderMode::Real)]
#[case("capture", ProviderMode::Capture)]
#[case(" Capture ", ProviderMode::Capture)]
fn mode_parses(#[case] input: &str, #[case] want: ProviderMode) {
    assert_eq!(input.parse::<ProviderMode>().unwrap(), want);
}

#[rstest]
#[case("invalid")]
#[case("staging")]
#[case("")]
fn invalid_mode_names_the_value(#[case] input: &str) {
    let err = select(Some(input), &HarnessConfig::default(), Drivers::new())
        .err()
        .unwrap();
    assert!(matches!(err, ProviderError::Configuration(_)));
    let message = err.to_string();
    assert!(message.contains("invalid"), "{message}");
    assert!(message.contains(&format!("'{input}'")), "{message}");
}

#[test]
fn unset_mode_defaults_to_mock() {
    let provider = select(None, &HarnessConfig::default(), Drivers::new()).unwrap();
    assert_eq!(provider.mode(), ProviderMode::Mock);
    assert!(!provider.is_real_service());
}

#[test]
fn explicit_mode_overrides_configured_mode() {
    let config = keyed_config().with_mode("capture");
    let configured = select(None, &config, Drivers::new()).unwrap();
    assert_eq!(configured.mode(), ProviderMode::Capture);

    let explicit = select(Some("real"), &config, Drivers::new()).unwrap();
    assert_eq!(explicit.mode(), ProviderMode::Real);
    assert!(explicit.is_real_service());
}

#[rstest]
#[case("real")]
#[case("capture")]
fn real_modes_require_an_api_key(#[case] mode: &str) {
    let config = HarnessConfig {
        generation_api_key: Some("  ".to_string()),
        ..HarnessConfig::default()
    };
    let err = select(Some(mode), &config, Drivers::new()).err().unwrap();
    assert!(matches!(err, ProviderError::Configuration(_)));
    assert!(err.to_string().contains("GEMINI_API_KEY"));
}

#[test]
fn missing_driver_fails_only_for_that_capability() {
    let drivers = Drivers::new()
        .with_document_store(|_: &HarnessConfig| Ok(Arc::new(MemoryDocumentStore::new())));
    let provider = RealProvider::new(keyed_config(), drivers).unwrap();

    assert!(provider.get_document_store().is_ok());
    let err = provider.get_generation_client().err().unwrap();
    assert_eq!(
        err,
        ProviderError::Dependency {
            capability: "generation client".to_string()
        }
    );
    assert!(err.to_string().contains("generation client"));
    assert!(provider.get_auth().is_err());
}

#[test]
fn clients_are_built_lazily_and_once() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let drivers = Drivers::new().with_generation(move |_: &HarnessConfig| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockGenerationClient::new()))
    });

    let provider = RealProvider::new(keyed_config(), drivers).unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 0);

    let first = provider.get_generation_client().unwrap();
    let second = provider.get_generation_client().unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn driver_errors_surface_from_the_getter() {
    let drivers = Drivers::new().with_auth(|_: &HarnessConfig| {
        Err(ProviderError::Dependency {
            capability: "auth".to_string(),
        })
    });
    let provider = RealProvider::new(keyed_config(), drivers).unwrap();
    assert!(matches!(
        provider.get_auth().err().unwrap(),
        ProviderError::Dependency { .. }
    ));
}

#[tokio::test]
async fn cleanup_of_unused_real_provider_is_a_no_op() {
    let store = MemoryDocumentStore::new();
    seed(&store, "users", 3).await;
    let mut config = keyed_config();
    config.cleanup_collections = vec!["users".to_string()];

    let provider = RealProvider::new(config, memory_drivers(&store)).unwrap();
    provider.cleanup().await;
    provider.cleanup().await;
    assert_eq!(store.document_count(), 3);
}

#[tokio::test]
async fn real_cleanup_purges_configured_collections_in_batches() {
    let store = MemoryDocumentStore::new();
    seed(&store, "users", 250).await;
    seed(&store, "keep", 2).await;
    let mut config = keyed_config();
    config.cleanup_collections = vec!["users".to_string(), "missing".to_string()];

    let provider = RealProvider::new(config, memory_drivers(&store)).unwrap();
    provider.get_document_store().unwrap();
    provider.cleanup().await;

    assert!(store.collection("users").get().await.unwrap().is_empty());
    assert_eq!(store.collection("keep").get().await.unwrap().len(), 2);
}

#[rstest]
#[case(0, 10, 0)]
#[case(4, 2, 4)]
#[case(5, 2, 5)]
#[case(3, 0, 3)]
#[tokio::test]
async fn purge_counts_deleted_documents(
    #[case] seeded: usize,
    #[case] batch: usize,
    #[case] want: usize,
) {
    let store = MemoryDocumentStore::new();
    seed(&store, "c", seeded).await;
    let deleted = RealProvider::purge_collection(&store, "c", batch)
        .await
        .unwrap();
    assert_eq!(deleted, want);
    assert_eq!(store.document_count(), 0);
}

#[tokio::test]
async fn mock_provider_shares_one_store_and_clears_it() {
    let provider = MockProvider::new();
    let store = provider.get_document_store().unwrap();
    store
        .collection("users")
        .document("bob")
        .set(json!({"a": 1}), false)
        .await
        .unwrap();
    let again = provider.get_document_store().unwrap();
    assert!(again.collection("users").document("bob").get().await.unwrap().exists);

    let claims = provider
        .get_auth()
        .unwrap()
        .verify_id_token("token")
        .await
        .unwrap();
    assert_eq!(claims.uid, crate::auth::MOCK_UID);

    provider.cleanup().await;
    provider.cleanup().await;
    assert_eq!(provider.store().document_count(), 0);
}

#[tokio::test]
async fn capture_provider_records_and_saves_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryDocumentStore::new();
    let config = keyed_config().with_capture_dir(dir.path());
    let provider = CaptureProvider::new(config, memory_drivers(&store)).unwrap();
    assert!(provider.is_real_service());

    let documents = provider.get_document_store().unwrap();
    let doc = documents.collection("users").document("bob");
    doc.set(json!({"name": "Bob"}), false).await.unwrap();
    doc.get().await.unwrap();
    provider
        .get_generation_client()
        .unwrap()
        .generate_content("hello", &GenerationOptions::default())
        .await
        .unwrap();
    provider.get_auth().unwrap().verify_id_token("t").await.unwrap();

    assert_eq!(provider.capture_manager().len(), 3);
    // Writes reach the real backend
    assert_eq!(store.document_count(), 1);

    provider.cleanup().await;
    provider.cleanup().await;

    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
    let path = files[0].as_ref().unwrap().path();
    let file = CaptureFile::load(&path).unwrap();
    assert_eq!(file.total_interactions, 3);
    assert_eq!(file.session_id, provider.capture_manager().session_id());
}

#[tokio::test]
async fn capture_cleanup_survives_a_failed_save() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let store = MemoryDocumentStore::new();
    seed(&store, "users", 3).await;
    let mut config = keyed_config().with_capture_dir(&blocker);
    config.cleanup_collections = vec!["users".to_string()];

    let provider = CaptureProvider::new(config, memory_drivers(&store)).unwrap();
    provider.get_document_store().unwrap();
    provider.cleanup().await;

    assert_eq!(store.document_count(), 0);
}

#[derive(Default)]
struct CountingProvider {
    cleanups: AtomicUsize,
}

#[async_trait]
impl Provider for CountingProvider {
    fn mode(&self) -> ProviderMode {
        ProviderMode::Mock
    }

    fn is_real_service(&self) -> bool {
        false
    }

    fn get_document_store(&self) -> Result<Arc<dyn DocumentStore>, ProviderError> {
        Ok(Arc::new(MemoryDocumentStore::new()))
    }

    fn get_generation_client(&self) -> Result<Arc<dyn GenerationClient>, ProviderError> {
        Ok(Arc::new(MockGenerationClient::new()))
    }

    fn get_auth(&self) -> Result<Arc<dyn AuthService>, ProviderError> {
        Ok(Arc::new(MockAuth::new()))
    }

    async fn cleanup(&self) {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn context_reset_cleans_up_then_clears() {
    let context = ProviderContext::new();
    assert!(context.get().is_none());
    context.reset().await;

    let counting = Arc::new(CountingProvider::default());
    assert!(context.set(counting.clone()).is_none());
    assert!(context.get().is_some());

    context.reset().await;
    assert!(context.get().is_none());
    assert_eq!(counting.cleanups.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn context_get_or_select_reuses_the_held_provider() {
    let context = ProviderContext::new();
    let first = context
        .get_or_select(Some("mock"), &HarnessConfig::default(), Drivers::new())
        .unwrap();
    let second = context
        .get_or_select(Some("invalid"), &HarnessConfig::default(), Drivers::new())
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let replaced = context.set(Arc::new(CountingProvider::default()));
    assert!(replaced.is_some());
    context.reset().await;
}

#[tokio::test]
async fn global_context_round_trip() {
    current().set(Arc::new(MockProvider::new()));
    assert_eq!(current().get().unwrap().mode(), ProviderMode::Mock);
    current().reset().await;
    assert!(current().get().is_none());
}
