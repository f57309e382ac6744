// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Capture a provider run, then analyze and compare the saved file.

use mockprobe::capture::CaptureFile;
use mockprobe::mock::{MemoryDocumentStore, MockAuth, MockGenerationClient};
use mockprobe::{
    select, Drivers, GenerationOptions, HarnessConfig, ProviderError,
};
use mockprobe_compare::{
    analyze, compare, render_comparison, render_report, synthesize_baseline, BaselineStrategy,
    DifferenceKind,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn drivers(reply: &'static str) -> Drivers {
    let store = MemoryDocumentStore::new();
    Drivers::new()
        .with_document_store(move |_: &HarnessConfig| Ok(Arc::new(store.clone())))
        .with_generation(move |_: &HarnessConfig| {
            Ok(Arc::new(MockGenerationClient::new().with_response(reply)))
        })
        .with_auth(|_: &HarnessConfig| Ok(Arc::new(MockAuth::new())))
}

/// Drive a small suite through a capture provider and return the saved file
async fn capture_run(dir: &Path, reply: &'static str) -> PathBuf {
    let config = HarnessConfig::default()
        .with_api_key("test-key")
        .with_capture_dir(dir);
    let provider = select(Some("capture"), &config, drivers(reply)).unwrap();

    let store = provider.get_document_store().unwrap();
    let doc = store.collection("users").document("ada");
    doc.set(json!({"name": "Ada", "api_key": "sk-live"}), false)
        .await
        .unwrap();
    doc.get().await.unwrap();
    let missing = store
        .collection("users")
        .document("ghost")
        .update(json!({"x": 1}))
        .await;
    assert!(missing.is_err());

    provider
        .get_generation_client()
        .unwrap()
        .generate_content("Write a greeting", &GenerationOptions::default())
        .await
        .unwrap();

    provider.cleanup().await;

    let mut files: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    files.remove(0)
}

#[tokio::test]
async fn captured_run_is_analyzed() {
    let dir = tempfile::tempdir().unwrap();
    let path = capture_run(dir.path(), "Hello there").await;

    let file = CaptureFile::load(&path).unwrap();
    assert_eq!(file.total_interactions, 4);
    // Redaction happened before the file was written
    assert_eq!(
        file.interactions[0].request["data"]["api_key"],
        json!("[REDACTED]")
    );

    let analysis = analyze(dir.path(), 7);
    let report = analysis.report().unwrap();
    assert_eq!(report.files_analyzed, 1);
    assert_eq!(report.total_interactions, 4);
    assert_eq!(report.services["firestore"].count, 3);
    assert_eq!(report.services["firestore"].errors, 1);
    assert_eq!(report.services["gemini"].count, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].error_type, "NotFound");

    let markdown = render_report(&analysis);
    assert!(markdown.contains("# Capture Analysis Report"));
    assert!(markdown.contains("firestore"));
}

#[tokio::test]
async fn real_capture_compared_against_mock_baseline() {
    let real_dir = tempfile::tempdir().unwrap();
    let mock_dir = tempfile::tempdir().unwrap();
    let real = CaptureFile::load(&capture_run(real_dir.path(), "Hello there").await).unwrap();
    let mock = CaptureFile::load(&capture_run(mock_dir.path(), "Hi").await).unwrap();

    let (self_baseline, entries) = synthesize_baseline(&real, BaselineStrategy::FirstWins);
    assert_eq!(entries, 3);
    assert!(!self_baseline.contains_key("firestore.document.update"));
    let self_result = compare(&real, &self_baseline);
    assert_eq!(self_result.total_comparisons, 3);
    assert_eq!(self_result.accuracy_score, 1.0);

    let (mock_baseline, _) = synthesize_baseline(&mock, BaselineStrategy::FirstWins);
    let result = compare(&real, &mock_baseline);
    assert_eq!(result.total_comparisons, 3);
    assert_eq!(result.matches, 2);
    assert!(result.missing_mocks.is_empty());
    assert!(result.differences.iter().all(|d| d.key == "gemini.generate_content"));
    assert!(result
        .differences
        .iter()
        .any(|d| d.difference.kind == DifferenceKind::ValueMismatch
            && d.difference.path == "text_preview"));

    let markdown = render_comparison(&result);
    assert!(markdown.contains("# Mock Accuracy Report"));
    assert!(markdown.contains("66.7%"));
}

#[tokio::test]
async fn unusable_capability_still_cleans_up() {
    let err = select(Some("invalid"), &HarnessConfig::default(), Drivers::new())
        .err()
        .unwrap();
    assert!(err.to_string().contains("invalid"));

    let dir = tempfile::tempdir().unwrap();
    let config = HarnessConfig::default()
        .with_api_key("test-key")
        .with_capture_dir(dir.path());
    let provider = select(Some("capture"), &config, Drivers::new()).unwrap();
    let err = provider.get_document_store().err().unwrap();
    assert!(matches!(err, ProviderError::Dependency { .. }));

    provider.cleanup().await;
    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
    let file = CaptureFile::load(&files[0].as_ref().unwrap().path()).unwrap();
    assert_eq!(file.total_interactions, 0);
}
