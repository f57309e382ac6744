// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::test_support::{capture, failure, success, timed};
use serde_json::json;

#[test]
fn empty_directory_reports_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let analysis = analyze(dir.path(), 7);
    assert_eq!(
        analysis,
        Analysis::NoFiles {
            error: "no files found".to_string()
        }
    );
    assert_eq!(
        serde_json::to_value(&analysis).unwrap(),
        json!({"error": "no files found"})
    );
}

#[test]
fn missing_directory_reports_no_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(analyze(&dir.path().join("missing"), 7).report().is_none());
}

#[test]
fn aggregates_across_files() {
    let dir = tempfile::tempdir().unwrap();
    capture(vec![
        timed(success(0, "firestore", "document.get", json!({"exists": true})), 10),
        timed(failure(1, "firestore", "document.update", "not found"), 30),
    ])
    .write(&dir.path().join("capture_a.json"))
    .unwrap();
    capture(vec![timed(
        success(0, "gemini", "generate_content", json!({"text": "hi"})),
        200,
    )])
    .write(&dir.path().join("capture_b.json"))
    .unwrap();
    std::fs::write(dir.path().join("notes.json"), "{}").unwrap();

    let analysis = analyze(dir.path(), 1);
    let report = analysis.report().unwrap();
    assert_eq!(report.files_analyzed, 2);
    assert_eq!(report.total_interactions, 3);
    assert_eq!(report.total_duration_ms, 240.0);
    assert_eq!(report.average_duration_ms, 80.0);

    let firestore = &report.services["firestore"];
    assert_eq!(firestore.count, 2);
    assert_eq!(firestore.errors, 1);
    assert_eq!(firestore.average_duration_ms, 20.0);
    assert_eq!(firestore.operations["document.update"], 1);

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].error, "not found");
    assert_eq!(report.slowest[0].service, "gemini");
    assert_eq!(report.fastest[0].operation, "document.get");
}

#[test]
fn rankings_keep_five_calls() {
    let interactions: Vec<_> = (0..8)
        .map(|i| timed(success(i, "s", &format!("op{i}"), json!(1)), i * 10 + 1))
        .collect();
    let report = analyze_interactions(1, &interactions);
    assert_eq!(report.fastest.len(), RANKED_CALLS);
    assert_eq!(report.slowest.len(), RANKED_CALLS);
    assert_eq!(report.fastest[0].operation, "op0");
    assert_eq!(report.slowest[0].operation, "op7");
    assert_eq!(report.slowest[4].operation, "op3");
}

#[test]
fn unreadable_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("capture_good.json");
    let bad = dir.path().join("capture_bad.json");
    capture(vec![success(0, "s", "op", json!(1))])
        .write(&good)
        .unwrap();
    std::fs::write(&bad, "garbage").unwrap();

    let analysis = analyze_files(&[bad, good]);
    let report = analysis.report().unwrap();
    assert_eq!(report.files_analyzed, 1);
    assert_eq!(report.total_interactions, 1);
}

#[test]
fn cutoff_excludes_old_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture_old.json");
    capture(Vec::new()).write(&path).unwrap();
    let old = SystemTime::now() - Duration::from_secs(3 * 24 * 60 * 60);
    std::fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(old)
        .unwrap();

    assert!(capture_files_since(dir.path(), SystemTime::now() - Duration::from_secs(86_400)).is_empty());
    assert_eq!(analyze(dir.path(), 5).report().unwrap().files_analyzed, 1);
}
