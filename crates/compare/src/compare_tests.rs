// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::diff::DifferenceKind;
use crate::test_support::{capture, failure, success};
use proptest::prelude::*;
use serde_json::json;

fn baseline(entries: &[(&str, serde_json::Value)]) -> Baseline {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn exact_match_scores_full_accuracy() {
    let file = capture(vec![success(0, "firestore", "get", json!({"docs": []}))]);
    let result = compare(&file, &baseline(&[("firestore.get", json!({"docs": []}))]));
    assert_eq!(result.total_comparisons, 1);
    assert_eq!(result.matches, 1);
    assert_eq!(result.accuracy_score, 1.0);
    assert!(result.differences.is_empty());
}

#[test]
fn missing_baseline_entry_is_not_counted() {
    let file = capture(vec![
        success(0, "firestore", "get", json!({"docs": []})),
        success(1, "gemini", "generate_content", json!({"text": "hi"})),
    ]);
    let result = compare(&file, &baseline(&[("firestore.get", json!({"docs": []}))]));
    assert_eq!(result.missing_mocks.len(), 1);
    assert_eq!(result.missing_mocks[0].key, "gemini.generate_content");
    assert_eq!(result.missing_mocks[0].interaction_id, 1);
    assert_eq!(result.total_comparisons, 1);
}

#[test]
fn mismatches_carry_operation_and_path() {
    let file = capture(vec![success(
        3,
        "firestore",
        "document.get",
        json!({"exists": true, "data": {"n": 1}}),
    )]);
    let result = compare(
        &file,
        &baseline(&[("firestore.document.get", json!({"exists": true, "data": {"n": 2}}))]),
    );
    assert_eq!(result.total_comparisons, 1);
    assert_eq!(result.matches, 0);
    assert_eq!(result.accuracy_score, 0.0);
    assert_eq!(result.mismatches(), 1);
    let entry = &result.differences[0];
    assert_eq!(entry.key, "firestore.document.get");
    assert_eq!(entry.interaction_id, 3);
    assert_eq!(entry.difference.kind, DifferenceKind::ValueMismatch);
    assert_eq!(entry.difference.path, "data.n");
}

#[test]
fn failures_and_empty_responses_are_skipped() {
    let file = capture(vec![
        failure(0, "firestore", "get", "down"),
        success(1, "firestore", "get", json!({})),
        success(2, "firestore", "get", json!(null)),
    ]);
    let result = compare(&file, &baseline(&[("firestore.get", json!({"docs": []}))]));
    assert_eq!(result.total_comparisons, 0);
    assert!(result.missing_mocks.is_empty());
    assert_eq!(result.accuracy_score, 0.0);
}

#[test]
fn differences_serialize_flat() {
    let file = capture(vec![success(0, "s", "op", json!({"a": 1}))]);
    let result = compare(&file, &baseline(&[("s.op", json!({"a": "1"}))]));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["differences"][0]["kind"], "type_mismatch");
    assert_eq!(json["differences"][0]["key"], "s.op");
    assert_eq!(json["differences"][0]["path"], "a");
}

#[test]
fn compare_file_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture_1.json");
    capture(vec![success(0, "s", "op", json!([1]))])
        .write(&path)
        .unwrap();
    let result = compare_file(&path, &baseline(&[("s.op", json!([1]))])).unwrap();
    assert_eq!(result.matches, 1);
}

proptest! {
    #[test]
    fn accuracy_stays_in_unit_interval(values in prop::collection::vec((0u8..3, 0u8..3), 0..20)) {
        let interactions = values
            .iter()
            .enumerate()
            .map(|(i, (op, v))| success(i as u64, "s", &format!("op{op}"), json!({"v": v})))
            .collect();
        let base = baseline(&[("s.op0", json!({"v": 0})), ("s.op1", json!({"v": 1}))]);
        let result = compare(&capture(interactions), &base);
        prop_assert!((0.0..=1.0).contains(&result.accuracy_score));
        if result.total_comparisons == 0 {
            prop_assert_eq!(result.accuracy_score, 0.0);
        }
        prop_assert_eq!(
            result.total_comparisons + result.missing_mocks.len(),
            values.len()
        );
    }
}
