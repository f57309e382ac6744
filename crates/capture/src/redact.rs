// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive redaction of sensitive values before anything is persisted.
//!
//! Keys are matched case-insensitively. A key is sensitive when it contains one
//! of [`SENSITIVE_SUBSTRINGS`], ends with `_key`, or starts with `key_`. The
//! value under a sensitive key is replaced wholesale with [`REDACTED`]; every
//! other value keeps its shape.

use serde::Serialize;
use serde_json::{Map, Value};

/// Marker written in place of a redacted value.
pub const REDACTED: &str = "[REDACTED]";

/// Key substrings that always trigger redaction.
pub const SENSITIVE_SUBSTRINGS: &[&str] = &[
    "password",
    "secret",
    "token",
    "api_key",
    "auth_key",
    "private_key",
];

/// Check whether a mapping key names a sensitive value.
pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_SUBSTRINGS.iter().any(|s| key.contains(s))
        || key.ends_with("_key")
        || key.starts_with("key_")
}

/// Redact a JSON value tree, returning a scrubbed copy.
pub fn redact_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(redact_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        other => other.clone(),
    }
}

/// Redact any serializable value.
///
/// Structs are first converted to their field mapping. A value that cannot be
/// represented as JSON is recorded as `null`.
pub fn redact<T: Serialize + ?Sized>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(v) => redact_value(&v),
        Err(e) => {
            tracing::debug!(error = %e, "value not representable as JSON, recording null");
            Value::Null
        }
    }
}

fn redact_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            let redacted = if is_sensitive_key(key) {
                Value::String(REDACTED.to_string())
            } else {
                redact_value(value)
            };
            (key.clone(), redacted)
        })
        .collect()
}

#[cfg(test)]
#[path = "redact_tests.rs"]
mod tests;
