// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive structural diff between a real response and a mock response.
//!
//! Paths are dotted for object keys and bracketed for array indices
//! (`docs[0].data.title`). The root itself has an empty path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use similar::TextDiff;
use std::fmt;

/// Maximum characters kept in a value sample
pub const SAMPLE_LEN: usize = 100;

/// Coarse kind of a JSON value.
///
/// Integers and floats are distinct kinds, so `1` and `1.0` are a type
/// mismatch rather than a value mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// Kind of divergence between real and mock
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    TypeMismatch,
    ValueMismatch,
    LengthMismatch,
    MissingKeyInMock,
    ExtraKeyInMock,
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TypeMismatch => "type_mismatch",
            Self::ValueMismatch => "value_mismatch",
            Self::LengthMismatch => "length_mismatch",
            Self::MissingKeyInMock => "missing_key_in_mock",
            Self::ExtraKeyInMock => "extra_key_in_mock",
        };
        f.write_str(name)
    }
}

/// A single divergence located by path
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    pub kind: DifferenceKind,
    pub path: String,
    /// Truncated sample of the real side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real: Option<String>,
    /// Truncated sample of the mock side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock: Option<String>,
    /// Character similarity (0..1) for string value mismatches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

impl Difference {
    fn new(kind: DifferenceKind, path: &str, real: Option<&Value>, mock: Option<&Value>) -> Self {
        Self {
            kind,
            path: path.to_string(),
            real: real.map(sample),
            mock: mock.map(sample),
            similarity: None,
        }
    }

    /// Path for display; the root is shown as `$`
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "$"
        } else {
            &self.path
        }
    }
}

/// Result of diffing two values
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffOutcome {
    pub is_match: bool,
    pub differences: Vec<Difference>,
}

/// Diff a real value against a mock value.
///
/// Never fails: mismatched shapes are reported as differences.
pub fn diff(real: &Value, mock: &Value) -> DiffOutcome {
    let mut differences = Vec::new();
    diff_at(real, mock, "", &mut differences);
    DiffOutcome {
        is_match: differences.is_empty(),
        differences,
    }
}

fn diff_at(real: &Value, mock: &Value, path: &str, out: &mut Vec<Difference>) {
    if ValueKind::of(real) != ValueKind::of(mock) {
        out.push(Difference::new(
            DifferenceKind::TypeMismatch,
            path,
            Some(real),
            Some(mock),
        ));
        return;
    }

    match (real, mock) {
        (Value::Object(r), Value::Object(m)) => {
            for (key, value) in r.iter().filter(|(k, _)| !m.contains_key(*k)) {
                out.push(Difference::new(
                    DifferenceKind::MissingKeyInMock,
                    &key_path(path, key),
                    Some(value),
                    None,
                ));
            }
            for (key, value) in m.iter().filter(|(k, _)| !r.contains_key(*k)) {
                out.push(Difference::new(
                    DifferenceKind::ExtraKeyInMock,
                    &key_path(path, key),
                    None,
                    Some(value),
                ));
            }
            for (key, r_value) in r {
                if let Some(m_value) = m.get(key) {
                    diff_at(r_value, m_value, &key_path(path, key), out);
                }
            }
        }
        (Value::Array(r), Value::Array(m)) => {
            if r.len() != m.len() {
                out.push(Difference {
                    kind: DifferenceKind::LengthMismatch,
                    path: path.to_string(),
                    real: Some(r.len().to_string()),
                    mock: Some(m.len().to_string()),
                    similarity: None,
                });
            }
            for (i, (r_item, m_item)) in r.iter().zip(m).enumerate() {
                diff_at(r_item, m_item, &format!("{path}[{i}]"), out);
            }
        }
        _ if real != mock => {
            let mut difference =
                Difference::new(DifferenceKind::ValueMismatch, path, Some(real), Some(mock));
            if let (Value::String(r), Value::String(m)) = (real, mock) {
                difference.similarity = Some(TextDiff::from_chars(r, m).ratio());
            }
            out.push(difference);
        }
        _ => {}
    }
}

fn key_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Textual sample of a value, truncated to [`SAMPLE_LEN`] characters
pub fn sample(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    truncate(&text, SAMPLE_LEN)
}

/// Truncate on a character boundary, marking the cut with `...`
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
