// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured interaction data types.

use super::{duration_serde, timestamp_serde};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use std::time::Duration;

/// One recorded call to a wrapped dependency
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Id assigned when the interaction was opened
    pub id: u64,

    /// Wall-clock time the interaction was opened
    #[serde(deserialize_with = "timestamp_serde::deserialize")]
    pub timestamp: DateTime<Utc>,

    /// Service name (e.g. "firestore", "gemini")
    pub service: String,

    /// Operation name (e.g. "document.get")
    pub operation: String,

    /// Redacted request payload
    pub request: Value,

    /// Redacted response payload, present only on success
    ///
    /// A written `null` reads back as `Some(Value::Null)`; only an absent
    /// field is `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub response: Option<Value>,

    pub status: InteractionStatus,

    /// Error message, present only on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error kind, present only on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    /// Time spent in the wrapped call
    #[serde(rename = "duration_ms", with = "duration_serde")]
    pub duration: Duration,
}

impl Interaction {
    /// The `service.operation` key used by baselines
    pub fn key(&self) -> String {
        format!("{}.{}", self.service, self.operation)
    }

    pub fn is_success(&self) -> bool {
        self.status == InteractionStatus::Success
    }

    /// Duration in fractional milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }

    /// Response if the call succeeded with a non-empty payload.
    ///
    /// `null`, `""`, `[]` and `{}` all count as empty.
    pub fn meaningful_response(&self) -> Option<&Value> {
        if !self.is_success() {
            return None;
        }
        self.response.as_ref().filter(|v| !is_empty_value(v))
    }
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Final status of an interaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStatus {
    Success,
    Error,
}

/// Errors that can be recorded as a failed interaction.
///
/// The default kind is the short type name of the error. Error enums override
/// it to report their variant.
pub trait FailureKind: Display {
    fn failure_kind(&self) -> String {
        short_type_name::<Self>()
    }
}

impl FailureKind for std::io::Error {
    fn failure_kind(&self) -> String {
        format!("{:?}", self.kind())
    }
}

impl FailureKind for serde_json::Error {}

impl FailureKind for String {
    fn failure_kind(&self) -> String {
        "Error".to_string()
    }
}

/// Type name without its module path (`a::b::Thing<c::D>` becomes `Thing`).
pub fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod tests;
