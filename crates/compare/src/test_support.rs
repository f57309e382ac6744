// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Builders for interactions and capture files used across unit tests.

use chrono::Utc;
use mockprobe_capture::{CaptureFile, Interaction, InteractionStatus};
use serde_json::{json, Value};
use std::time::Duration;

pub fn success(id: u64, service: &str, operation: &str, response: Value) -> Interaction {
    Interaction {
        id,
        timestamp: Utc::now(),
        service: service.to_string(),
        operation: operation.to_string(),
        request: json!({}),
        response: Some(response),
        status: InteractionStatus::Success,
        error: None,
        error_type: None,
        duration: Duration::from_millis(10),
    }
}

pub fn failure(id: u64, service: &str, operation: &str, message: &str) -> Interaction {
    Interaction {
        response: None,
        status: InteractionStatus::Error,
        error: Some(message.to_string()),
        error_type: Some("Backend".to_string()),
        ..success(id, service, operation, Value::Null)
    }
}

pub fn timed(mut interaction: Interaction, millis: u64) -> Interaction {
    interaction.duration = Duration::from_millis(millis);
    interaction
}

pub fn capture(interactions: Vec<Interaction>) -> CaptureFile {
    CaptureFile::new("test-session", interactions)
}
