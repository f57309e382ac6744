// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture file format.

use crate::error::CaptureError;
use crate::interaction::Interaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name prefix shared by every capture file
pub const CAPTURE_FILE_PREFIX: &str = "capture_";

/// Persisted snapshot of one capture session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureFile {
    pub session_id: String,
    /// Time the snapshot was taken
    #[serde(deserialize_with = "crate::timestamp_serde::deserialize")]
    pub timestamp: DateTime<Utc>,
    pub total_interactions: usize,
    pub interactions: Vec<Interaction>,
}

impl CaptureFile {
    /// Build a capture file stamped with the current time
    pub fn new(session_id: impl Into<String>, interactions: Vec<Interaction>) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            total_interactions: interactions.len(),
            interactions,
        }
    }

    /// Load a capture file from disk
    pub fn load(path: &Path) -> Result<Self, CaptureError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write as pretty JSON, creating parent directories as needed
    pub fn write(&self, path: &Path) -> Result<(), CaptureError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Generated name: `capture_<YYYYMMDD_HHMMSS>_<session_id>.json`
pub fn capture_file_name(at: DateTime<Utc>, session_id: &str) -> String {
    format!(
        "{}{}_{}.json",
        CAPTURE_FILE_PREFIX,
        at.format("%Y%m%d_%H%M%S"),
        session_id
    )
}

/// Capture directory used when nothing else is configured
pub fn default_capture_dir() -> PathBuf {
    std::env::temp_dir().join("mockprobe_captures")
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
