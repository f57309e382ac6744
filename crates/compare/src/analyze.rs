// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate statistics over a window of capture files.

use chrono::{DateTime, Utc};
use mockprobe_capture::{CaptureFile, Interaction, CAPTURE_FILE_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// How many calls the fastest and slowest lists keep
pub const RANKED_CALLS: usize = 5;

/// Message reported when the window holds no capture files
pub const NO_FILES_FOUND: &str = "no files found";

/// Per-service statistics
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub count: usize,
    pub operations: BTreeMap<String, usize>,
    pub average_duration_ms: f64,
    pub errors: usize,
}

/// One call in the fastest/slowest rankings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedCall {
    pub service: String,
    pub operation: String,
    pub duration_ms: f64,
    pub timestamp: DateTime<Utc>,
}

/// One failed call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub service: String,
    pub operation: String,
    pub error: String,
    pub error_type: String,
    pub timestamp: DateTime<Utc>,
}

/// Statistics over every interaction in the analyzed files
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureAnalysis {
    pub files_analyzed: usize,
    pub total_interactions: usize,
    pub services: BTreeMap<String, ServiceStats>,
    pub total_duration_ms: f64,
    pub average_duration_ms: f64,
    pub fastest: Vec<TimedCall>,
    pub slowest: Vec<TimedCall>,
    pub errors: Vec<ErrorRecord>,
}

/// Result of an analysis run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Analysis {
    Report(CaptureAnalysis),
    NoFiles { error: String },
}

impl Analysis {
    fn no_files() -> Self {
        Self::NoFiles {
            error: NO_FILES_FOUND.to_string(),
        }
    }

    pub fn report(&self) -> Option<&CaptureAnalysis> {
        match self {
            Self::Report(report) => Some(report),
            Self::NoFiles { .. } => None,
        }
    }
}

/// Capture files in `dir` modified at or after `cutoff`, sorted by name.
///
/// An unreadable or missing directory yields no files.
pub fn capture_files_since(dir: &Path, cutoff: SystemTime) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .into_iter()
        .flatten()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(CAPTURE_FILE_PREFIX) && n.ends_with(".json"))
        })
        .filter(|p| {
            std::fs::metadata(p)
                .and_then(|m| m.modified())
                .is_ok_and(|modified| modified >= cutoff)
        })
        .collect();
    files.sort();
    files
}

/// Analyze the capture files written in the last `days_back` days.
pub fn analyze(capture_dir: &Path, days_back: u64) -> Analysis {
    let window = Duration::from_secs(days_back.saturating_mul(24 * 60 * 60));
    let cutoff = SystemTime::now()
        .checked_sub(window)
        .unwrap_or(SystemTime::UNIX_EPOCH);
    analyze_files(&capture_files_since(capture_dir, cutoff))
}

/// Analyze an explicit list of capture files.
///
/// Files that fail to load are logged, skipped and left out of
/// `files_analyzed`.
pub fn analyze_files(files: &[PathBuf]) -> Analysis {
    if files.is_empty() {
        return Analysis::no_files();
    }

    let mut interactions = Vec::new();
    let mut loaded = 0;
    for path in files {
        match CaptureFile::load(path) {
            Ok(capture) => {
                loaded += 1;
                interactions.extend(capture.interactions);
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable capture"),
        }
    }
    Analysis::Report(analyze_interactions(loaded, &interactions))
}

/// Aggregate a flat list of interactions
pub fn analyze_interactions(files_analyzed: usize, interactions: &[Interaction]) -> CaptureAnalysis {
    let mut analysis = CaptureAnalysis {
        files_analyzed,
        total_interactions: interactions.len(),
        ..CaptureAnalysis::default()
    };

    for interaction in interactions {
        let duration = interaction.duration_ms();
        let stats = analysis
            .services
            .entry(interaction.service.clone())
            .or_default();
        stats.count += 1;
        *stats
            .operations
            .entry(interaction.operation.clone())
            .or_default() += 1;
        stats.average_duration_ms += (duration - stats.average_duration_ms) / stats.count as f64;

        analysis.total_duration_ms += duration;

        if !interaction.is_success() {
            stats.errors += 1;
            analysis.errors.push(ErrorRecord {
                service: interaction.service.clone(),
                operation: interaction.operation.clone(),
                error: interaction.error.clone().unwrap_or_default(),
                error_type: interaction.error_type.clone().unwrap_or_default(),
                timestamp: interaction.timestamp,
            });
        }
    }

    if !interactions.is_empty() {
        analysis.average_duration_ms = analysis.total_duration_ms / interactions.len() as f64;
    }

    let mut ranked: Vec<TimedCall> = interactions
        .iter()
        .map(|i| TimedCall {
            service: i.service.clone(),
            operation: i.operation.clone(),
            duration_ms: i.duration_ms(),
            timestamp: i.timestamp,
        })
        .collect();
    ranked.sort_by(|a, b| a.duration_ms.total_cmp(&b.duration_ms));
    analysis.fastest = ranked.iter().take(RANKED_CALLS).cloned().collect();
    analysis.slowest = ranked.iter().rev().take(RANKED_CALLS).cloned().collect();

    analysis
}

#[cfg(test)]
#[path = "analyze_tests.rs"]
mod tests;
