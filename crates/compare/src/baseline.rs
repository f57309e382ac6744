// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Baseline synthesis from captured real traffic.
//!
//! A baseline maps `service.operation` keys to a raw response value and can
//! be passed straight to [`compare`](crate::compare::compare).

use crate::error::AnalysisError;
use mockprobe_capture::CaptureFile;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping of `service.operation` to canned response
pub type Baseline = BTreeMap<String, Value>;

/// Which successful response represents an operation
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum BaselineStrategy {
    /// Keep the first successful response seen
    #[default]
    FirstWins,
    /// Keep the last successful response seen
    LastWins,
}

/// Build a baseline from a capture file.
///
/// Only successful interactions with a non-empty response contribute.
/// Returns the mapping and the number of keys it holds.
pub fn synthesize_baseline(capture: &CaptureFile, strategy: BaselineStrategy) -> (Baseline, usize) {
    let mut baseline = Baseline::new();
    for interaction in &capture.interactions {
        let Some(response) = interaction.meaningful_response() else {
            continue;
        };
        let key = interaction.key();
        match strategy {
            BaselineStrategy::FirstWins => {
                baseline.entry(key).or_insert_with(|| response.clone());
            }
            BaselineStrategy::LastWins => {
                baseline.insert(key, response.clone());
            }
        }
    }
    let count = baseline.len();
    (baseline, count)
}

/// Counts from merging a synthesized baseline into an existing one
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
}

/// Overlay `update` onto `base`; entries in `update` replace existing ones
pub fn merge_baseline(base: &mut Baseline, update: Baseline) -> MergeStats {
    let mut stats = MergeStats::default();
    for (key, value) in update {
        match base.insert(key, value.clone()) {
            None => stats.added += 1,
            Some(previous) if previous != value => stats.updated += 1,
            Some(_) => {}
        }
    }
    stats
}

pub fn load_baseline(path: &Path) -> Result<Baseline, AnalysisError> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AnalysisError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty JSON for a baseline file
pub fn baseline_to_json(baseline: &Baseline) -> String {
    serde_json::to_string_pretty(baseline).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
#[path = "baseline_tests.rs"]
mod tests;
