// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison of captured real responses against a mock baseline.

use crate::baseline::Baseline;
use crate::diff::{diff, sample, Difference};
use crate::error::AnalysisError;
use mockprobe_capture::CaptureFile;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A difference tagged with the interaction it came from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationDifference {
    /// `service.operation` key
    pub key: String,
    pub interaction_id: u64,
    #[serde(flatten)]
    pub difference: Difference,
}

/// A real interaction with no baseline entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MissingMock {
    pub key: String,
    pub interaction_id: u64,
    /// Truncated sample of the real response
    pub real_sample: String,
}

/// Outcome of comparing a capture against a baseline
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub total_comparisons: usize,
    pub matches: usize,
    pub differences: Vec<OperationDifference>,
    pub missing_mocks: Vec<MissingMock>,
    pub accuracy_score: f64,
}

impl ComparisonResult {
    /// Matches over attempted comparisons, 0 when nothing was compared
    pub fn accuracy(&self) -> f64 {
        if self.total_comparisons == 0 {
            0.0
        } else {
            self.matches as f64 / self.total_comparisons as f64
        }
    }

    pub fn mismatches(&self) -> usize {
        self.total_comparisons - self.matches
    }
}

/// Compare each successful, non-empty real response with its baseline entry.
pub fn compare(capture: &CaptureFile, baseline: &Baseline) -> ComparisonResult {
    let mut result = ComparisonResult::default();

    for interaction in &capture.interactions {
        let Some(response) = interaction.meaningful_response() else {
            continue;
        };
        let key = interaction.key();
        let Some(expected) = baseline.get(&key) else {
            result.missing_mocks.push(MissingMock {
                key,
                interaction_id: interaction.id,
                real_sample: sample(response),
            });
            continue;
        };

        result.total_comparisons += 1;
        let outcome = diff(response, expected);
        if outcome.is_match {
            result.matches += 1;
        } else {
            result
                .differences
                .extend(outcome.differences.into_iter().map(|difference| {
                    OperationDifference {
                        key: key.clone(),
                        interaction_id: interaction.id,
                        difference,
                    }
                }));
        }
    }

    result.accuracy_score = result.accuracy();
    result
}

/// Load a capture file and compare it against a baseline
pub fn compare_file(path: &Path, baseline: &Baseline) -> Result<ComparisonResult, AnalysisError> {
    let capture = CaptureFile::load(path)?;
    Ok(compare(&capture, baseline))
}

#[cfg(test)]
#[path = "compare_tests.rs"]
mod tests;
