// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture analysis and mock comparison utilities for mockprobe.
//!
//! Reads capture files written by `mockprobe-capture`, aggregates call
//! statistics, diffs real responses against mock baselines and synthesizes
//! new baselines from real traffic.

pub mod analyze;
pub mod baseline;
pub mod compare;
pub mod diff;
mod error;
pub mod report;

pub use analyze::{analyze, analyze_files, capture_files_since, Analysis, CaptureAnalysis};
pub use baseline::{synthesize_baseline, Baseline, BaselineStrategy};
pub use compare::{compare, compare_file, ComparisonResult, MissingMock};
pub use diff::{diff, DiffOutcome, Difference, DifferenceKind};
pub use error::AnalysisError;
pub use report::{render_comparison, render_report};

#[cfg(test)]
mod test_support;
