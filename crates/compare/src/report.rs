// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown rendering of analysis and comparison results.

use crate::analyze::{Analysis, CaptureAnalysis, TimedCall};
use crate::compare::ComparisonResult;

/// Render a capture analysis as Markdown
pub fn render_report(analysis: &Analysis) -> String {
    let mut md = String::new();
    md.push_str("# Capture Analysis Report\n\n");

    let report = match analysis {
        Analysis::Report(report) => report,
        Analysis::NoFiles { error } => {
            md.push_str(&format!("No capture data: {}\n", error));
            return md;
        }
    };

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- Files analyzed: {}\n", report.files_analyzed));
    md.push_str(&format!("- Total interactions: {}\n", report.total_interactions));
    md.push_str(&format!("- Total duration: {:.2} ms\n", report.total_duration_ms));
    md.push_str(&format!(
        "- Average duration: {:.2} ms\n",
        report.average_duration_ms
    ));
    md.push_str(&format!("- Errors: {}\n", report.errors.len()));
    md.push('\n');

    render_services(report, &mut md);
    render_ranked("Slowest Operations", &report.slowest, &mut md);

    if !report.errors.is_empty() {
        md.push_str("## Errors\n\n");
        for error in &report.errors {
            md.push_str(&format!(
                "- `{}.{}` ({}): {}\n",
                error.service, error.operation, error.error_type, error.error
            ));
        }
        md.push('\n');
    }

    md
}

fn render_services(report: &CaptureAnalysis, md: &mut String) {
    md.push_str("## Services\n\n");
    for (name, stats) in &report.services {
        md.push_str(&format!("### {}\n\n", name));
        md.push_str(&format!("- Calls: {}\n", stats.count));
        md.push_str(&format!("- Errors: {}\n", stats.errors));
        md.push_str(&format!(
            "- Average duration: {:.2} ms\n\n",
            stats.average_duration_ms
        ));
        md.push_str("| Operation | Calls |\n");
        md.push_str("|-----------|-------|\n");
        for (operation, count) in &stats.operations {
            md.push_str(&format!("| `{}` | {} |\n", operation, count));
        }
        md.push('\n');
    }
}

fn render_ranked(title: &str, calls: &[TimedCall], md: &mut String) {
    if calls.is_empty() {
        return;
    }
    md.push_str(&format!("## {}\n\n", title));
    md.push_str("| # | Operation | Duration (ms) |\n");
    md.push_str("|---|-----------|---------------|\n");
    for (i, call) in calls.iter().enumerate() {
        md.push_str(&format!(
            "| {} | `{}.{}` | {:.2} |\n",
            i + 1,
            call.service,
            call.operation,
            call.duration_ms
        ));
    }
    md.push('\n');
}

/// Render a mock comparison as Markdown
pub fn render_comparison(result: &ComparisonResult) -> String {
    let mut md = String::new();
    md.push_str("# Mock Accuracy Report\n\n");

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- Comparisons: {}\n", result.total_comparisons));
    md.push_str(&format!("- Matches: {}\n", result.matches));
    md.push_str(&format!("- Mismatches: {}\n", result.mismatches()));
    md.push_str(&format!(
        "- Accuracy: {:.1}%\n",
        result.accuracy_score * 100.0
    ));
    md.push_str(&format!("- Missing mocks: {}\n", result.missing_mocks.len()));
    md.push('\n');

    if !result.differences.is_empty() {
        md.push_str("## Differences\n\n");
        md.push_str("| Operation | Path | Kind | Real | Mock |\n");
        md.push_str("|-----------|------|------|------|------|\n");
        for entry in &result.differences {
            let d = &entry.difference;
            let kind = match d.similarity {
                Some(ratio) => format!("{} ({:.0}% similar)", d.kind, ratio * 100.0),
                None => d.kind.to_string(),
            };
            md.push_str(&format!(
                "| `{}` | `{}` | {} | {} | {} |\n",
                entry.key,
                d.display_path(),
                kind,
                cell(d.real.as_deref()),
                cell(d.mock.as_deref()),
            ));
        }
        md.push('\n');
    }

    if !result.missing_mocks.is_empty() {
        md.push_str("## Missing Mocks\n\n");
        for missing in &result.missing_mocks {
            md.push_str(&format!(
                "- `{}` (interaction {}): {}\n",
                missing.key,
                missing.interaction_id,
                cell(Some(&missing.real_sample))
            ));
        }
        md.push('\n');
    }

    md
}

/// Escape a sample for a Markdown table cell
fn cell(text: Option<&str>) -> String {
    match text {
        Some(t) => t.replace('|', "\\|").replace('\n', " "),
        None => "-".to_string(),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
