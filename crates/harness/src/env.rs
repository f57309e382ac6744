// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by mockprobe are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;

/// `MOCKPROBE_PROVIDER`: provider mode, one of `mock`, `real`, `capture`.
pub fn provider_mode() -> Option<String> {
    var_non_empty(names::MOCKPROBE_PROVIDER)
}

/// `MOCKPROBE_CAPTURE_DIR`: Directory capture files are written to.
pub fn capture_dir() -> Option<PathBuf> {
    var_non_empty(names::MOCKPROBE_CAPTURE_DIR).map(PathBuf::from)
}

/// `MOCKPROBE_PROJECT_ID`: Document store project id.
pub fn project_id() -> Option<String> {
    var_non_empty(names::MOCKPROBE_PROJECT_ID)
}

/// `MOCKPROBE_CLEANUP_COLLECTIONS`: Comma-separated collections purged on cleanup.
pub fn cleanup_collections() -> Option<Vec<String>> {
    var_non_empty(names::MOCKPROBE_CLEANUP_COLLECTIONS).map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
}

/// `GEMINI_API_KEY`: Credential for the live generation client.
pub fn generation_api_key() -> Option<String> {
    var_non_empty(names::GEMINI_API_KEY)
}

fn var_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
