// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Retention cleanup for capture directories.

use crate::file::CAPTURE_FILE_PREFIX;
use std::path::Path;
use std::time::{Duration, SystemTime};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Delete capture files older than `days`.
///
/// Only regular files whose name starts with `capture_` are considered. A
/// missing directory is not an error. Returns the number of files removed.
pub fn cleanup_old_captures(dir: &Path, days: u64) -> std::io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }
    let max_age = Duration::from_secs(days.saturating_mul(SECS_PER_DAY));
    let now = SystemTime::now();

    let mut removed = 0;
    for entry in std::fs::read_dir(dir)?.filter_map(|e| e.ok()) {
        let path = entry.path();
        let is_capture = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(CAPTURE_FILE_PREFIX));
        if !is_capture || !path.is_file() || !is_older_than(&path, now, max_age) {
            continue;
        }
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "removed expired capture");
        removed += 1;
    }
    Ok(removed)
}

fn is_older_than(path: &Path, now: SystemTime, max_age: Duration) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    let Ok(modified) = meta.modified() else {
        return false;
    };
    let Ok(age) = now.duration_since(modified) else {
        return false;
    };
    age > max_age
}

#[cfg(test)]
#[path = "retention_tests.rs"]
mod tests;
