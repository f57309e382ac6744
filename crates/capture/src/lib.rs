// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interaction capture and recording for mock fidelity checks.
//!
//! This crate records every call made through an instrumented service client,
//! scrubs secrets from the recorded payloads and persists the result as a
//! portable JSON capture file that the comparison tooling can replay against
//! mock baselines.

mod duration_serde;
mod error;
mod file;
mod interaction;
mod log;
mod manager;
pub mod redact;
mod retention;
mod summary;
mod timestamp_serde;

pub use error::CaptureError;
pub use file::{capture_file_name, default_capture_dir, CaptureFile, CAPTURE_FILE_PREFIX};
pub use interaction::{short_type_name, FailureKind, Interaction, InteractionStatus};
pub use log::{InteractionLog, ResponseSlot};
pub use manager::{CaptureManager, InteractionGuard, CANCELLED_KIND};
pub use redact::{redact, redact_value, REDACTED};
pub use retention::cleanup_old_captures;
pub use summary::{CaptureSummary, ServiceSummary};
