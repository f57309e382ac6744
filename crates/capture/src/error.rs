// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture error types.

use thiserror::Error;

/// Errors raised by capture bookkeeping.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Capture file could not be read or written.
    #[error("capture I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Capture file could not be encoded or decoded.
    #[error("capture serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No interaction with this id was ever opened.
    #[error("unknown interaction id: {0}")]
    UnknownInteraction(u64),

    /// The interaction was already finalized as a failure.
    #[error("interaction {0} already finalized with an error")]
    AlreadyFailed(u64),
}
