// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recording proxies around the wrapped service clients.
//!
//! A proxy implements the same contract as the client it wraps. Intercepted
//! operations are recorded through a shared [`CaptureManager`]; everything
//! else is forwarded untouched.
//!
//! [`CaptureManager`]: mockprobe_capture::CaptureManager

mod generation;
mod store;

pub use generation::{GenerationProxy, PROMPT_PREVIEW_LEN, TEXT_PREVIEW_LEN};
pub use store::{StoreOperation, StoreProxy, StoreResponse};

/// Service name recorded for document store calls
pub const STORE_SERVICE: &str = "firestore";
/// Service name recorded for generation calls
pub const GENERATION_SERVICE: &str = "gemini";

/// First `max` characters of `text`, marked when cut
fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;
