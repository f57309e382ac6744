// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Generation client proxy.

use super::{preview, GENERATION_SERVICE};
use crate::generation::{Generation, GenerationClient, GenerationError, GenerationOptions};
use async_trait::async_trait;
use mockprobe_capture::CaptureManager;
use serde_json::{json, Value};
use std::sync::Arc;

/// Characters of the prompt kept in the recorded request
pub const PROMPT_PREVIEW_LEN: usize = 200;
/// Characters of the generated text kept in the recorded response
pub const TEXT_PREVIEW_LEN: usize = 500;

const GENERATE_CONTENT: &str = "generate_content";

/// Recording wrapper around a [`GenerationClient`]
///
/// Only `generate_content` is recorded; `model` and `count_tokens` are
/// forwarded as is.
#[derive(Clone)]
pub struct GenerationProxy {
    inner: Arc<dyn GenerationClient>,
    manager: CaptureManager,
}

impl GenerationProxy {
    pub fn new(inner: Arc<dyn GenerationClient>, manager: CaptureManager) -> Self {
        Self { inner, manager }
    }

    pub fn manager(&self) -> &CaptureManager {
        &self.manager
    }
}

fn request_summary(prompt: &str, options: &GenerationOptions) -> Value {
    json!({
        "prompt_preview": preview(prompt, PROMPT_PREVIEW_LEN),
        "prompt_length": prompt.chars().count(),
        "options": options,
    })
}

// Usage keys avoid the word "token" so redaction keeps the counts.
fn response_summary(generation: &Generation) -> Value {
    let usage = generation.usage.map(|u| {
        json!({
            "prompt": u.prompt_tokens,
            "candidates": u.candidates_tokens,
            "total": u.total_tokens,
        })
    });
    json!({
        "text_preview": preview(&generation.text, TEXT_PREVIEW_LEN),
        "text_length": generation.text.chars().count(),
        "finish_reason": generation.finish_reason,
        "usage": usage,
        "model": generation.model,
    })
}

#[async_trait]
impl GenerationClient for GenerationProxy {
    fn model(&self) -> String {
        self.inner.model()
    }

    async fn generate_content(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Generation, GenerationError> {
        self.manager
            .record(
                GENERATION_SERVICE,
                GENERATE_CONTENT,
                request_summary(prompt, options),
                self.inner.generate_content(prompt, options),
                response_summary,
            )
            .await
    }

    async fn count_tokens(&self, text: &str) -> Result<u32, GenerationError> {
        self.inner.count_tokens(text).await
    }
}
