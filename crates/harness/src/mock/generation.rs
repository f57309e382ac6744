// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canned text generation.

use crate::config::DEFAULT_GENERATION_MODEL;
use crate::generation::{
    Generation, GenerationClient, GenerationError, GenerationOptions, TokenUsage,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Text returned when no rule matches
pub const DEFAULT_MOCK_TEXT: &str = "This is a mock response.";

const FINISH_REASON: &str = "STOP";

/// Generation client that answers from canned text
///
/// Rules are checked in insertion order; the first whose needle appears in
/// the prompt supplies the text.
#[derive(Debug)]
pub struct MockGenerationClient {
    model: String,
    default_text: String,
    rules: Vec<(String, String)>,
    calls: AtomicUsize,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            model: DEFAULT_GENERATION_MODEL.to_string(),
            default_text: DEFAULT_MOCK_TEXT.to_string(),
            rules: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Text returned for prompts no rule matches
    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.default_text = text.into();
        self
    }

    /// Return `text` for prompts containing `needle`
    pub fn with_rule(mut self, needle: impl Into<String>, text: impl Into<String>) -> Self {
        self.rules.push((needle.into(), text.into()));
        self
    }

    /// Number of `generate_content` calls served
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self, prompt: &str) -> &str {
        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, text)| text.as_str())
            .unwrap_or(&self.default_text)
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

fn word_count(text: &str) -> u32 {
    u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX)
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    fn model(&self) -> String {
        self.model.clone()
    }

    async fn generate_content(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Generation, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::InvalidRequest("prompt is empty".to_string()));
        }
        self.calls.fetch_add(1, Ordering::SeqCst);

        let text = self.respond(prompt).to_string();
        let prompt_tokens = word_count(prompt);
        let candidates_tokens = word_count(&text);
        Ok(Generation {
            text,
            finish_reason: Some(FINISH_REASON.to_string()),
            usage: Some(TokenUsage {
                prompt_tokens,
                candidates_tokens,
                total_tokens: prompt_tokens.saturating_add(candidates_tokens),
            }),
            model: Some(options.model.clone().unwrap_or_else(|| self.model.clone())),
        })
    }

    async fn count_tokens(&self, text: &str) -> Result<u32, GenerationError> {
        Ok(word_count(text))
    }
}

#[cfg(test)]
#[path = "generation_tests.rs"]
mod tests;
