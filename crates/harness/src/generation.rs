// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text generation client contract.

use async_trait::async_trait;
use mockprobe_capture::FailureKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by a generation backend.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: u64 },

    #[error("response blocked: {0}")]
    Blocked(String),

    #[error("generation backend unavailable: {0}")]
    Unavailable(String),
}

impl FailureKind for GenerationError {
    fn failure_kind(&self) -> String {
        match self {
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::Authentication(_) => "Authentication",
            Self::RateLimited { .. } => "RateLimited",
            Self::Blocked(_) => "Blocked",
            Self::Unavailable(_) => "Unavailable",
        }
        .to_string()
    }
}

/// Per-call generation options
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Token accounting reported with a completion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub candidates_tokens: u32,
    pub total_tokens: u32,
}

/// A completed generation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Text generation client
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Default model used when options do not name one
    fn model(&self) -> String;

    /// Generate a completion for a prompt
    async fn generate_content(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Generation, GenerationError>;

    /// Count tokens in a piece of text
    async fn count_tokens(&self, text: &str) -> Result<u32, GenerationError>;
}
