// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Authentication contract and the in-memory test double.

use async_trait::async_trait;
use mockprobe_capture::FailureKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Uid reported by [`MockAuth`] unless overridden
pub const MOCK_UID: &str = "test-user";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("auth backend unavailable: {0}")]
    Unavailable(String),
}

impl FailureKind for AuthError {
    fn failure_kind(&self) -> String {
        match self {
            Self::InvalidToken(_) => "InvalidToken",
            Self::Unavailable(_) => "Unavailable",
        }
        .to_string()
    }
}

/// Claims extracted from a verified id token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Verifies caller identity tokens
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn verify_id_token(&self, token: &str) -> Result<AuthClaims, AuthError>;
}

/// Accepts any non-empty token as a fixed test user
#[derive(Clone, Debug)]
pub struct MockAuth {
    uid: String,
}

impl MockAuth {
    pub fn new() -> Self {
        Self::with_uid(MOCK_UID)
    }

    pub fn with_uid(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthService for MockAuth {
    async fn verify_id_token(&self, token: &str) -> Result<AuthClaims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::InvalidToken("empty token".to_string()));
        }
        Ok(AuthClaims {
            uid: self.uid.clone(),
            email: Some(format!("{}@example.com", self.uid)),
        })
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
