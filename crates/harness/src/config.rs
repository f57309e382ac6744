// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration loaded from TOML and overlaid with the environment.

use crate::env;
use crate::provider::ProviderError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of documents deleted per cleanup batch
pub const DEFAULT_CLEANUP_BATCH_SIZE: usize = 100;
/// Default model reported by generation clients
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.5-flash";

fn default_capture_dir() -> PathBuf {
    mockprobe_capture::default_capture_dir()
}

fn default_cleanup_batch_size() -> usize {
    DEFAULT_CLEANUP_BATCH_SIZE
}

fn default_generation_model() -> String {
    DEFAULT_GENERATION_MODEL.to_string()
}

/// Settings shared by every provider
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Provider mode (`mock`, `real`, `capture`); unset means `mock`
    #[serde(default)]
    pub mode: Option<String>,

    /// Where capture files are written
    #[serde(default = "default_capture_dir")]
    pub capture_dir: PathBuf,

    /// Credential required by real generation clients
    #[serde(default)]
    pub generation_api_key: Option<String>,

    /// Document store project id
    #[serde(default)]
    pub project_id: Option<String>,

    /// Collections purged by real-provider cleanup
    #[serde(default)]
    pub cleanup_collections: Vec<String>,

    /// Documents deleted per cleanup batch
    #[serde(default = "default_cleanup_batch_size")]
    pub cleanup_batch_size: usize,

    /// Model name used by generation clients
    #[serde(default = "default_generation_model")]
    pub generation_model: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            mode: None,
            capture_dir: default_capture_dir(),
            generation_api_key: None,
            project_id: None,
            cleanup_collections: Vec::new(),
            cleanup_batch_size: DEFAULT_CLEANUP_BATCH_SIZE,
            generation_model: default_generation_model(),
        }
    }
}

impl HarnessConfig {
    /// Defaults overlaid with environment variables
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Load a TOML file, then overlay environment variables
    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content).map(Self::with_env)
    }

    /// Parse TOML without consulting the environment
    pub fn parse(content: &str) -> Result<Self, ProviderError> {
        toml::from_str(content)
            .map_err(|e| ProviderError::Configuration(format!("invalid harness config: {}", e)))
    }

    /// Replace fields that have a non-empty environment override
    pub fn with_env(mut self) -> Self {
        if let Some(mode) = env::provider_mode() {
            self.mode = Some(mode);
        }
        if let Some(dir) = env::capture_dir() {
            self.capture_dir = dir;
        }
        if let Some(key) = env::generation_api_key() {
            self.generation_api_key = Some(key);
        }
        if let Some(project) = env::project_id() {
            self.project_id = Some(project);
        }
        if let Some(collections) = env::cleanup_collections() {
            self.cleanup_collections = collections;
        }
        self
    }

    /// Builder-style mode override
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Builder-style capture directory override
    pub fn with_capture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.capture_dir = dir.into();
        self
    }

    /// Builder-style API key override
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.generation_api_key = Some(key.into());
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
