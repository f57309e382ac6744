// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Providers: bundles of service clients behind one contract.
//!
//! - [`MockProvider`]: in-memory backends, no network, no capture
//! - [`RealProvider`]: live clients built lazily from injected drivers
//! - [`CaptureProvider`]: the real provider with every client wrapped in a
//!   recording proxy

mod capture;
mod context;
mod mock;
mod real;
mod select;

pub use capture::CaptureProvider;
pub use context::{current, ProviderContext};
pub use mock::MockProvider;
pub use real::{Driver, Drivers, RealProvider};
pub use select::{select, select_from_env};

use crate::auth::AuthService;
use crate::generation::GenerationClient;
use crate::store::DocumentStore;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while selecting or using a provider.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Invalid mode or missing credentials; raised at selection time
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No live client is available for a capability; raised on first use
    #[error("dependency unavailable: no driver for {capability}")]
    Dependency { capability: String },

    #[error("cleanup failed: {0}")]
    Cleanup(String),
}

/// Which provider to build
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProviderMode {
    #[default]
    Mock,
    Real,
    Capture,
}

impl ProviderMode {
    pub const ALL: [ProviderMode; 3] = [Self::Mock, Self::Real, Self::Capture];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Real => "real",
            Self::Capture => "capture",
        }
    }
}

impl fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderMode {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| {
                ProviderError::Configuration(format!(
                    "invalid provider mode '{}'; expected one of: mock, real, capture",
                    s
                ))
            })
    }
}

/// Common contract of every provider.
///
/// Getters may fail with [`ProviderError::Dependency`] when the backing
/// client cannot be built. `cleanup` is idempotent, never fails, and is safe
/// on a provider that was never used.
#[async_trait]
pub trait Provider: Send + Sync {
    fn mode(&self) -> ProviderMode;

    /// Whether calls reach live services
    fn is_real_service(&self) -> bool;

    fn get_document_store(&self) -> Result<Arc<dyn DocumentStore>, ProviderError>;

    fn get_generation_client(&self) -> Result<Arc<dyn GenerationClient>, ProviderError>;

    fn get_auth(&self) -> Result<Arc<dyn AuthService>, ProviderError>;

    /// Release resources and remove test-scoped writes
    async fn cleanup(&self);
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
