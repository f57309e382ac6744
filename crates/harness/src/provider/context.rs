// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared "current provider" slot.
//!
//! Test code that needs one provider across many calls holds a
//! [`ProviderContext`] and passes it around. [`current`] is the process-wide
//! instance for test bootstrap code only.

use super::{select, Drivers, Provider, ProviderError};
use crate::config::HarnessConfig;
use parking_lot::Mutex;
use std::sync::Arc;

/// Holds at most one provider with an explicit set/get/reset lifecycle
pub struct ProviderContext {
    current: Mutex<Option<Arc<dyn Provider>>>,
}

static CURRENT: ProviderContext = ProviderContext::new();

/// Process-wide context
pub fn current() -> &'static ProviderContext {
    &CURRENT
}

impl ProviderContext {
    pub const fn new() -> Self {
        Self {
            current: parking_lot::const_mutex(None),
        }
    }

    pub fn get(&self) -> Option<Arc<dyn Provider>> {
        self.current.lock().clone()
    }

    /// Install `provider`, returning the one it replaces without cleaning it up
    pub fn set(&self, provider: Arc<dyn Provider>) -> Option<Arc<dyn Provider>> {
        self.current.lock().replace(provider)
    }

    /// The held provider, selecting and installing one if the slot is empty
    pub fn get_or_select(
        &self,
        mode: Option<&str>,
        config: &HarnessConfig,
        drivers: Drivers,
    ) -> Result<Arc<dyn Provider>, ProviderError> {
        let mut current = self.current.lock();
        if let Some(provider) = current.as_ref() {
            return Ok(Arc::clone(provider));
        }
        let provider = select(mode, config, drivers)?;
        *current = Some(Arc::clone(&provider));
        Ok(provider)
    }

    /// Clean up the held provider, then empty the slot
    pub async fn reset(&self) {
        let held = self.current.lock().take();
        if let Some(provider) = held {
            provider.cleanup().await;
        }
    }
}

impl Default for ProviderContext {
    fn default() -> Self {
        Self::new()
    }
}
