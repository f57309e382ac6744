// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Provider for live services.
//!
//! The harness ships no network clients of its own. Live clients come from
//! [`Drivers`]: factories registered by the embedding test suite. A getter
//! whose driver is missing fails with [`ProviderError::Dependency`] the first
//! time it is called, so a suite that never touches generation does not need
//! a generation driver.

use super::{Provider, ProviderError, ProviderMode};
use crate::auth::AuthService;
use crate::config::HarnessConfig;
use crate::generation::GenerationClient;
use crate::store::{DocumentStore, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Factory for one live client
pub type Driver<T> = Arc<dyn Fn(&HarnessConfig) -> Result<Arc<T>, ProviderError> + Send + Sync>;

/// Capability names reported by dependency errors
const DOCUMENT_STORE: &str = "document store";
const GENERATION: &str = "generation client";
const AUTH: &str = "auth";

/// Live client factories, one optional driver per capability
#[derive(Clone, Default)]
pub struct Drivers {
    document_store: Option<Driver<dyn DocumentStore>>,
    generation: Option<Driver<dyn GenerationClient>>,
    auth: Option<Driver<dyn AuthService>>,
}

impl Drivers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document_store<F>(mut self, driver: F) -> Self
    where
        F: Fn(&HarnessConfig) -> Result<Arc<dyn DocumentStore>, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        self.document_store = Some(Arc::new(driver));
        self
    }

    pub fn with_generation<F>(mut self, driver: F) -> Self
    where
        F: Fn(&HarnessConfig) -> Result<Arc<dyn GenerationClient>, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        self.generation = Some(Arc::new(driver));
        self
    }

    pub fn with_auth<F>(mut self, driver: F) -> Self
    where
        F: Fn(&HarnessConfig) -> Result<Arc<dyn AuthService>, ProviderError> + Send + Sync + 'static,
    {
        self.auth = Some(Arc::new(driver));
        self
    }
}

/// Build the client on first use and hand out the cached one afterwards
fn lazy<T: ?Sized + 'static>(
    slot: &Mutex<Option<Arc<T>>>,
    driver: Option<&Driver<T>>,
    capability: &str,
    config: &HarnessConfig,
) -> Result<Arc<T>, ProviderError> {
    let mut slot = slot.lock();
    if let Some(client) = slot.as_ref() {
        return Ok(Arc::clone(client));
    }
    let driver = driver.ok_or_else(|| ProviderError::Dependency {
        capability: capability.to_string(),
    })?;
    let client = driver(config)?;
    tracing::debug!(capability, "live client constructed");
    *slot = Some(Arc::clone(&client));
    Ok(client)
}

/// Provider talking to live services
pub struct RealProvider {
    config: HarnessConfig,
    drivers: Drivers,
    document_store: Mutex<Option<Arc<dyn DocumentStore>>>,
    generation: Mutex<Option<Arc<dyn GenerationClient>>>,
    auth: Mutex<Option<Arc<dyn AuthService>>>,
    cleaned_up: AtomicBool,
}

impl RealProvider {
    /// Validate configuration. No client is built until first requested.
    pub fn new(config: HarnessConfig, drivers: Drivers) -> Result<Self, ProviderError> {
        let has_key = config
            .generation_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !has_key {
            return Err(ProviderError::Configuration(format!(
                "{} must be set to use real services",
                crate::env::GEMINI_API_KEY
            )));
        }
        Ok(Self {
            config,
            drivers,
            document_store: Mutex::new(None),
            generation: Mutex::new(None),
            auth: Mutex::new(None),
            cleaned_up: AtomicBool::new(false),
        })
    }

    /// Delete every document of `collection`, one batch at a time.
    ///
    /// Keeps fetching while a batch comes back full, since more documents may
    /// remain. Returns the number deleted.
    pub async fn purge_collection(
        store: &dyn DocumentStore,
        collection: &str,
        batch_size: usize,
    ) -> Result<usize, ProviderError> {
        let batch_size = batch_size.max(1);
        let failed = |e: StoreError| ProviderError::Cleanup(format!("{}: {}", collection, e));
        let mut deleted = 0;
        loop {
            let batch = store
                .collection(collection)
                .limit(batch_size)
                .get()
                .await
                .map_err(failed)?;
            for snapshot in &batch {
                store
                    .collection(collection)
                    .document(&snapshot.id)
                    .delete()
                    .await
                    .map_err(failed)?;
            }
            deleted += batch.len();
            if batch.len() < batch_size {
                return Ok(deleted);
            }
        }
    }
}

#[async_trait]
impl Provider for RealProvider {
    fn mode(&self) -> ProviderMode {
        ProviderMode::Real
    }

    fn is_real_service(&self) -> bool {
        true
    }

    fn get_document_store(&self) -> Result<Arc<dyn DocumentStore>, ProviderError> {
        lazy(
            &self.document_store,
            self.drivers.document_store.as_ref(),
            DOCUMENT_STORE,
            &self.config,
        )
    }

    fn get_generation_client(&self) -> Result<Arc<dyn GenerationClient>, ProviderError> {
        lazy(
            &self.generation,
            self.drivers.generation.as_ref(),
            GENERATION,
            &self.config,
        )
    }

    fn get_auth(&self) -> Result<Arc<dyn AuthService>, ProviderError> {
        lazy(&self.auth, self.drivers.auth.as_ref(), AUTH, &self.config)
    }

    async fn cleanup(&self) {
        if self.cleaned_up.swap(true, Ordering::SeqCst) {
            return;
        }
        // Nothing was written if the store was never built
        let Some(store) = self.document_store.lock().clone() else {
            return;
        };
        for collection in &self.config.cleanup_collections {
            match Self::purge_collection(store.as_ref(), collection, self.config.cleanup_batch_size)
                .await
            {
                Ok(deleted) => tracing::info!(collection, deleted, "test collection purged"),
                Err(e) => tracing::warn!(error = %e, "cleanup incomplete"),
            }
        }
    }
}
