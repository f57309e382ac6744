// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{Provider, ProviderError, ProviderMode};
use crate::auth::AuthService;
use crate::generation::GenerationClient;
use crate::mock::{MemoryDocumentStore, MockAuth, MockGenerationClient};
use crate::store::DocumentStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Provider backed by in-memory test doubles
///
/// Every getter returns the same shared instance, so writes made through one
/// handle are visible through the next. `cleanup` empties the store.
pub struct MockProvider {
    store: Arc<MemoryDocumentStore>,
    generation: Arc<MockGenerationClient>,
    auth: Arc<MockAuth>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::with_clients(MemoryDocumentStore::new(), MockGenerationClient::new())
    }

    /// Use preconfigured backends, such as a generation client with rules
    pub fn with_clients(store: MemoryDocumentStore, generation: MockGenerationClient) -> Self {
        Self {
            store: Arc::new(store),
            generation: Arc::new(generation),
            auth: Arc::new(MockAuth::new()),
        }
    }

    /// The concrete store, for assertions in tests
    pub fn store(&self) -> &MemoryDocumentStore {
        &self.store
    }

    pub fn generation(&self) -> &MockGenerationClient {
        &self.generation
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn mode(&self) -> ProviderMode {
        ProviderMode::Mock
    }

    fn is_real_service(&self) -> bool {
        false
    }

    fn get_document_store(&self) -> Result<Arc<dyn DocumentStore>, ProviderError> {
        Ok(self.store.clone())
    }

    fn get_generation_client(&self) -> Result<Arc<dyn GenerationClient>, ProviderError> {
        Ok(self.generation.clone())
    }

    fn get_auth(&self) -> Result<Arc<dyn AuthService>, ProviderError> {
        Ok(self.auth.clone())
    }

    async fn cleanup(&self) {
        self.store.clear();
    }
}
