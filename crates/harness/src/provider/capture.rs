// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{Drivers, Provider, ProviderError, ProviderMode, RealProvider};
use crate::auth::AuthService;
use crate::config::HarnessConfig;
use crate::generation::GenerationClient;
use crate::proxy::{GenerationProxy, StoreProxy};
use crate::store::DocumentStore;
use async_trait::async_trait;
use mockprobe_capture::CaptureManager;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Real provider whose clients record every intercepted call
///
/// All proxies share one [`CaptureManager`]. `cleanup` saves the capture
/// file before running the real provider's cleanup; a failed save is logged
/// and does not stop the cleanup.
pub struct CaptureProvider {
    real: RealProvider,
    manager: CaptureManager,
    saved: AtomicBool,
}

impl CaptureProvider {
    pub fn new(config: HarnessConfig, drivers: Drivers) -> Result<Self, ProviderError> {
        let manager = CaptureManager::new(config.capture_dir.clone());
        let real = RealProvider::new(config, drivers)?;
        tracing::info!(
            session = manager.session_id(),
            dir = %manager.capture_dir().display(),
            "capture session started"
        );
        Ok(Self {
            real,
            manager,
            saved: AtomicBool::new(false),
        })
    }

    pub fn capture_manager(&self) -> &CaptureManager {
        &self.manager
    }
}

#[async_trait]
impl Provider for CaptureProvider {
    fn mode(&self) -> ProviderMode {
        ProviderMode::Capture
    }

    fn is_real_service(&self) -> bool {
        true
    }

    fn get_document_store(&self) -> Result<Arc<dyn DocumentStore>, ProviderError> {
        let store = self.real.get_document_store()?;
        Ok(Arc::new(StoreProxy::new(store, self.manager.clone())))
    }

    fn get_generation_client(&self) -> Result<Arc<dyn GenerationClient>, ProviderError> {
        let client = self.real.get_generation_client()?;
        Ok(Arc::new(GenerationProxy::new(client, self.manager.clone())))
    }

    fn get_auth(&self) -> Result<Arc<dyn AuthService>, ProviderError> {
        self.real.get_auth()
    }

    async fn cleanup(&self) {
        if !self.saved.swap(true, Ordering::SeqCst) {
            match self.manager.save(None) {
                Ok(path) => tracing::info!(path = %path.display(), "capture file written"),
                Err(e) => tracing::warn!(error = %e, "failed to save capture file"),
            }
        }
        self.real.cleanup().await;
    }
}
