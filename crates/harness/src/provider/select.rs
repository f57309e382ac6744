// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{
    CaptureProvider, Drivers, MockProvider, Provider, ProviderError, ProviderMode, RealProvider,
};
use crate::config::HarnessConfig;
use std::sync::Arc;

/// Build the provider for `mode`.
///
/// Without an explicit mode the configured one is used, and without that
/// `mock`. Unknown modes fail with a configuration error naming the value.
pub fn select(
    mode: Option<&str>,
    config: &HarnessConfig,
    drivers: Drivers,
) -> Result<Arc<dyn Provider>, ProviderError> {
    let mode = match mode.or(config.mode.as_deref()) {
        Some(name) => name.parse::<ProviderMode>()?,
        None => ProviderMode::default(),
    };
    tracing::info!(%mode, "provider selected");

    let provider: Arc<dyn Provider> = match mode {
        ProviderMode::Mock => Arc::new(MockProvider::new()),
        ProviderMode::Real => Arc::new(RealProvider::new(config.clone(), drivers)?),
        ProviderMode::Capture => Arc::new(CaptureProvider::new(config.clone(), drivers)?),
    };
    Ok(provider)
}

/// [`select`] with configuration taken from the environment
pub fn select_from_env(drivers: Drivers) -> Result<Arc<dyn Provider>, ProviderError> {
    select(None, &HarnessConfig::from_env(), drivers)
}
