// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Service providers for dependency fidelity testing
//!
//! A test suite asks [`select`] for a provider and talks to the document
//! store, generation client and auth service through it. The same suite can
//! run against in-memory mocks, against live services, or against live
//! services while every call is captured to a JSON file for later comparison
//! with the mocks (see the `mockprobe-compare` crate).
//!
//! ```no_run
//! # async fn demo() -> Result<(), mockprobe::ProviderError> {
//! use mockprobe::{select, Drivers, HarnessConfig};
//!
//! let provider = select(Some("mock"), &HarnessConfig::from_env(), Drivers::new())?;
//! let store = provider.get_document_store()?;
//! let _doc = store.collection("users").document("bob");
//! provider.cleanup().await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod env;
pub mod generation;
pub mod mock;
pub mod provider;
pub mod proxy;
pub mod store;

/// Re-exported capture types from the mockprobe-capture crate.
pub mod capture {
    pub use mockprobe_capture::{
        CaptureFile, CaptureManager, CaptureSummary, Interaction, InteractionStatus,
    };
}

pub use auth::{AuthClaims, AuthError, AuthService};
pub use config::HarnessConfig;
pub use generation::{Generation, GenerationClient, GenerationError, GenerationOptions, TokenUsage};
pub use provider::{
    current, select, select_from_env, CaptureProvider, Driver, Drivers, MockProvider, Provider,
    ProviderContext, ProviderError, ProviderMode, RealProvider,
};
pub use store::{CollectionRef, DocumentRef, DocumentSnapshot, DocumentStore, StoreError};
