// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory backends used by the mock provider and by tests.

mod generation;
mod store;

pub use crate::auth::MockAuth;
pub use generation::{MockGenerationClient, DEFAULT_MOCK_TEXT};
pub use store::MemoryDocumentStore;
