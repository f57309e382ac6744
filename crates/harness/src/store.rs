// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document store contract.
//!
//! Shaped after a hierarchical document database: a store hands out
//! collection references, collections hand out document references, and
//! documents can own sub-collections. Reference accessors are synchronous;
//! anything that touches the backend is async.

use async_trait::async_trait;
use mockprobe_capture::FailureKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported by a document store backend.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("invalid document data: {0}")]
    InvalidData(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl FailureKind for StoreError {
    fn failure_kind(&self) -> String {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::InvalidData(_) => "InvalidData",
            Self::PermissionDenied(_) => "PermissionDenied",
            Self::Unavailable(_) => "Unavailable",
        }
        .to_string()
    }
}

/// Point-in-time read of one document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub id: String,
    pub exists: bool,
    /// Document fields, `None` when the document does not exist
    pub data: Option<Value>,
}

impl DocumentSnapshot {
    pub fn missing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            exists: false,
            data: None,
        }
    }

    pub fn found(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            exists: true,
            data: Some(data),
        }
    }
}

/// Entry point of a document store client
pub trait DocumentStore: Send + Sync {
    /// Reference to a top-level collection
    fn collection(&self, name: &str) -> Arc<dyn CollectionRef>;

    /// Project the store belongs to, if known
    fn project_id(&self) -> Option<String> {
        None
    }
}

/// Reference to a collection, optionally narrowed by a limit
#[async_trait]
pub trait CollectionRef: Send + Sync {
    /// Last path segment
    fn id(&self) -> String;

    /// Full slash-separated path
    fn path(&self) -> String;

    /// Reference to a document in this collection
    fn document(&self, id: &str) -> Arc<dyn DocumentRef>;

    /// The same collection restricted to at most `count` documents
    fn limit(&self, count: usize) -> Arc<dyn CollectionRef>;

    /// Create a document with a generated id
    async fn add(&self, data: Value) -> Result<Arc<dyn DocumentRef>, StoreError>;

    /// Read every document, as a stream of snapshots
    async fn stream(&self) -> Result<Vec<DocumentSnapshot>, StoreError>;

    /// Read every document in one batch
    async fn get(&self) -> Result<Vec<DocumentSnapshot>, StoreError>;
}

/// Reference to a single document
#[async_trait]
pub trait DocumentRef: Send + Sync {
    fn id(&self) -> String;

    fn path(&self) -> String;

    /// Reference to a sub-collection of this document
    fn collection(&self, name: &str) -> Arc<dyn CollectionRef>;

    /// Write the document; with `merge` only the given fields change
    async fn set(&self, data: Value, merge: bool) -> Result<(), StoreError>;

    async fn get(&self) -> Result<DocumentSnapshot, StoreError>;

    /// Change fields of an existing document
    async fn update(&self, fields: Value) -> Result<(), StoreError>;

    /// Delete the document; deleting a missing document succeeds
    async fn delete(&self) -> Result<(), StoreError>;
}
