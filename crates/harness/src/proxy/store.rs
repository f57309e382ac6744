// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document store proxy.

use super::STORE_SERVICE;
use crate::store::{CollectionRef, DocumentRef, DocumentSnapshot, DocumentStore, StoreError};
use async_trait::async_trait;
use mockprobe_capture::CaptureManager;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// Intercepted document store operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    CollectionAdd,
    CollectionStream,
    CollectionGet,
    DocumentSet,
    DocumentGet,
    DocumentUpdate,
    DocumentDelete,
}

impl StoreOperation {
    pub const ALL: [StoreOperation; 7] = [
        Self::CollectionAdd,
        Self::CollectionStream,
        Self::CollectionGet,
        Self::DocumentSet,
        Self::DocumentGet,
        Self::DocumentUpdate,
        Self::DocumentDelete,
    ];

    /// Operation name as recorded in the log
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CollectionAdd => "collection.add",
            Self::CollectionStream => "collection.stream",
            Self::CollectionGet => "collection.get",
            Self::DocumentSet => "document.set",
            Self::DocumentGet => "document.get",
            Self::DocumentUpdate => "document.update",
            Self::DocumentDelete => "document.delete",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded response summary, one shape per kind of operation
#[derive(Debug)]
pub enum StoreResponse<'a> {
    /// `collection.add`: the created document
    Added { id: String, path: String },
    /// `collection.stream` and `collection.get`
    Documents(&'a [DocumentSnapshot]),
    /// `document.get`
    Document(&'a DocumentSnapshot),
    /// Writes that return nothing
    Written,
}

impl StoreResponse<'_> {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Added { id, path } => json!({ "id": id, "path": path }),
            Self::Documents(snapshots) => json!({
                "count": snapshots.len(),
                "documents": snapshots
                    .iter()
                    .map(|s| json!({ "id": s.id, "data": s.data }))
                    .collect::<Vec<_>>(),
            }),
            Self::Document(snapshot) => {
                let mut summary = json!({ "exists": snapshot.exists, "id": snapshot.id });
                if let (Some(data), Value::Object(fields)) = (&snapshot.data, &mut summary) {
                    fields.insert("data".to_string(), data.clone());
                }
                summary
            }
            Self::Written => json!({ "success": true }),
        }
    }
}

/// Recording wrapper around a [`DocumentStore`]
#[derive(Clone)]
pub struct StoreProxy {
    inner: Arc<dyn DocumentStore>,
    manager: CaptureManager,
}

impl StoreProxy {
    pub fn new(inner: Arc<dyn DocumentStore>, manager: CaptureManager) -> Self {
        Self { inner, manager }
    }

    pub fn manager(&self) -> &CaptureManager {
        &self.manager
    }
}

impl DocumentStore for StoreProxy {
    fn collection(&self, name: &str) -> Arc<dyn CollectionRef> {
        CollectionProxy::wrap(self.inner.collection(name), &self.manager, None)
    }

    fn project_id(&self) -> Option<String> {
        self.inner.project_id()
    }
}

struct CollectionProxy {
    inner: Arc<dyn CollectionRef>,
    manager: CaptureManager,
    limit: Option<usize>,
}

impl CollectionProxy {
    fn wrap(
        inner: Arc<dyn CollectionRef>,
        manager: &CaptureManager,
        limit: Option<usize>,
    ) -> Arc<dyn CollectionRef> {
        Arc::new(Self {
            inner,
            manager: manager.clone(),
            limit,
        })
    }

    fn request(&self) -> Value {
        let mut request = json!({ "path": self.inner.path() });
        if let (Some(limit), Value::Object(fields)) = (self.limit, &mut request) {
            fields.insert("limit".to_string(), json!(limit));
        }
        request
    }

    async fn list(&self, op: StoreOperation) -> Result<Vec<DocumentSnapshot>, StoreError> {
        let call = async {
            match op {
                StoreOperation::CollectionStream => self.inner.stream().await,
                _ => self.inner.get().await,
            }
        };
        self.manager
            .record(STORE_SERVICE, op.as_str(), self.request(), call, |docs: &Vec<DocumentSnapshot>| {
                StoreResponse::Documents(docs).to_value()
            })
            .await
    }
}

#[async_trait]
impl CollectionRef for CollectionProxy {
    fn id(&self) -> String {
        self.inner.id()
    }

    fn path(&self) -> String {
        self.inner.path()
    }

    fn document(&self, id: &str) -> Arc<dyn DocumentRef> {
        DocumentProxy::wrap(self.inner.document(id), &self.manager)
    }

    fn limit(&self, count: usize) -> Arc<dyn CollectionRef> {
        CollectionProxy::wrap(self.inner.limit(count), &self.manager, Some(count))
    }

    async fn add(&self, data: Value) -> Result<Arc<dyn DocumentRef>, StoreError> {
        let request = json!({ "path": self.inner.path(), "data": data });
        let added = self
            .manager
            .record(
                STORE_SERVICE,
                StoreOperation::CollectionAdd.as_str(),
                request,
                self.inner.add(data),
                |doc: &Arc<dyn DocumentRef>| {
                    StoreResponse::Added {
                        id: doc.id(),
                        path: doc.path(),
                    }
                    .to_value()
                },
            )
            .await?;
        Ok(DocumentProxy::wrap(added, &self.manager))
    }

    async fn stream(&self) -> Result<Vec<DocumentSnapshot>, StoreError> {
        self.list(StoreOperation::CollectionStream).await
    }

    async fn get(&self) -> Result<Vec<DocumentSnapshot>, StoreError> {
        self.list(StoreOperation::CollectionGet).await
    }
}

struct DocumentProxy {
    inner: Arc<dyn DocumentRef>,
    manager: CaptureManager,
}

impl DocumentProxy {
    fn wrap(inner: Arc<dyn DocumentRef>, manager: &CaptureManager) -> Arc<dyn DocumentRef> {
        Arc::new(Self {
            inner,
            manager: manager.clone(),
        })
    }
}

#[async_trait]
impl DocumentRef for DocumentProxy {
    fn id(&self) -> String {
        self.inner.id()
    }

    fn path(&self) -> String {
        self.inner.path()
    }

    fn collection(&self, name: &str) -> Arc<dyn CollectionRef> {
        CollectionProxy::wrap(self.inner.collection(name), &self.manager, None)
    }

    async fn set(&self, data: Value, merge: bool) -> Result<(), StoreError> {
        let request = json!({ "path": self.inner.path(), "data": data, "merge": merge });
        self.manager
            .record(
                STORE_SERVICE,
                StoreOperation::DocumentSet.as_str(),
                request,
                self.inner.set(data, merge),
                |_| StoreResponse::Written.to_value(),
            )
            .await
    }

    async fn get(&self) -> Result<DocumentSnapshot, StoreError> {
        self.manager
            .record(
                STORE_SERVICE,
                StoreOperation::DocumentGet.as_str(),
                json!({ "path": self.inner.path() }),
                self.inner.get(),
                |snapshot: &DocumentSnapshot| StoreResponse::Document(snapshot).to_value(),
            )
            .await
    }

    async fn update(&self, fields: Value) -> Result<(), StoreError> {
        let request = json!({ "path": self.inner.path(), "data": fields });
        self.manager
            .record(
                STORE_SERVICE,
                StoreOperation::DocumentUpdate.as_str(),
                request,
                self.inner.update(fields),
                |_| StoreResponse::Written.to_value(),
            )
            .await
    }

    async fn delete(&self) -> Result<(), StoreError> {
        self.manager
            .record(
                STORE_SERVICE,
                StoreOperation::DocumentDelete.as_str(),
                json!({ "path": self.inner.path() }),
                self.inner.delete(),
                |_| StoreResponse::Written.to_value(),
            )
            .await
    }
}
