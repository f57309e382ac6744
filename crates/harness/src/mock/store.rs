// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document store held entirely in memory.
//!
//! Documents live in one ordered map keyed by their full path, so a
//! collection listing is a prefix scan and sub-collections need no extra
//! bookkeeping.

use crate::store::{CollectionRef, DocumentRef, DocumentSnapshot, DocumentStore, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

type Documents = Arc<Mutex<BTreeMap<String, Map<String, Value>>>>;

/// In-memory document store
#[derive(Clone, Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Documents,
    project_id: Option<String>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_id(project_id: impl Into<String>) -> Self {
        Self {
            documents: Documents::default(),
            project_id: Some(project_id.into()),
        }
    }

    /// Number of documents across every collection
    pub fn document_count(&self) -> usize {
        self.documents.lock().len()
    }

    /// Remove every document
    pub fn clear(&self) {
        self.documents.lock().clear();
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn collection(&self, name: &str) -> Arc<dyn CollectionRef> {
        Arc::new(MemoryCollection {
            documents: Arc::clone(&self.documents),
            path: name.to_string(),
            limit: None,
        })
    }

    fn project_id(&self) -> Option<String> {
        self.project_id.clone()
    }
}

fn last_segment(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

fn as_fields(data: Value, path: &str) -> Result<Map<String, Value>, StoreError> {
    match data {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::InvalidData(format!(
            "{} expects an object, got {}",
            path, other
        ))),
    }
}

struct MemoryCollection {
    documents: Documents,
    path: String,
    limit: Option<usize>,
}

impl MemoryCollection {
    fn document_ref(&self, id: &str) -> MemoryDocument {
        MemoryDocument {
            documents: Arc::clone(&self.documents),
            path: format!("{}/{}", self.path, id),
        }
    }

    fn snapshots(&self) -> Vec<DocumentSnapshot> {
        let prefix = format!("{}/", self.path);
        let documents = self.documents.lock();
        documents
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .filter(|(path, _)| !path[prefix.len()..].contains('/'))
            .take(self.limit.unwrap_or(usize::MAX))
            .map(|(path, fields)| {
                DocumentSnapshot::found(&path[prefix.len()..], Value::Object(fields.clone()))
            })
            .collect()
    }
}

#[async_trait]
impl CollectionRef for MemoryCollection {
    fn id(&self) -> String {
        last_segment(&self.path)
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn document(&self, id: &str) -> Arc<dyn DocumentRef> {
        Arc::new(self.document_ref(id))
    }

    fn limit(&self, count: usize) -> Arc<dyn CollectionRef> {
        Arc::new(MemoryCollection {
            documents: Arc::clone(&self.documents),
            path: self.path.clone(),
            limit: Some(count),
        })
    }

    async fn add(&self, data: Value) -> Result<Arc<dyn DocumentRef>, StoreError> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let document = self.document_ref(&id);
        let fields = as_fields(data, &document.path)?;
        self.documents.lock().insert(document.path.clone(), fields);
        Ok(Arc::new(document))
    }

    async fn stream(&self) -> Result<Vec<DocumentSnapshot>, StoreError> {
        Ok(self.snapshots())
    }

    async fn get(&self) -> Result<Vec<DocumentSnapshot>, StoreError> {
        Ok(self.snapshots())
    }
}

struct MemoryDocument {
    documents: Documents,
    path: String,
}

#[async_trait]
impl DocumentRef for MemoryDocument {
    fn id(&self) -> String {
        last_segment(&self.path)
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn collection(&self, name: &str) -> Arc<dyn CollectionRef> {
        Arc::new(MemoryCollection {
            documents: Arc::clone(&self.documents),
            path: format!("{}/{}", self.path, name),
            limit: None,
        })
    }

    async fn set(&self, data: Value, merge: bool) -> Result<(), StoreError> {
        let fields = as_fields(data, &self.path)?;
        let mut documents = self.documents.lock();
        match documents.get_mut(&self.path) {
            Some(existing) if merge => existing.extend(fields),
            _ => {
                documents.insert(self.path.clone(), fields);
            }
        }
        Ok(())
    }

    async fn get(&self) -> Result<DocumentSnapshot, StoreError> {
        let id = last_segment(&self.path);
        Ok(match self.documents.lock().get(&self.path) {
            Some(fields) => DocumentSnapshot::found(id, Value::Object(fields.clone())),
            None => DocumentSnapshot::missing(id),
        })
    }

    async fn update(&self, fields: Value) -> Result<(), StoreError> {
        let fields = as_fields(fields, &self.path)?;
        let mut documents = self.documents.lock();
        let existing = documents
            .get_mut(&self.path)
            .ok_or_else(|| StoreError::NotFound(self.path.clone()))?;
        existing.extend(fields);
        Ok(())
    }

    async fn delete(&self) -> Result<(), StoreError> {
        self.documents.lock().remove(&self.path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
