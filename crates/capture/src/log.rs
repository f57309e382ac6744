// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interaction log implementation.
//!
//! Ids are issued when an interaction is opened, but entries are appended
//! when it is finalized, so the log is in completion order. A response that
//! arrives for an interaction that is still open is parked in a pending table
//! and spliced in at finalization. All state sits behind one lock.

use crate::error::CaptureError;
use crate::interaction::{Interaction, InteractionStatus};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Where a response delivered by id ended up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseSlot {
    /// The interaction was already in the log and now carries the response
    Attached,
    /// The interaction is still open; the response waits for finalization
    Pending,
}

/// An interaction that has been opened but not yet finalized
#[derive(Debug)]
pub(crate) struct OpenInteraction {
    pub id: u64,
    timestamp: DateTime<Utc>,
    started: Instant,
    service: String,
    operation: String,
    request: Value,
}

/// How an open interaction ended
#[derive(Debug)]
pub(crate) enum Completion {
    Success(Option<Value>),
    Failure { message: String, kind: String },
}

#[derive(Debug, Default)]
struct LogState {
    next_id: u64,
    entries: Vec<Interaction>,
    open: HashSet<u64>,
    pending: HashMap<u64, Value>,
}

/// Ordered, append-only record of finalized interactions
#[derive(Debug, Default)]
pub struct InteractionLog {
    state: Mutex<LogState>,
}

impl InteractionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn open(&self, service: &str, operation: &str, request: Value) -> OpenInteraction {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.open.insert(id);
        OpenInteraction {
            id,
            timestamp: Utc::now(),
            started: Instant::now(),
            service: service.to_string(),
            operation: operation.to_string(),
            request,
        }
    }

    pub(crate) fn finalize(&self, open: OpenInteraction, completion: Completion) {
        let duration = open.started.elapsed();
        let mut state = self.state.lock();
        state.open.remove(&open.id);
        let parked = state.pending.remove(&open.id);

        let (response, status, error, error_type) = match completion {
            Completion::Success(direct) => (
                Some(direct.or(parked).unwrap_or(Value::Null)),
                InteractionStatus::Success,
                None,
                None,
            ),
            Completion::Failure { message, kind } => {
                (None, InteractionStatus::Error, Some(message), Some(kind))
            }
        };

        state.entries.push(Interaction {
            id: open.id,
            timestamp: open.timestamp,
            service: open.service,
            operation: open.operation,
            request: open.request,
            response,
            status,
            error,
            error_type,
            duration,
        });
    }

    /// Deliver a response for an interaction by id
    pub fn record_response(&self, id: u64, response: Value) -> Result<ResponseSlot, CaptureError> {
        let mut state = self.state.lock();
        if state.open.contains(&id) {
            state.pending.insert(id, response);
            return Ok(ResponseSlot::Pending);
        }
        let entry = state
            .entries
            .iter_mut()
            .rev()
            .find(|i| i.id == id)
            .ok_or(CaptureError::UnknownInteraction(id))?;
        if entry.status == InteractionStatus::Error {
            return Err(CaptureError::AlreadyFailed(id));
        }
        entry.response = Some(response);
        Ok(ResponseSlot::Attached)
    }

    /// Number of interactions opened but not yet finalized
    pub fn open_count(&self) -> usize {
        self.state.lock().open.len()
    }

    /// Number of responses waiting for their interaction to finalize
    pub fn pending_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Snapshot of all finalized interactions
    pub fn interactions(&self) -> Vec<Interaction> {
        self.state.lock().entries.clone()
    }

    /// Get the last N interactions
    pub fn last(&self, n: usize) -> Vec<Interaction> {
        let state = self.state.lock();
        state.entries.iter().rev().take(n).rev().cloned().collect()
    }

    /// Count interactions matching a predicate
    pub fn count<F: Fn(&Interaction) -> bool>(&self, pred: F) -> usize {
        self.state.lock().entries.iter().filter(|i| pred(i)).count()
    }

    /// Find interactions recorded for a service
    pub fn find_by_service(&self, service: &str) -> Vec<Interaction> {
        self.filtered(|i| i.service == service)
    }

    /// Find interactions that succeeded
    pub fn find_responses(&self) -> Vec<Interaction> {
        self.filtered(Interaction::is_success)
    }

    /// Find interactions that failed
    pub fn find_failures(&self) -> Vec<Interaction> {
        self.filtered(|i| !i.is_success())
    }

    fn filtered<F: Fn(&Interaction) -> bool>(&self, pred: F) -> Vec<Interaction> {
        self.state
            .lock()
            .entries
            .iter()
            .filter(|i| pred(i))
            .cloned()
            .collect()
    }

    /// Get the total number of finalized interactions
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
