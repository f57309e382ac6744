// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture manager: scoped interaction recording on top of the log.

use crate::error::CaptureError;
use crate::file::{capture_file_name, CaptureFile};
use crate::interaction::{FailureKind, Interaction};
use crate::log::{Completion, InteractionLog, OpenInteraction, ResponseSlot};
use crate::redact::redact_value;
use crate::summary::CaptureSummary;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Error kind recorded when a guard is dropped before it was finalized
pub const CANCELLED_KIND: &str = "Cancelled";

/// Owns the interaction log for one capture session
///
/// Cloning is cheap and every clone records into the same log, so proxies for
/// nested references can share one manager.
#[derive(Clone, Debug)]
pub struct CaptureManager {
    session_id: String,
    started_at: DateTime<Utc>,
    capture_dir: PathBuf,
    log: Arc<InteractionLog>,
}

impl CaptureManager {
    /// Start a capture session writing into `capture_dir`
    pub fn new(capture_dir: impl Into<PathBuf>) -> Self {
        let started_at = Utc::now();
        Self {
            session_id: started_at.format("%Y%m%d_%H%M%S_%3f").to_string(),
            started_at,
            capture_dir: capture_dir.into(),
            log: Arc::new(InteractionLog::new()),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn capture_dir(&self) -> &Path {
        &self.capture_dir
    }

    /// The underlying log, for queries
    pub fn log(&self) -> &InteractionLog {
        &self.log
    }

    /// Open an interaction. The request is redacted before it is stored.
    pub fn begin(&self, service: &str, operation: &str, request: Value) -> InteractionGuard {
        let open = self.log.open(service, operation, redact_value(&request));
        tracing::debug!(id = open.id, service, operation, "interaction opened");
        InteractionGuard {
            id: open.id,
            log: Arc::clone(&self.log),
            open: Some(open),
        }
    }

    /// Record an async call as one interaction.
    ///
    /// On success `summarize` shapes the recorded response from the result.
    /// On failure the error is recorded and returned to the caller untouched.
    pub async fn record<T, E, Fut, S>(
        &self,
        service: &str,
        operation: &str,
        request: Value,
        call: Fut,
        summarize: S,
    ) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        E: FailureKind,
        S: FnOnce(&T) -> Value,
    {
        let guard = self.begin(service, operation, request);
        match call.await {
            Ok(result) => {
                guard.succeed(summarize(&result));
                Ok(result)
            }
            Err(e) => {
                guard.fail(&e);
                Err(e)
            }
        }
    }

    /// Deliver a response for an interaction by id, open or already logged.
    pub fn record_response(&self, id: u64, response: Value) -> Result<ResponseSlot, CaptureError> {
        self.log.record_response(id, redact_value(&response))
    }

    /// Snapshot of all finalized interactions
    pub fn interactions(&self) -> Vec<Interaction> {
        self.log.interactions()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Aggregate statistics over the in-memory log
    pub fn summary(&self) -> CaptureSummary {
        CaptureSummary::from_interactions(&self.log.interactions())
    }

    /// Snapshot the log into a capture file value
    pub fn snapshot(&self) -> CaptureFile {
        CaptureFile::new(&self.session_id, self.log.interactions())
    }

    /// Write the capture file into the capture directory.
    ///
    /// A file name is generated from the save time and session id when none
    /// is given. The directory is created if missing.
    pub fn save(&self, filename: Option<&str>) -> Result<PathBuf, CaptureError> {
        let file = self.snapshot();
        let name = match filename {
            Some(name) => name.to_string(),
            None => capture_file_name(file.timestamp, &self.session_id),
        };
        let path = self.capture_dir.join(name);
        file.write(&path)?;
        tracing::info!(
            path = %path.display(),
            interactions = file.total_interactions,
            "capture saved"
        );
        Ok(path)
    }
}

/// Handle for an open interaction
///
/// Finalize it with [`succeed`](Self::succeed), [`finish`](Self::finish) or
/// [`fail`](Self::fail). A guard dropped without being finalized, such as one
/// held by a cancelled future, is recorded as a `Cancelled` error.
#[must_use = "an unfinished guard records a cancelled interaction when dropped"]
#[derive(Debug)]
pub struct InteractionGuard {
    id: u64,
    log: Arc<InteractionLog>,
    open: Option<OpenInteraction>,
}

impl InteractionGuard {
    /// Correlation id for [`CaptureManager::record_response`]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Finalize as a success with this response
    pub fn succeed(mut self, response: Value) -> u64 {
        self.complete(Completion::Success(Some(redact_value(&response))));
        self.id
    }

    /// Finalize as a success using the response delivered by id, if any
    pub fn finish(mut self) -> u64 {
        self.complete(Completion::Success(None));
        self.id
    }

    /// Finalize as a failure
    pub fn fail<E: FailureKind + ?Sized>(mut self, error: &E) -> u64 {
        self.complete(Completion::Failure {
            message: error.to_string(),
            kind: error.failure_kind(),
        });
        self.id
    }

    fn complete(&mut self, completion: Completion) {
        if let Some(open) = self.open.take() {
            let failed = matches!(completion, Completion::Failure { .. });
            self.log.finalize(open, completion);
            tracing::debug!(id = self.id, failed, "interaction finalized");
        }
    }
}

impl Drop for InteractionGuard {
    fn drop(&mut self) {
        if self.open.is_some() {
            tracing::debug!(id = self.id, "interaction dropped before completion");
            self.complete(Completion::Failure {
                message: "interaction dropped before completion".to_string(),
                kind: CANCELLED_KIND.to_string(),
            });
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
