// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory capture statistics.

use crate::interaction::Interaction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Call counts for one service
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub count: usize,
    pub operations: BTreeMap<String, usize>,
}

/// Statistics over a set of interactions
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureSummary {
    pub total_interactions: usize,
    pub services: BTreeMap<String, ServiceSummary>,
    pub total_duration_ms: f64,
    pub average_duration_ms: f64,
    pub errors: usize,
    /// Fraction of successful interactions, 0 when there are none
    pub success_rate: f64,
}

impl CaptureSummary {
    pub fn from_interactions(interactions: &[Interaction]) -> Self {
        let mut summary = Self {
            total_interactions: interactions.len(),
            ..Self::default()
        };

        for interaction in interactions {
            let service = summary
                .services
                .entry(interaction.service.clone())
                .or_default();
            service.count += 1;
            *service
                .operations
                .entry(interaction.operation.clone())
                .or_default() += 1;

            summary.total_duration_ms += interaction.duration_ms();
            if !interaction.is_success() {
                summary.errors += 1;
            }
        }

        if summary.total_interactions > 0 {
            let total = summary.total_interactions as f64;
            summary.average_duration_ms = summary.total_duration_ms / total;
            summary.success_rate = (total - summary.errors as f64) / total;
        }
        summary
    }
}
