// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Provider-Side Project Types
//!
//! Wire-facing value objects owned by the provider client. The orchestrator
//! holds a [`ProjectHandle`] only for the duration of one workflow run and
//! re-resolves projects by name on every workflow; the provider is the sole
//! owner of project lifetime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to a provider-side project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectHandle {
    /// External numeric project id.
    pub id: u64,
    /// Browsable project URL.
    pub web_url: String,
    /// Normalized project name as registered at the provider.
    pub name: String,
}

/// One deployment environment of a project, as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentStatus {
    pub name: String,
    /// Lifecycle state, e.g. `available` or `stopped`.
    pub state: String,
    /// Timestamp of the most recent deployment, if any ever happened.
    pub last_deployment_at: Option<DateTime<Utc>>,
    /// Externally reachable URL, when the environment exposes one.
    pub external_url: Option<String>,
}

/// Listing entry for an onboarded project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub web_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub visibility: Option<String>,
}
