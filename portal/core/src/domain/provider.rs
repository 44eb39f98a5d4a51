// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Project-Host Port
//!
//! Narrow, typed interface to the external project-hosting service. No
//! business logic lives here: every operation is one network round trip that
//! returns a structured value or a typed [`ProviderError`]. Retry policy
//! belongs to callers (currently: none).
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer (port)
//! - **Purpose:** Contract implemented by `infrastructure::gitlab_client`

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::project::{EnvironmentStatus, ProjectHandle, ProjectSummary};

/// Tag attached to every project the portal creates; listing filters on it.
pub const ONBOARDED_TAG: &str = "onboarded";

/// Typed failure of a single provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The project name is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// The bounded request timeout elapsed.
    #[error("timed out: {0}")]
    Timeout(String),

    /// Any other non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection, DNS, or body-decoding failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Interface to the external project host.
///
/// Implementations set a bounded timeout on every call and never retry.
#[async_trait]
pub trait ProjectHost: Send + Sync {
    /// Create a project. Fails with [`ProviderError::Conflict`] when the
    /// name already exists at the provider.
    async fn create_project(
        &self,
        name: &str,
        description: &str,
        tags: &[String],
    ) -> Result<ProjectHandle, ProviderError>;

    /// Resolve a project by its registered name. The match is exact and
    /// case-insensitive even where the underlying lookup is a substring
    /// search; implementations filter to the exact match themselves.
    async fn find_project(&self, name: &str) -> Result<ProjectHandle, ProviderError>;

    /// Commit one file to the project's default branch. One round trip per
    /// file; there is no batching.
    async fn add_file(
        &self,
        project_id: u64,
        path: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<(), ProviderError>;

    /// Register the deployment webhook (push, merge-request, and tag-push
    /// events).
    async fn create_webhook(&self, project_id: u64, url: &str) -> Result<(), ProviderError>;

    async fn list_environments(
        &self,
        project_id: u64,
    ) -> Result<Vec<EnvironmentStatus>, ProviderError>;

    async fn delete_project(&self, project_id: u64) -> Result<(), ProviderError>;

    async fn update_description(
        &self,
        project_id: u64,
        description: &str,
    ) -> Result<(), ProviderError>;

    /// List projects previously onboarded through the portal.
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ProviderError>;

    /// Check reachability and token validity. Called once at startup;
    /// failure there is fatal.
    async fn verify_credentials(&self) -> Result<(), ProviderError>;
}
