// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Onboarding Outcomes and Error Taxonomy
//!
//! Every workflow invocation terminates in exactly one [`OnboardingResult`].
//! Failures carry a stable machine-readable [`ErrorKind`] plus free-text
//! detail; errors are constructed once at the point of failure and propagate
//! without re-wrapping.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Terminal workflow records, error kinds, auth context

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::project::ProjectHandle;
use crate::domain::provider::ProviderError;

/// Stable machine-readable classification of a workflow failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Unauthorized,
    NotFound,
    Conflict,
    ProjectCreation,
    ArtifactPush,
    WebhookSetup,
    ProviderUnavailable,
    Unexpected,
}

/// Terminal error of a workflow invocation.
#[derive(Debug, Error)]
pub enum OnboardingError {
    /// Missing or malformed descriptor field. Detected before any provider
    /// call is made.
    #[error("{0}")]
    Validation(String),

    #[error("authentication required")]
    Unauthorized,

    #[error("application '{0}' not found")]
    NotFound(String),

    /// Project name already exists at the provider on create.
    #[error("project '{name}' already exists: {message}")]
    Conflict { name: String, message: String },

    #[error("failed to create project: {source}")]
    ProjectCreation {
        #[source]
        source: ProviderError,
    },

    /// A file push failed. The project and any files pushed before this one
    /// stay in place; there is no rollback.
    #[error("failed to push '{path}': {source}")]
    ArtifactPush {
        path: String,
        #[source]
        source: ProviderError,
    },

    #[error("failed to configure webhook: {source}")]
    WebhookSetup {
        #[source]
        source: ProviderError,
    },

    /// Provider unreachable or credentials rejected. Fatal at startup.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl OnboardingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OnboardingError::Validation(_) => ErrorKind::Validation,
            OnboardingError::Unauthorized => ErrorKind::Unauthorized,
            OnboardingError::NotFound(_) => ErrorKind::NotFound,
            OnboardingError::Conflict { .. } => ErrorKind::Conflict,
            OnboardingError::ProjectCreation { .. } => ErrorKind::ProjectCreation,
            OnboardingError::ArtifactPush { .. } => ErrorKind::ArtifactPush,
            OnboardingError::WebhookSetup { .. } => ErrorKind::WebhookSetup,
            OnboardingError::ProviderUnavailable(_) => ErrorKind::ProviderUnavailable,
            OnboardingError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Success,
    Error,
}

/// Failure slot of an [`OnboardingResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowFailure {
    pub kind: ErrorKind,
    pub detail: String,
}

/// Terminal record of one workflow invocation. Created once, never mutated
/// after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingResult {
    pub status: WorkflowStatus,
    /// Present when the workflow got far enough to resolve or create the
    /// project, including on later-step failures.
    pub project: Option<ProjectHandle>,
    /// Paths of artifacts actually pushed, in push order. On failure this
    /// records what is left behind in the partially onboarded project.
    pub artifacts_pushed: Vec<String>,
    pub error: Option<WorkflowFailure>,
}

impl OnboardingResult {
    pub fn success(project: ProjectHandle, artifacts_pushed: Vec<String>) -> Self {
        Self {
            status: WorkflowStatus::Success,
            project: Some(project),
            artifacts_pushed,
            error: None,
        }
    }

    pub fn failure(
        error: &OnboardingError,
        project: Option<ProjectHandle>,
        artifacts_pushed: Vec<String>,
    ) -> Self {
        Self {
            status: WorkflowStatus::Error,
            project,
            artifacts_pushed,
            error: Some(WorkflowFailure {
                kind: error.kind(),
                detail: error.to_string(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == WorkflowStatus::Success
    }
}

/// Status-workflow output: one entry per deployment environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub name: String,
    pub project_id: u64,
    /// Keyed by environment name. BTreeMap keeps output ordering stable.
    pub environments: BTreeMap<String, EnvironmentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentSummary {
    pub status: String,
    /// RFC 3339 timestamp of the last deployment, or `"Never"`.
    pub last_deployment: String,
    pub url: String,
}

/// Explicit per-call authentication context. There is no global session
/// state; the presentation layer constructs one of these for every request
/// and the orchestrator checks it where an operation requires auth.
#[derive(Debug, Clone)]
pub struct AuthContext {
    authenticated: bool,
    principal: Option<String>,
}

impl AuthContext {
    pub fn authenticated(principal: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            principal: Some(principal.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            principal: None,
        }
    }

    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    /// Gate for operations that require credentials.
    pub fn require(&self) -> Result<(), OnboardingError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(OnboardingError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        let err = OnboardingError::Validation("missing required field: name".to_string());
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = OnboardingError::Conflict {
            name: "billing-api".to_string(),
            message: "has already been taken".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_conflict_is_distinguishable_from_other_provider_failures() {
        let conflict = OnboardingError::Conflict {
            name: "a".to_string(),
            message: "taken".to_string(),
        };
        let other = OnboardingError::ProjectCreation {
            source: ProviderError::Http {
                status: 502,
                message: "bad gateway".to_string(),
            },
        };
        assert_ne!(conflict.kind(), other.kind());
    }

    #[test]
    fn test_failure_result_records_partial_pushes() {
        let err = OnboardingError::ArtifactPush {
            path: "deploy/service.yaml".to_string(),
            source: ProviderError::Timeout("request timed out".to_string()),
        };
        let result = OnboardingResult::failure(
            &err,
            None,
            vec![".gitlab-ci.yml".to_string(), "Dockerfile".to_string()],
        );
        assert_eq!(result.status, WorkflowStatus::Error);
        assert_eq!(result.artifacts_pushed.len(), 2);
        assert_eq!(result.error.as_ref().unwrap().kind, ErrorKind::ArtifactPush);
    }

    #[test]
    fn test_anonymous_context_fails_require() {
        assert!(AuthContext::anonymous().require().is_err());
        assert!(AuthContext::authenticated("ops").require().is_ok());
    }
}
