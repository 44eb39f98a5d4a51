// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Onboarding Orchestrator
//!
//! Sequences provider calls and artifact generation into the create, update,
//! delete, status, and list workflows. Each invocation is one linear,
//! single-task call chain with early exit on the first failure; there are no
//! retries and no rollback of partially completed work. A failed create
//! leaves the project and any already-pushed files in place; the delete
//! workflow is the compensation path for callers that want one.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Workflow choreography, error-kind assignment

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::catalog::{builtin_templates, TemplateInfo};
use crate::domain::descriptor::{
    normalize_name, ApplicationDescriptor, OnboardRequest, UpdateRequest,
};
use crate::domain::generator;
use crate::domain::onboarding::{
    AuthContext, EnvironmentSummary, OnboardingError, OnboardingResult, StatusReport,
};
use crate::domain::portal_config::PortalConfig;
use crate::domain::project::{ProjectHandle, ProjectSummary};
use crate::domain::provider::{ProjectHost, ProviderError, ONBOARDED_TAG};

#[async_trait]
pub trait OnboardingService: Send + Sync {
    /// Create workflow. Always terminates in exactly one result.
    async fn onboard(&self, request: OnboardRequest) -> OnboardingResult;

    /// Update workflow: regenerates only the artifacts affected by the
    /// supplied fields.
    async fn update(
        &self,
        auth: &AuthContext,
        name: &str,
        request: UpdateRequest,
    ) -> OnboardingResult;

    /// Delete workflow. Requires an explicit confirmation flag.
    async fn delete(
        &self,
        auth: &AuthContext,
        name: &str,
        confirmed: bool,
    ) -> Result<ProjectHandle, OnboardingError>;

    /// Status workflow: environment states for one application.
    async fn status(&self, name: &str) -> Result<StatusReport, OnboardingError>;

    /// List every project onboarded through the portal.
    async fn list(&self, auth: &AuthContext) -> Result<Vec<ProjectSummary>, OnboardingError>;

    /// Read-only onboarding catalog.
    fn templates(&self) -> &[TemplateInfo];
}

/// Partial progress of one workflow run, kept so the terminal result can
/// report what was left behind when a later step fails.
#[derive(Default)]
struct WorkflowTrace {
    project: Option<ProjectHandle>,
    pushed: Vec<String>,
}

pub struct StandardOnboardingService {
    host: Arc<dyn ProjectHost>,
    config: PortalConfig,
    templates: Vec<TemplateInfo>,
}

impl StandardOnboardingService {
    pub fn new(host: Arc<dyn ProjectHost>, config: PortalConfig) -> Self {
        Self {
            host,
            config,
            templates: builtin_templates(),
        }
    }

    /// Fill descriptor fields the request left empty from process
    /// configuration, keeping the generators pure functions of the
    /// descriptor alone.
    fn apply_config_defaults(&self, descriptor: &mut ApplicationDescriptor) {
        if descriptor.registry_url.is_none() {
            descriptor.registry_url = Some(self.config.default_registry_url.clone());
        }
        if descriptor.webhook_url.is_none() {
            descriptor.webhook_url = Some(self.config.default_webhook_url.clone());
        }
    }

    /// Resolve a project by normalized name, translating the provider's
    /// not-found into the workflow taxonomy.
    async fn resolve(&self, name: &str) -> Result<ProjectHandle, OnboardingError> {
        match self.host.find_project(name).await {
            Ok(handle) => Ok(handle),
            Err(ProviderError::NotFound(_)) => Err(OnboardingError::NotFound(name.to_string())),
            Err(source) => Err(OnboardingError::Unexpected(format!(
                "project lookup failed: {source}"
            ))),
        }
    }

    async fn push_artifacts(
        &self,
        project_id: u64,
        artifacts: &[crate::domain::artifact::Artifact],
        trace: &mut WorkflowTrace,
    ) -> Result<(), OnboardingError> {
        for artifact in artifacts {
            self.host
                .add_file(
                    project_id,
                    &artifact.target_path,
                    &artifact.content,
                    &artifact.commit_message(),
                )
                .await
                .map_err(|source| OnboardingError::ArtifactPush {
                    path: artifact.target_path.clone(),
                    source,
                })?;
            trace.pushed.push(artifact.target_path.clone());
        }
        Ok(())
    }

    async fn run_create(
        &self,
        request: OnboardRequest,
        trace: &mut WorkflowTrace,
    ) -> Result<ProjectHandle, OnboardingError> {
        // Validation happens before any provider call.
        let mut descriptor = ApplicationDescriptor::from_request(request)?;
        self.apply_config_defaults(&mut descriptor);

        info!(
            app = %descriptor.name,
            framework = %descriptor.framework,
            "starting create workflow"
        );

        let tags = vec![
            ONBOARDED_TAG.to_string(),
            descriptor.framework.tag().to_string(),
        ];
        let handle = self
            .host
            .create_project(&descriptor.name, &descriptor.description, &tags)
            .await
            .map_err(|err| match err {
                ProviderError::Conflict(message) => OnboardingError::Conflict {
                    name: descriptor.name.clone(),
                    message,
                },
                source => OnboardingError::ProjectCreation { source },
            })?;
        trace.project = Some(handle.clone());

        let artifacts = generator::generate_all(&descriptor);
        self.push_artifacts(handle.id, &artifacts, trace).await?;

        // Webhook failure aborts the workflow even though the artifacts are
        // already in place; the result still reports every pushed file.
        let webhook_url = descriptor
            .webhook_url
            .as_deref()
            .unwrap_or(&self.config.default_webhook_url);
        self.host
            .create_webhook(handle.id, webhook_url)
            .await
            .map_err(|source| OnboardingError::WebhookSetup { source })?;

        info!(app = %descriptor.name, project_id = handle.id, "create workflow complete");
        Ok(handle)
    }

    async fn run_update(
        &self,
        auth: &AuthContext,
        name: &str,
        request: &UpdateRequest,
        trace: &mut WorkflowTrace,
    ) -> Result<ProjectHandle, OnboardingError> {
        auth.require()?;

        let normalized = normalize_name(name);
        let handle = self.resolve(&normalized).await?;
        trace.project = Some(handle.clone());

        if request.framework.is_some() || request.changes_manifests() {
            let mut descriptor = ApplicationDescriptor::from_update(&normalized, request)?;
            self.apply_config_defaults(&mut descriptor);

            if request.framework.is_some() {
                let pipeline = generator::generate_pipeline(&descriptor);
                self.push_artifacts(handle.id, std::slice::from_ref(&pipeline), trace)
                    .await?;
            }

            if request.changes_manifests() {
                let manifests = generator::generate_manifests(&descriptor);
                self.push_artifacts(handle.id, &manifests, trace).await?;
            }
        }

        if let Some(description) = &request.description {
            self.host
                .update_description(handle.id, description)
                .await
                .map_err(|source| {
                    OnboardingError::Unexpected(format!(
                        "failed to update project description: {source}"
                    ))
                })?;
        }

        info!(app = %normalized, project_id = handle.id, "update workflow complete");
        Ok(handle)
    }
}

#[async_trait]
impl OnboardingService for StandardOnboardingService {
    async fn onboard(&self, request: OnboardRequest) -> OnboardingResult {
        let mut trace = WorkflowTrace::default();
        match self.run_create(request, &mut trace).await {
            Ok(handle) => OnboardingResult::success(handle, trace.pushed),
            Err(err) => {
                error!(error = %err, pushed = trace.pushed.len(), "create workflow failed");
                OnboardingResult::failure(&err, trace.project, trace.pushed)
            }
        }
    }

    async fn update(
        &self,
        auth: &AuthContext,
        name: &str,
        request: UpdateRequest,
    ) -> OnboardingResult {
        let mut trace = WorkflowTrace::default();
        match self.run_update(auth, name, &request, &mut trace).await {
            Ok(handle) => OnboardingResult::success(handle, trace.pushed),
            Err(err) => {
                error!(app = name, error = %err, "update workflow failed");
                OnboardingResult::failure(&err, trace.project, trace.pushed)
            }
        }
    }

    async fn delete(
        &self,
        auth: &AuthContext,
        name: &str,
        confirmed: bool,
    ) -> Result<ProjectHandle, OnboardingError> {
        auth.require()?;

        let normalized = normalize_name(name);
        let handle = self.resolve(&normalized).await?;

        if !confirmed {
            return Err(OnboardingError::Validation(
                "deletion requires confirmation; pass confirm=true".to_string(),
            ));
        }

        self.host.delete_project(handle.id).await.map_err(|source| {
            OnboardingError::Unexpected(format!("failed to delete project: {source}"))
        })?;

        warn!(app = %normalized, project_id = handle.id, "project deleted");
        Ok(handle)
    }

    async fn status(&self, name: &str) -> Result<StatusReport, OnboardingError> {
        let normalized = normalize_name(name);
        let handle = self.resolve(&normalized).await?;

        let environments = self
            .host
            .list_environments(handle.id)
            .await
            .map_err(|source| {
                OnboardingError::Unexpected(format!("failed to list environments: {source}"))
            })?;

        let environments: BTreeMap<String, EnvironmentSummary> = environments
            .into_iter()
            .map(|env| {
                let summary = EnvironmentSummary {
                    status: env.state,
                    last_deployment: env
                        .last_deployment_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| "Never".to_string()),
                    url: env.external_url.unwrap_or_default(),
                };
                (env.name, summary)
            })
            .collect();

        Ok(StatusReport {
            name: normalized,
            project_id: handle.id,
            environments,
        })
    }

    async fn list(&self, auth: &AuthContext) -> Result<Vec<ProjectSummary>, OnboardingError> {
        auth.require()?;
        self.host.list_projects().await.map_err(|source| {
            OnboardingError::Unexpected(format!("failed to list projects: {source}"))
        })
    }

    fn templates(&self) -> &[TemplateInfo] {
        &self.templates
    }
}
