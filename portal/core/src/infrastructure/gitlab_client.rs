// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! GitLab Provider Client
//!
//! Typed HTTP adapter implementing the [`ProjectHost`] port against the
//! GitLab v4 API. Every call is one round trip with a bounded timeout;
//! failures come back as [`ProviderError`] and retry policy stays with the
//! caller.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Provider access (create/search/delete project, file
//!   commits, webhooks, environments)

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::domain::project::{EnvironmentStatus, ProjectHandle, ProjectSummary};
use crate::domain::provider::{ProjectHost, ProviderError, ONBOARDED_TAG};

/// Per-request timeout. Workflow invocations must never block indefinitely
/// on the provider.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const TOKEN_HEADER: &str = "PRIVATE-TOKEN";
const DEFAULT_BRANCH: &str = "main";

pub struct GitLabClient {
    base_url: String,
    token: String,
    client: Client,
}

impl GitLabClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.base_url, path)
    }

    /// Surface non-2xx responses as typed failures. A 400 complaining that
    /// the name is taken is a conflict in disguise; GitLab reports duplicate
    /// project names that way.
    async fn check(response: Response) -> Result<Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            404 => ProviderError::NotFound(message),
            409 => ProviderError::Conflict(message),
            400 if message.contains("has already been taken") => {
                ProviderError::Conflict(message)
            }
            other => ProviderError::Http {
                status: other,
                message,
            },
        })
    }

    fn send_error(err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, ProviderError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Transport(format!("failed to decode response: {e}")))
    }
}

/// Project payload subset the portal cares about.
#[derive(Debug, Deserialize)]
struct ProjectPayload {
    id: u64,
    name: String,
    web_url: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    last_activity_at: Option<DateTime<Utc>>,
    #[serde(default)]
    visibility: Option<String>,
}

impl From<ProjectPayload> for ProjectHandle {
    fn from(p: ProjectPayload) -> Self {
        ProjectHandle {
            id: p.id,
            web_url: p.web_url,
            name: p.name,
        }
    }
}

impl From<ProjectPayload> for ProjectSummary {
    fn from(p: ProjectPayload) -> Self {
        ProjectSummary {
            id: p.id,
            name: p.name,
            description: p.description,
            web_url: p.web_url,
            created_at: p.created_at,
            last_activity_at: p.last_activity_at,
            visibility: p.visibility,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EnvironmentPayload {
    name: String,
    state: String,
    #[serde(default)]
    external_url: Option<String>,
    #[serde(default)]
    last_deployment: Option<DeploymentPayload>,
}

#[derive(Debug, Deserialize)]
struct DeploymentPayload {
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl ProjectHost for GitLabClient {
    async fn create_project(
        &self,
        name: &str,
        description: &str,
        tags: &[String],
    ) -> Result<ProjectHandle, ProviderError> {
        let response = self
            .client
            .post(self.api_url("/projects"))
            .header(TOKEN_HEADER, &self.token)
            .json(&json!({
                "name": name,
                "description": description,
                "initialize_with_readme": true,
                "visibility": "private",
                "tag_list": tags,
            }))
            .send()
            .await
            .map_err(Self::send_error)?;

        let payload: ProjectPayload = Self::decode(Self::check(response).await?).await?;
        Ok(payload.into())
    }

    async fn find_project(&self, name: &str) -> Result<ProjectHandle, ProviderError> {
        // The provider lookup is a substring search; filter to an exact,
        // case-insensitive match here.
        let response = self
            .client
            .get(self.api_url("/projects"))
            .header(TOKEN_HEADER, &self.token)
            .query(&[("search", name)])
            .send()
            .await
            .map_err(Self::send_error)?;

        let projects: Vec<ProjectPayload> = Self::decode(Self::check(response).await?).await?;
        projects
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(Into::into)
            .ok_or_else(|| ProviderError::NotFound(format!("no project named '{name}'")))
    }

    async fn add_file(
        &self,
        project_id: u64,
        path: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<(), ProviderError> {
        let encoded = utf8_percent_encode(path, NON_ALPHANUMERIC).to_string();
        let response = self
            .client
            .post(self.api_url(&format!(
                "/projects/{project_id}/repository/files/{encoded}"
            )))
            .header(TOKEN_HEADER, &self.token)
            .json(&json!({
                "branch": DEFAULT_BRANCH,
                "content": content,
                "commit_message": commit_message,
            }))
            .send()
            .await
            .map_err(Self::send_error)?;

        Self::check(response).await.map(|_| ())
    }

    async fn create_webhook(&self, project_id: u64, url: &str) -> Result<(), ProviderError> {
        let response = self
            .client
            .post(self.api_url(&format!("/projects/{project_id}/hooks")))
            .header(TOKEN_HEADER, &self.token)
            .json(&json!({
                "url": url,
                "push_events": true,
                "merge_requests_events": true,
                "tag_push_events": true,
                "enable_ssl_verification": true,
            }))
            .send()
            .await
            .map_err(Self::send_error)?;

        Self::check(response).await.map(|_| ())
    }

    async fn list_environments(
        &self,
        project_id: u64,
    ) -> Result<Vec<EnvironmentStatus>, ProviderError> {
        let response = self
            .client
            .get(self.api_url(&format!("/projects/{project_id}/environments")))
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(Self::send_error)?;

        let environments: Vec<EnvironmentPayload> =
            Self::decode(Self::check(response).await?).await?;
        Ok(environments
            .into_iter()
            .map(|env| EnvironmentStatus {
                name: env.name,
                state: env.state,
                last_deployment_at: env.last_deployment.and_then(|d| d.created_at),
                external_url: env.external_url,
            })
            .collect())
    }

    async fn delete_project(&self, project_id: u64) -> Result<(), ProviderError> {
        let response = self
            .client
            .delete(self.api_url(&format!("/projects/{project_id}")))
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(Self::send_error)?;

        Self::check(response).await.map(|_| ())
    }

    async fn update_description(
        &self,
        project_id: u64,
        description: &str,
    ) -> Result<(), ProviderError> {
        let response = self
            .client
            .put(self.api_url(&format!("/projects/{project_id}")))
            .header(TOKEN_HEADER, &self.token)
            .json(&json!({ "description": description }))
            .send()
            .await
            .map_err(Self::send_error)?;

        Self::check(response).await.map(|_| ())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ProviderError> {
        let response = self
            .client
            .get(self.api_url("/projects"))
            .header(TOKEN_HEADER, &self.token)
            .query(&[("tag_list", ONBOARDED_TAG), ("per_page", "100")])
            .send()
            .await
            .map_err(Self::send_error)?;

        let projects: Vec<ProjectPayload> = Self::decode(Self::check(response).await?).await?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    async fn verify_credentials(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(self.api_url("/user"))
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(Self::send_error)?;

        Self::check(response).await.map(|_| ())
    }
}
