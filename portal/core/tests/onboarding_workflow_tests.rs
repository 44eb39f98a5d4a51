// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for the onboarding workflows
//!
//! These tests drive the orchestrator end-to-end against an in-memory
//! project host double:
//! 1. Validate and normalize the descriptor
//! 2. Create the project and push the six artifacts
//! 3. Configure the webhook
//! 4. Exercise update/delete/status and the REST surface

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::util::ServiceExt;

use launchpad_core::application::onboarding_service::{
    OnboardingService, StandardOnboardingService,
};
use launchpad_core::domain::descriptor::{OnboardRequest, UpdateRequest};
use launchpad_core::domain::onboarding::{AuthContext, ErrorKind, WorkflowStatus};
use launchpad_core::domain::portal_config::PortalConfig;
use launchpad_core::domain::project::{EnvironmentStatus, ProjectHandle, ProjectSummary};
use launchpad_core::domain::provider::{ProjectHost, ProviderError};
use launchpad_core::presentation::api::{app, AppState};

// ── Test double ──────────────────────────────────────────────────────────

#[derive(Default)]
struct HostBehavior {
    conflict_on_create: bool,
    fail_push_at: Option<String>,
    fail_webhook: bool,
    existing: Vec<ProjectHandle>,
    environments: Vec<EnvironmentStatus>,
}

#[derive(Default)]
struct RecordingHost {
    behavior: HostBehavior,
    created: Mutex<Vec<String>>,
    files: Mutex<Vec<(u64, String, String)>>,
    webhooks: Mutex<Vec<(u64, String)>>,
    deleted: Mutex<Vec<u64>>,
    descriptions: Mutex<Vec<(u64, String)>>,
    calls: AtomicUsize,
}

impl RecordingHost {
    fn new(behavior: HostBehavior) -> Self {
        Self {
            behavior,
            ..Default::default()
        }
    }

    fn with_existing(name: &str, id: u64) -> Self {
        Self::new(HostBehavior {
            existing: vec![ProjectHandle {
                id,
                web_url: format!("https://git.example/{name}"),
                name: name.to_string(),
            }],
            ..Default::default()
        })
    }

    fn pushed_paths(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|(_, path, _)| path.clone())
            .collect()
    }

    fn file_content(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|(_, p, _)| p == path)
            .map(|(_, _, content)| content.clone())
    }

    fn provider_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectHost for RecordingHost {
    async fn create_project(
        &self,
        name: &str,
        _description: &str,
        _tags: &[String],
    ) -> Result<ProjectHandle, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.behavior.conflict_on_create {
            return Err(ProviderError::Conflict(
                "has already been taken".to_string(),
            ));
        }
        self.created.lock().unwrap().push(name.to_string());
        Ok(ProjectHandle {
            id: 42,
            web_url: format!("https://git.example/{name}"),
            name: name.to_string(),
        })
    }

    async fn find_project(&self, name: &str) -> Result<ProjectHandle, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.behavior
            .existing
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("no project named '{name}'")))
    }

    async fn add_file(
        &self,
        project_id: u64,
        path: &str,
        content: &str,
        _commit_message: &str,
    ) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.behavior.fail_push_at.as_deref() == Some(path) {
            return Err(ProviderError::Http {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        self.files
            .lock()
            .unwrap()
            .push((project_id, path.to_string(), content.to_string()));
        Ok(())
    }

    async fn create_webhook(&self, project_id: u64, url: &str) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.behavior.fail_webhook {
            return Err(ProviderError::Timeout("request timed out".to_string()));
        }
        self.webhooks
            .lock()
            .unwrap()
            .push((project_id, url.to_string()));
        Ok(())
    }

    async fn list_environments(
        &self,
        _project_id: u64,
    ) -> Result<Vec<EnvironmentStatus>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.behavior.environments.clone())
    }

    async fn delete_project(&self, project_id: u64) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.deleted.lock().unwrap().push(project_id);
        Ok(())
    }

    async fn update_description(
        &self,
        project_id: u64,
        description: &str,
    ) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.descriptions
            .lock()
            .unwrap()
            .push((project_id, description.to_string()));
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .behavior
            .existing
            .iter()
            .map(|p| ProjectSummary {
                id: p.id,
                name: p.name.clone(),
                description: None,
                web_url: p.web_url.clone(),
                created_at: None,
                last_activity_at: None,
                visibility: Some("private".to_string()),
            })
            .collect())
    }

    async fn verify_credentials(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────

fn test_config() -> PortalConfig {
    PortalConfig {
        provider_url: "https://gitlab.yourdomain.com".to_string(),
        provider_token: "test-token".to_string(),
        default_registry_url: "nexus.yourdomain.com:8082".to_string(),
        default_webhook_url: "https://cicd-webhook.yourdomain.com/gitlab-webhook".to_string(),
        host: "127.0.0.1".to_string(),
        port: 5000,
        admin_token: Some("admin-token".to_string()),
    }
}

fn service(host: Arc<RecordingHost>) -> StandardOnboardingService {
    StandardOnboardingService::new(host, test_config())
}

fn billing_request() -> OnboardRequest {
    OnboardRequest {
        name: "billing-api".to_string(),
        description: "Billing backend".to_string(),
        team_contact: "billing@yourdomain.com".to_string(),
        framework: "python".to_string(),
        port: Some(8000),
        replicas: Some(2),
        memory_request: Some("256Mi".to_string()),
        ..Default::default()
    }
}

// ── Create workflow ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_workflow_pushes_six_artifacts() {
    let host = Arc::new(RecordingHost::default());
    let result = service(host.clone()).onboard(billing_request()).await;

    assert_eq!(result.status, WorkflowStatus::Success);
    let project = result.project.expect("project handle present");
    assert_eq!(project.id, 42);

    assert_eq!(
        result.artifacts_pushed,
        vec![
            ".gitlab-ci.yml",
            "Dockerfile",
            "deploy/deployment.yaml",
            "deploy/service.yaml",
            "deploy/ingress.yaml",
            "deploy/configmap.yaml",
        ]
    );
    assert_eq!(host.pushed_paths().len(), 6);

    let deployment = host.file_content("deploy/deployment.yaml").unwrap();
    assert!(deployment.contains("replicas: 2"));
    assert!(deployment.contains("containerPort: 8000"));
    assert!(deployment.contains("memory: \"256Mi\""));

    // Webhook got the configured default target.
    let webhooks = host.webhooks.lock().unwrap();
    assert_eq!(webhooks.len(), 1);
    assert_eq!(
        webhooks[0].1,
        "https://cicd-webhook.yourdomain.com/gitlab-webhook"
    );
}

#[tokio::test]
async fn test_missing_team_contact_aborts_before_any_provider_call() {
    let host = Arc::new(RecordingHost::default());
    let mut request = billing_request();
    request.team_contact = String::new();

    let result = service(host.clone()).onboard(request).await;

    assert_eq!(result.status, WorkflowStatus::Error);
    let failure = result.error.unwrap();
    assert_eq!(failure.kind, ErrorKind::Validation);
    assert!(failure.detail.contains("team_contact"));
    assert_eq!(host.provider_calls(), 0);
}

#[tokio::test]
async fn test_duplicate_name_surfaces_as_conflict() {
    let host = Arc::new(RecordingHost::new(HostBehavior {
        conflict_on_create: true,
        ..Default::default()
    }));
    let result = service(host).onboard(billing_request()).await;

    assert_eq!(result.status, WorkflowStatus::Error);
    let failure = result.error.unwrap();
    assert_eq!(failure.kind, ErrorKind::Conflict);
    assert_ne!(failure.kind, ErrorKind::ProjectCreation);
}

#[tokio::test]
async fn test_push_failure_leaves_prior_artifacts_in_place() {
    let host = Arc::new(RecordingHost::new(HostBehavior {
        fail_push_at: Some("deploy/service.yaml".to_string()),
        ..Default::default()
    }));
    let result = service(host.clone()).onboard(billing_request()).await;

    assert_eq!(result.status, WorkflowStatus::Error);
    let failure = result.error.as_ref().unwrap();
    assert_eq!(failure.kind, ErrorKind::ArtifactPush);
    assert!(failure.detail.contains("deploy/service.yaml"));

    // The project and everything pushed before the failure stay in place.
    assert!(result.project.is_some());
    assert_eq!(
        result.artifacts_pushed,
        vec![".gitlab-ci.yml", "Dockerfile", "deploy/deployment.yaml"]
    );
    assert!(host.deleted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_webhook_failure_aborts_after_artifacts_are_pushed() {
    let host = Arc::new(RecordingHost::new(HostBehavior {
        fail_webhook: true,
        ..Default::default()
    }));
    let result = service(host).onboard(billing_request()).await;

    assert_eq!(result.status, WorkflowStatus::Error);
    assert_eq!(result.error.unwrap().kind, ErrorKind::WebhookSetup);
    assert_eq!(result.artifacts_pushed.len(), 6);
}

#[tokio::test]
async fn test_raw_name_is_normalized_before_creation() {
    let host = Arc::new(RecordingHost::default());
    let mut request = billing_request();
    request.name = "My App!".to_string();

    let result = service(host.clone()).onboard(request).await;

    assert_eq!(result.status, WorkflowStatus::Success);
    assert_eq!(host.created.lock().unwrap()[0], "my-app-");
}

// ── Update workflow ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_replicas_repushes_only_manifests() {
    let host = Arc::new(RecordingHost::with_existing("billing-api", 42));
    let auth = AuthContext::authenticated("ops");
    let request = UpdateRequest {
        replicas: Some(5),
        ..Default::default()
    };

    let result = service(host.clone())
        .update(&auth, "billing-api", request)
        .await;

    assert_eq!(result.status, WorkflowStatus::Success);
    let paths = host.pushed_paths();
    assert_eq!(paths.len(), 4);
    assert!(paths.iter().all(|p| p.starts_with("deploy/")));

    let deployment = host.file_content("deploy/deployment.yaml").unwrap();
    assert!(deployment.contains("replicas: 5"));
}

#[tokio::test]
async fn test_update_framework_repushes_only_the_pipeline() {
    let host = Arc::new(RecordingHost::with_existing("billing-api", 42));
    let auth = AuthContext::authenticated("ops");
    let request = UpdateRequest {
        framework: Some("java".to_string()),
        ..Default::default()
    };

    let result = service(host.clone())
        .update(&auth, "billing-api", request)
        .await;

    assert_eq!(result.status, WorkflowStatus::Success);
    assert_eq!(host.pushed_paths(), vec![".gitlab-ci.yml"]);
    let pipeline = host.file_content(".gitlab-ci.yml").unwrap();
    assert!(pipeline.contains("JAVA_VERSION"));
}

#[tokio::test]
async fn test_update_description_only_touches_no_artifacts() {
    let host = Arc::new(RecordingHost::with_existing("billing-api", 42));
    let auth = AuthContext::authenticated("ops");
    let request = UpdateRequest {
        description: Some("Billing backend v2".to_string()),
        ..Default::default()
    };

    let result = service(host.clone())
        .update(&auth, "billing-api", request)
        .await;

    assert_eq!(result.status, WorkflowStatus::Success);
    assert!(host.pushed_paths().is_empty());
    assert_eq!(
        host.descriptions.lock().unwrap()[0],
        (42, "Billing backend v2".to_string())
    );
}

#[tokio::test]
async fn test_update_requires_authentication() {
    let host = Arc::new(RecordingHost::with_existing("billing-api", 42));
    let result = service(host)
        .update(&AuthContext::anonymous(), "billing-api", UpdateRequest::default())
        .await;

    assert_eq!(result.status, WorkflowStatus::Error);
    assert_eq!(result.error.unwrap().kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_update_unknown_application_is_not_found() {
    let host = Arc::new(RecordingHost::default());
    let result = service(host)
        .update(
            &AuthContext::authenticated("ops"),
            "ghost-app",
            UpdateRequest::default(),
        )
        .await;

    assert_eq!(result.error.unwrap().kind, ErrorKind::NotFound);
}

// ── Delete workflow ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let host = Arc::new(RecordingHost::with_existing("billing-api", 42));
    let auth = AuthContext::authenticated("ops");
    let svc = service(host.clone());

    let err = svc.delete(&auth, "billing-api", false).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(host.deleted.lock().unwrap().is_empty());

    svc.delete(&auth, "billing-api", true).await.unwrap();
    assert_eq!(*host.deleted.lock().unwrap(), vec![42u64]);
}

// ── Status workflow ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_reports_never_for_undeployed_environments() {
    let host = Arc::new(RecordingHost::new(HostBehavior {
        existing: vec![ProjectHandle {
            id: 42,
            web_url: "https://git.example/billing-api".to_string(),
            name: "billing-api".to_string(),
        }],
        environments: vec![
            EnvironmentStatus {
                name: "staging".to_string(),
                state: "available".to_string(),
                last_deployment_at: Some("2026-01-10T12:00:00Z".parse().unwrap()),
                external_url: Some("https://billing-api-staging.yourdomain.com".to_string()),
            },
            EnvironmentStatus {
                name: "production".to_string(),
                state: "stopped".to_string(),
                last_deployment_at: None,
                external_url: None,
            },
        ],
        ..Default::default()
    }));

    let report = service(host).status("billing-api").await.unwrap();
    assert_eq!(report.project_id, 42);
    assert_eq!(report.environments["production"].last_deployment, "Never");
    assert!(report.environments["staging"]
        .last_deployment
        .starts_with("2026-01-10"));
}

#[tokio::test]
async fn test_status_for_unknown_application_is_not_found() {
    let host = Arc::new(RecordingHost::default());
    let err = service(host).status("ghost-app").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ── REST surface ─────────────────────────────────────────────────────────

fn test_app(host: Arc<RecordingHost>) -> axum::Router {
    app(Arc::new(AppState {
        service: Arc::new(service(host)),
        admin_token: Some("admin-token".to_string()),
        start_time: Instant::now(),
    }))
}

#[tokio::test]
async fn test_onboard_endpoint_returns_project_urls() {
    let router = test_app(Arc::new(RecordingHost::default()));
    let body = serde_json::to_string(&billing_request()).unwrap();

    let response = router
        .oneshot(
            Request::post("/onboard")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["project_id"], 42);
    assert_eq!(
        payload["dev_url"],
        "https://billing-api-staging.yourdomain.com"
    );
    assert_eq!(payload["prod_url"], "https://billing-api.yourdomain.com");
}

#[tokio::test]
async fn test_onboard_endpoint_maps_validation_to_400() {
    let router = test_app(Arc::new(RecordingHost::default()));
    let mut request = billing_request();
    request.team_contact = String::new();
    let body = serde_json::to_string(&request).unwrap();

    let response = router
        .oneshot(
            Request::post("/onboard")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["kind"], "validation");
    assert!(payload["message"].as_str().unwrap().contains("team_contact"));
}

#[tokio::test]
async fn test_duplicate_onboard_maps_to_409() {
    let router = test_app(Arc::new(RecordingHost::new(HostBehavior {
        conflict_on_create: true,
        ..Default::default()
    })));
    let body = serde_json::to_string(&billing_request()).unwrap();

    let response = router
        .oneshot(
            Request::post("/onboard")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_status_endpoint_for_unknown_app_is_404() {
    let router = test_app(Arc::new(RecordingHost::default()));
    let response = router
        .oneshot(
            Request::get("/status/ghost-app")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_token_is_401() {
    let router = test_app(Arc::new(RecordingHost::with_existing("billing-api", 42)));
    let response = router
        .oneshot(
            Request::delete("/applications/billing-api?confirm=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_without_confirm_is_400() {
    let router = test_app(Arc::new(RecordingHost::with_existing("billing-api", 42)));
    let response = router
        .oneshot(
            Request::delete("/applications/billing-api")
                .header(header::AUTHORIZATION, "Bearer admin-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_endpoint_requires_and_accepts_token() {
    let router = test_app(Arc::new(RecordingHost::with_existing("billing-api", 42)));

    let response = router
        .clone()
        .oneshot(
            Request::get("/applications")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router
        .oneshot(
            Request::get("/applications")
                .header(header::AUTHORIZATION, "Bearer admin-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["total"], 1);
}

#[tokio::test]
async fn test_templates_endpoint_is_public() {
    let router = test_app(Arc::new(RecordingHost::default()));
    let response = router
        .oneshot(Request::get("/templates").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload.as_array().unwrap().len(), 4);
}
