// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Portal REST Surface
//!
//! JSON-in/JSON-out routes over the onboarding service. Authenticated routes
//! build an explicit [`AuthContext`] from the `Authorization` header on every
//! request; there is no session state. A catch-panic boundary guarantees
//! that even an unhandled failure becomes a structured 500 with a
//! correlation id.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;
use uuid::Uuid;

use crate::application::onboarding_service::OnboardingService;
use crate::domain::descriptor::{OnboardRequest, UpdateRequest};
use crate::domain::onboarding::{AuthContext, OnboardingError, OnboardingResult};
use crate::presentation::reporter::ApiError;

pub struct AppState {
    pub service: Arc<dyn OnboardingService>,
    pub admin_token: Option<String>,
    pub start_time: Instant,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/templates", get(templates))
        .route("/onboard", post(onboard))
        .route("/status/{name}", get(status))
        .route("/applications", get(list_applications))
        .route(
            "/applications/{name}",
            put(update_application).delete(delete_application),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the per-request auth context. Fails closed: without a configured
/// admin token no request can authenticate.
fn auth_context(admin_token: Option<&str>, headers: &HeaderMap) -> AuthContext {
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match (admin_token, presented) {
        (Some(expected), Some(given)) if expected == given => {
            AuthContext::authenticated("portal-admin")
        }
        _ => AuthContext::anonymous(),
    }
}

fn staging_url(name: &str) -> String {
    format!("https://{name}-staging.yourdomain.com")
}

fn production_url(name: &str) -> String {
    format!("https://{name}.yourdomain.com")
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

async fn templates(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!(state.service.templates()))
}

async fn onboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OnboardRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = state.service.onboard(request).await;
    let project = success_project(result)?;

    Ok(Json(json!({
        "status": "success",
        "project_id": project.id,
        "project_url": project.web_url,
        "dev_url": staging_url(&project.name),
        "prod_url": production_url(&project.name),
    })))
}

async fn status(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let report = state.service.status(&name).await?;
    Ok(Json(json!({
        "status": "success",
        "app_name": report.name,
        "project_id": report.project_id,
        "environments": report.environments,
    })))
}

async fn update_application(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    let auth = auth_context(state.admin_token.as_deref(), &headers);
    let result = state.service.update(&auth, &name, request).await;
    let project = success_project(result)?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("Application {name} updated successfully"),
        "project_url": project.web_url,
    })))
}

#[derive(Debug, Deserialize)]
struct DeleteParams {
    confirm: Option<String>,
}

async fn delete_application(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Value>, ApiError> {
    let auth = auth_context(state.admin_token.as_deref(), &headers);
    let confirmed = params.confirm.as_deref() == Some("true");
    state.service.delete(&auth, &name, confirmed).await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("Application {name} deleted successfully"),
    })))
}

async fn list_applications(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let auth = auth_context(state.admin_token.as_deref(), &headers);
    let applications = state.service.list(&auth).await?;

    Ok(Json(json!({
        "status": "success",
        "total": applications.len(),
        "applications": applications,
    })))
}

/// Unwrap a terminal workflow result into its project handle, or translate
/// the failure into an external response.
fn success_project(
    result: OnboardingResult,
) -> Result<crate::domain::project::ProjectHandle, ApiError> {
    if let Some(failure) = &result.error {
        return Err(ApiError::from_failure(failure));
    }
    result.project.ok_or_else(|| {
        ApiError::from_error(&OnboardingError::Unexpected(
            "workflow returned no project".to_string(),
        ))
    })
}

/// Last-resort boundary: a panic anywhere below still yields a structured
/// response and a correlation id, with the panic payload only in the log.
fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };

    let correlation_id = Uuid::new_v4();
    error!(%correlation_id, detail = %detail, "handler panicked");

    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "status": "error",
            "kind": "unexpected",
            "message": "An unexpected error occurred",
            "correlation_id": correlation_id.to_string(),
        })),
    )
        .into_response()
}
