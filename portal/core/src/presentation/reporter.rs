// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Status/Error Reporter
//!
//! Maps workflow outcomes onto the external response contract. Client errors
//! (4xx) echo the failure detail; server errors (5xx) return an opaque
//! per-kind message plus a correlation id, with the full underlying cause
//! written to the internal log only. Raw provider bodies never travel
//! further than the optional `details` field.
//!
//! # Architecture
//!
//! - **Layer:** Presentation
//! - **Purpose:** ErrorKind → HTTP status + response body

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::domain::onboarding::{ErrorKind, OnboardingError, WorkflowFailure};

/// External HTTP status for each failure kind.
pub fn status_code(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::ProjectCreation
        | ErrorKind::ArtifactPush
        | ErrorKind::WebhookSetup
        | ErrorKind::ProviderUnavailable
        | ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Opaque message used for server-side failures instead of the real cause.
fn opaque_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::ProjectCreation => "Failed to create project",
        ErrorKind::ArtifactPush => "Failed to add files to repository",
        ErrorKind::WebhookSetup => "Failed to set up webhook",
        ErrorKind::ProviderUnavailable => "Unable to reach the project host",
        _ => "An unexpected error occurred",
    }
}

/// Fully assembled error response.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
    pub correlation_id: Option<Uuid>,
}

impl ApiError {
    /// Build the external view of a workflow failure, logging the full
    /// detail internally when the external body will not carry it.
    pub fn from_failure(failure: &WorkflowFailure) -> Self {
        let status = status_code(failure.kind);

        if status.is_server_error() {
            let correlation_id = Uuid::new_v4();
            error!(
                kind = ?failure.kind,
                %correlation_id,
                detail = %failure.detail,
                "workflow failed"
            );
            return Self {
                kind: failure.kind,
                status,
                message: opaque_message(failure.kind).to_string(),
                details: None,
                correlation_id: Some(correlation_id),
            };
        }

        // Conflicts keep a generic message; the provider's reason rides in
        // the details field.
        if failure.kind == ErrorKind::Conflict {
            return Self {
                kind: failure.kind,
                status,
                message: "Project already exists".to_string(),
                details: Some(failure.detail.clone()),
                correlation_id: None,
            };
        }

        Self {
            kind: failure.kind,
            status,
            message: failure.detail.clone(),
            details: None,
            correlation_id: None,
        }
    }

    pub fn from_error(err: &OnboardingError) -> Self {
        Self::from_failure(&WorkflowFailure {
            kind: err.kind(),
            detail: err.to_string(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "status": "error",
            "kind": self.kind,
            "message": self.message,
        });
        if let Some(details) = self.details {
            body["details"] = json!(details);
        }
        if let Some(id) = self.correlation_id {
            body["correlation_id"] = json!(id.to_string());
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<&OnboardingError> for ApiError {
    fn from(err: &OnboardingError) -> Self {
        Self::from_error(err)
    }
}

impl From<OnboardingError> for ApiError {
    fn from(err: OnboardingError) -> Self {
        Self::from_error(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provider::ProviderError;

    #[test]
    fn test_status_code_table() {
        assert_eq!(status_code(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_code(ErrorKind::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_code(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_code(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_code(ErrorKind::ArtifactPush),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_errors_echo_the_field() {
        let err = OnboardingError::Validation("missing required field: team_contact".to_string());
        let api = ApiError::from_error(&err);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert!(api.message.contains("team_contact"));
        assert!(api.correlation_id.is_none());
    }

    #[test]
    fn test_server_errors_are_opaque_with_correlation_id() {
        let err = OnboardingError::ProjectCreation {
            source: ProviderError::Http {
                status: 503,
                message: "secret provider internals".to_string(),
            },
        };
        let api = ApiError::from_error(&err);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.message.contains("secret provider internals"));
        assert!(api.details.is_none());
        assert!(api.correlation_id.is_some());
    }

    #[test]
    fn test_conflict_keeps_reason_in_details_only() {
        let err = OnboardingError::Conflict {
            name: "billing-api".to_string(),
            message: "has already been taken".to_string(),
        };
        let api = ApiError::from_error(&err);
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.message, "Project already exists");
        assert!(api.details.unwrap().contains("has already been taken"));
    }
}
