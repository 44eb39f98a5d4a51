// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Portal Configuration
//!
//! Environment-driven configuration for the portal process. The provider
//! access token is the one hard requirement: without it the portal cannot do
//! anything, so its absence is a fatal startup error rather than a per-request
//! failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PROVIDER_URL: &str = "https://gitlab.yourdomain.com";
pub const DEFAULT_REGISTRY_URL: &str = "nexus.yourdomain.com:8082";
pub const DEFAULT_WEBHOOK_URL: &str = "https://cicd-webhook.yourdomain.com/gitlab-webhook";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Process configuration, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Provider base URL, e.g. `https://gitlab.yourdomain.com`.
    pub provider_url: String,
    /// Provider access token. Required.
    pub provider_token: String,
    /// Registry that built images are pushed to when a descriptor does not
    /// name one.
    pub default_registry_url: String,
    /// Deployment webhook target when a descriptor does not name one.
    pub default_webhook_url: String,
    /// Bind address for the REST surface.
    pub host: String,
    pub port: u16,
    /// Bearer token for the authenticated routes. When unset, those routes
    /// fail closed with 401.
    pub admin_token: Option<String>,
}

impl PortalConfig {
    /// Load from the process environment. `.env` loading (dotenvy) is the
    /// binary's job; this reads whatever is already in the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider_token = match std::env::var("GITLAB_TOKEN") {
            Ok(t) if !t.trim().is_empty() => t,
            _ => return Err(ConfigError::MissingVar("GITLAB_TOKEN")),
        };

        let port = match std::env::var("PORTAL_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORTAL_PORT",
                message: e.to_string(),
            })?,
            Err(_) => 5000,
        };

        Ok(Self {
            provider_url: env_or("GITLAB_URL", DEFAULT_PROVIDER_URL),
            provider_token,
            default_registry_url: env_or("REGISTRY_URL", DEFAULT_REGISTRY_URL),
            default_webhook_url: env_or("WEBHOOK_URL", DEFAULT_WEBHOOK_URL),
            host: env_or("PORTAL_HOST", "0.0.0.0"),
            port,
            admin_token: std::env::var("PORTAL_ADMIN_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; keep them serialized by testing
    // only the pure pieces here.

    #[test]
    fn test_defaults_are_well_formed() {
        assert!(DEFAULT_PROVIDER_URL.starts_with("https://"));
        assert!(DEFAULT_WEBHOOK_URL.starts_with("https://"));
        assert!(!DEFAULT_REGISTRY_URL.is_empty());
    }
}
