// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application Descriptor
//!
//! The validated onboarding request. Raw wire payloads (`OnboardRequest`,
//! `UpdateRequest`) are checked and normalized into an
//! [`ApplicationDescriptor`] before any provider call is made; a descriptor
//! that exists is by construction safe to feed to the artifact generators.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Request validation, name normalization, field defaulting

use serde::{Deserialize, Serialize};

use crate::domain::framework::Framework;
use crate::domain::onboarding::OnboardingError;

/// Memory sizes the portal accepts for requests and limits.
pub const MEMORY_UNITS: [&str; 5] = ["128Mi", "256Mi", "512Mi", "1Gi", "2Gi"];

/// CPU sizes the portal accepts for requests and limits.
pub const CPU_UNITS: [&str; 5] = ["50m", "100m", "200m", "500m", "1000m"];

const DEFAULT_REPLICAS: u32 = 3;
const DEFAULT_MEMORY_REQUEST: &str = "256Mi";
const DEFAULT_MEMORY_LIMIT: &str = "512Mi";
const DEFAULT_CPU_REQUEST: &str = "100m";
const DEFAULT_CPU_LIMIT: &str = "500m";

/// Raw create-workflow payload as received over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub team_contact: String,
    #[serde(default)]
    pub framework: String,
    pub port: Option<u16>,
    pub replicas: Option<u32>,
    pub memory_request: Option<String>,
    pub memory_limit: Option<String>,
    pub cpu_request: Option<String>,
    pub cpu_limit: Option<String>,
    pub node_version: Option<String>,
    pub python_version: Option<String>,
    pub java_version: Option<String>,
    pub registry_url: Option<String>,
    pub webhook_url: Option<String>,
}

/// Raw update-workflow payload. Every field is optional; only the artifacts
/// affected by the supplied fields are regenerated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub description: Option<String>,
    pub framework: Option<String>,
    pub port: Option<u16>,
    pub replicas: Option<u32>,
    pub memory_request: Option<String>,
    pub memory_limit: Option<String>,
    pub cpu_request: Option<String>,
    pub cpu_limit: Option<String>,
    pub node_version: Option<String>,
    pub python_version: Option<String>,
    pub java_version: Option<String>,
    pub registry_url: Option<String>,
    pub webhook_url: Option<String>,
}

impl UpdateRequest {
    /// Whether the update touches any field that flows into the deployment
    /// manifests (replicas, resources, port).
    pub fn changes_manifests(&self) -> bool {
        self.replicas.is_some()
            || self.port.is_some()
            || self.memory_request.is_some()
            || self.memory_limit.is_some()
            || self.cpu_request.is_some()
            || self.cpu_limit.is_some()
    }
}

/// Validated, normalized onboarding request.
///
/// Invariant: `name` is already normalized (lowercase alphanumeric with
/// dashes) and every resource field holds a whitelisted unit string. The
/// name is immutable once a project exists for it; re-onboarding the same
/// name is an update, never a second create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDescriptor {
    pub name: String,
    pub description: String,
    pub team_contact: String,
    pub framework: Framework,
    pub port: u16,
    pub replica_count: u32,
    pub memory_request: String,
    pub memory_limit: String,
    pub cpu_request: String,
    pub cpu_limit: String,
    pub node_version: Option<String>,
    pub python_version: Option<String>,
    pub java_version: Option<String>,
    pub registry_url: Option<String>,
    pub webhook_url: Option<String>,
}

impl ApplicationDescriptor {
    /// Validate and normalize a raw create request.
    ///
    /// Runs before any provider call: a request that fails here never
    /// touches the network.
    pub fn from_request(req: OnboardRequest) -> Result<Self, OnboardingError> {
        require_field("name", &req.name)?;
        require_field("description", &req.description)?;
        require_field("team_contact", &req.team_contact)?;
        require_field("framework", &req.framework)?;

        let framework: Framework = req.framework.parse().unwrap_or(Framework::Generic);
        let name = normalize_name(&req.name);

        let port = match req.port {
            Some(0) => {
                return Err(OnboardingError::Validation(
                    "field 'port' must be a positive integer".to_string(),
                ))
            }
            Some(p) => p,
            None => framework.default_port(),
        };

        let replica_count = match req.replicas {
            Some(0) => {
                return Err(OnboardingError::Validation(
                    "field 'replicas' must be a positive integer".to_string(),
                ))
            }
            Some(r) => r,
            None => DEFAULT_REPLICAS,
        };

        Ok(Self {
            name,
            description: req.description,
            team_contact: req.team_contact,
            framework,
            port,
            replica_count,
            memory_request: memory_unit("memory_request", req.memory_request, DEFAULT_MEMORY_REQUEST)?,
            memory_limit: memory_unit("memory_limit", req.memory_limit, DEFAULT_MEMORY_LIMIT)?,
            cpu_request: cpu_unit("cpu_request", req.cpu_request, DEFAULT_CPU_REQUEST)?,
            cpu_limit: cpu_unit("cpu_limit", req.cpu_limit, DEFAULT_CPU_LIMIT)?,
            node_version: req.node_version,
            python_version: req.python_version,
            java_version: req.java_version,
            registry_url: req.registry_url,
            webhook_url: req.webhook_url,
        })
    }

    /// Build a descriptor for an update run: the project name is already
    /// known, everything the caller did not supply keeps its default.
    pub fn from_update(name: &str, req: &UpdateRequest) -> Result<Self, OnboardingError> {
        let framework: Framework = req
            .framework
            .as_deref()
            .map(|f| f.parse().unwrap_or(Framework::Generic))
            .unwrap_or(Framework::Generic);

        Ok(Self {
            name: normalize_name(name),
            description: req.description.clone().unwrap_or_default(),
            team_contact: String::new(),
            framework,
            port: match req.port {
                Some(0) => {
                    return Err(OnboardingError::Validation(
                        "field 'port' must be a positive integer".to_string(),
                    ))
                }
                Some(p) => p,
                None => framework.default_port(),
            },
            replica_count: match req.replicas {
                Some(0) => {
                    return Err(OnboardingError::Validation(
                        "field 'replicas' must be a positive integer".to_string(),
                    ))
                }
                Some(r) => r,
                None => DEFAULT_REPLICAS,
            },
            memory_request: memory_unit("memory_request", req.memory_request.clone(), DEFAULT_MEMORY_REQUEST)?,
            memory_limit: memory_unit("memory_limit", req.memory_limit.clone(), DEFAULT_MEMORY_LIMIT)?,
            cpu_request: cpu_unit("cpu_request", req.cpu_request.clone(), DEFAULT_CPU_REQUEST)?,
            cpu_limit: cpu_unit("cpu_limit", req.cpu_limit.clone(), DEFAULT_CPU_LIMIT)?,
            node_version: req.node_version.clone(),
            python_version: req.python_version.clone(),
            java_version: req.java_version.clone(),
            registry_url: req.registry_url.clone(),
            webhook_url: req.webhook_url.clone(),
        })
    }

    /// Runtime version override matching the descriptor's framework, if any.
    pub fn runtime_version(&self) -> Option<&str> {
        match self.framework {
            Framework::Nodejs => self.node_version.as_deref(),
            Framework::Python => self.python_version.as_deref(),
            Framework::Java => self.java_version.as_deref(),
            Framework::Generic => None,
        }
    }
}

/// Normalize a raw application name: lowercase, any character that is not
/// ASCII-alphanumeric or a dash becomes a dash. Idempotent.
pub fn normalize_name(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}

fn require_field(field: &str, value: &str) -> Result<(), OnboardingError> {
    if value.trim().is_empty() {
        return Err(OnboardingError::Validation(format!(
            "missing required field: {field}"
        )));
    }
    Ok(())
}

fn memory_unit(
    field: &str,
    value: Option<String>,
    default: &str,
) -> Result<String, OnboardingError> {
    validate_unit(field, value, default, &MEMORY_UNITS)
}

fn cpu_unit(field: &str, value: Option<String>, default: &str) -> Result<String, OnboardingError> {
    validate_unit(field, value, default, &CPU_UNITS)
}

fn validate_unit(
    field: &str,
    value: Option<String>,
    default: &str,
    allowed: &[&str],
) -> Result<String, OnboardingError> {
    match value {
        None => Ok(default.to_string()),
        Some(v) if allowed.contains(&v.as_str()) => Ok(v),
        Some(v) => Err(OnboardingError::Validation(format!(
            "field '{field}' must be one of {allowed:?}, got '{v}'"
        ))),
    }
}
