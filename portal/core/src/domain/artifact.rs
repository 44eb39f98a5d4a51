// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Generated Artifacts
//!
//! One artifact is one file destined for the onboarded project. Artifacts
//! are immutable once produced; generation is a pure function of the
//! descriptor, so generating twice yields byte-identical content.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// CI/CD pipeline definition (`.gitlab-ci.yml`).
    Pipeline,
    /// Container build file (`Dockerfile`).
    BuildFile,
    /// Kubernetes deployment manifest under `deploy/`.
    Manifest,
}

/// A generated file: path inside the project plus its full text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub target_path: String,
    pub content: String,
    pub kind: ArtifactKind,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, target_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            content: content.into(),
            kind,
        }
    }

    /// Commit message used when this artifact is pushed to the provider.
    pub fn commit_message(&self) -> String {
        format!("Add {} via 1-click onboarding", self.target_path)
    }
}
