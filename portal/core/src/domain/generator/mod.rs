// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Artifact Template Engine
//!
//! Pure function family `(ApplicationDescriptor) -> Artifact`, one generator
//! per artifact kind, each dispatching on the descriptor's [`Framework`] tag.
//! The dispatch is an explicit match over a closed enum; unknown framework
//! tags were already resolved to `Framework::Generic` at parse time, so
//! generation itself cannot fail.
//!
//! Determinism contract: identical descriptors produce byte-identical
//! output. Generators read nothing but the descriptor: no clocks, no
//! randomness, no configuration.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Framework-specific pipeline, build-file, and manifest text

mod dockerfile;
mod manifests;
mod pipeline;

use crate::domain::artifact::{Artifact, ArtifactKind};
use crate::domain::descriptor::ApplicationDescriptor;
use crate::domain::portal_config::DEFAULT_REGISTRY_URL;

pub const PIPELINE_PATH: &str = ".gitlab-ci.yml";
pub const BUILD_FILE_PATH: &str = "Dockerfile";
pub const DEPLOYMENT_PATH: &str = "deploy/deployment.yaml";
pub const SERVICE_PATH: &str = "deploy/service.yaml";
pub const INGRESS_PATH: &str = "deploy/ingress.yaml";
pub const CONFIGMAP_PATH: &str = "deploy/configmap.yaml";

/// CI/CD pipeline definition for the descriptor's framework.
pub fn generate_pipeline(descriptor: &ApplicationDescriptor) -> Artifact {
    Artifact::new(
        ArtifactKind::Pipeline,
        PIPELINE_PATH,
        pipeline::render(descriptor),
    )
}

/// Container build file for the descriptor's framework.
pub fn generate_build_file(descriptor: &ApplicationDescriptor) -> Artifact {
    Artifact::new(
        ArtifactKind::BuildFile,
        BUILD_FILE_PATH,
        dockerfile::render(descriptor),
    )
}

/// The four Kubernetes manifests, in push order: deployment, service,
/// ingress, configmap.
pub fn generate_manifests(descriptor: &ApplicationDescriptor) -> Vec<Artifact> {
    vec![
        Artifact::new(
            ArtifactKind::Manifest,
            DEPLOYMENT_PATH,
            manifests::deployment(descriptor),
        ),
        Artifact::new(
            ArtifactKind::Manifest,
            SERVICE_PATH,
            manifests::service(descriptor),
        ),
        Artifact::new(
            ArtifactKind::Manifest,
            INGRESS_PATH,
            manifests::ingress(descriptor),
        ),
        Artifact::new(
            ArtifactKind::Manifest,
            CONFIGMAP_PATH,
            manifests::configmap(descriptor),
        ),
    ]
}

/// Everything the create workflow pushes, in push order: pipeline, build
/// file, then the four manifests. Always exactly six artifacts.
pub fn generate_all(descriptor: &ApplicationDescriptor) -> Vec<Artifact> {
    let mut artifacts = vec![
        generate_pipeline(descriptor),
        generate_build_file(descriptor),
    ];
    artifacts.extend(generate_manifests(descriptor));
    artifacts
}

/// Image registry the pipeline pushes to.
fn registry_url(descriptor: &ApplicationDescriptor) -> &str {
    descriptor
        .registry_url
        .as_deref()
        .unwrap_or(DEFAULT_REGISTRY_URL)
}
