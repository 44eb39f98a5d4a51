// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Launchpad Portal Core
//!
//! Core library for the 1-click application onboarding portal: turns a short
//! application descriptor into a GitLab project with a generated CI/CD
//! pipeline, container build file, and Kubernetes deployment manifests.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Onboarding workflows, artifact generation, provider access

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
