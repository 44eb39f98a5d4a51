// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Template Catalog
//!
//! Read-only catalog of onboarding options shown to users before they submit
//! a descriptor. Loaded once at startup; the orchestrator never mutates it.

use serde::{Deserialize, Serialize};

/// One onboarding option: a starting point the portal knows how to wire up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Stable identifier, doubles as the framework tag to submit.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Port pre-filled in the onboarding form.
    pub default_port: u16,
    /// Frameworks this template is known to work with.
    pub frameworks: Vec<String>,
}

/// The builtin catalog. Order is presentation order.
pub fn builtin_templates() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            id: "nodejs".to_string(),
            name: "Node.js Application".to_string(),
            description: "JavaScript runtime for server-side applications".to_string(),
            default_port: 3000,
            frameworks: vec![
                "Express".to_string(),
                "Koa".to_string(),
                "NestJS".to_string(),
                "React (SSR)".to_string(),
            ],
        },
        TemplateInfo {
            id: "python".to_string(),
            name: "Python Application".to_string(),
            description: "Python-based backend service or API".to_string(),
            default_port: 8000,
            frameworks: vec![
                "FastAPI".to_string(),
                "Flask".to_string(),
                "Django".to_string(),
            ],
        },
        TemplateInfo {
            id: "java".to_string(),
            name: "Java Application".to_string(),
            description: "Enterprise Java service with Spring Boot".to_string(),
            default_port: 8080,
            frameworks: vec![
                "Spring Boot".to_string(),
                "Quarkus".to_string(),
                "Micronaut".to_string(),
            ],
        },
        TemplateInfo {
            id: "react".to_string(),
            name: "React Frontend".to_string(),
            description: "React single page application".to_string(),
            default_port: 3000,
            frameworks: vec!["React".to_string(), "Next.js".to_string()],
        },
    ]
}
