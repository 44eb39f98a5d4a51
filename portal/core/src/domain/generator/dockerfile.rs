// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Container Build-File Generators
//!
//! Base image per framework (with a pinned default runtime version), fixed
//! working directory, dependency install before source copy so the layer
//! cache survives source-only changes, and an `EXPOSE` line carrying the
//! descriptor's port.

use crate::domain::descriptor::ApplicationDescriptor;
use crate::domain::framework::Framework;

pub(super) fn render(descriptor: &ApplicationDescriptor) -> String {
    match descriptor.framework {
        Framework::Nodejs => nodejs(descriptor),
        Framework::Python => python(descriptor),
        Framework::Java => java(descriptor),
        Framework::Generic => generic(descriptor),
    }
}

fn nodejs(d: &ApplicationDescriptor) -> String {
    format!(
        r#"# Container build for {name}
FROM node:{version}-alpine

WORKDIR /app

COPY package*.json ./
RUN npm ci --only=production

COPY . .

EXPOSE {port}
CMD ["npm", "start"]
"#,
        name = d.name,
        version = d.runtime_version().unwrap_or("18"),
        port = d.port,
    )
}

fn python(d: &ApplicationDescriptor) -> String {
    format!(
        r#"# Container build for {name}
FROM python:{version}-slim

WORKDIR /app

COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

COPY . .

EXPOSE {port}
CMD ["python", "app.py"]
"#,
        name = d.name,
        version = d.runtime_version().unwrap_or("3.11"),
        port = d.port,
    )
}

fn java(d: &ApplicationDescriptor) -> String {
    let version = d.runtime_version().unwrap_or("17");
    format!(
        r#"# Container build for {name}
FROM gradle:{version}-jdk AS build
WORKDIR /app
COPY . .
RUN gradle build --no-daemon

FROM openjdk:{version}-slim
WORKDIR /app
COPY --from=build /app/build/libs/*.jar app.jar
EXPOSE {port}
CMD ["java", "-jar", "app.jar"]
"#,
        name = d.name,
        version = version,
        port = d.port,
    )
}

fn generic(d: &ApplicationDescriptor) -> String {
    format!(
        r#"# Container build for {name}
FROM alpine:latest

WORKDIR /app
COPY . .

EXPOSE {port}
CMD ["echo", "Replace with your application start command"]
"#,
        name = d.name,
        port = d.port,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::descriptor::OnboardRequest;

    fn descriptor(framework: &str, port: Option<u16>) -> ApplicationDescriptor {
        ApplicationDescriptor::from_request(OnboardRequest {
            name: "billing-api".to_string(),
            description: "Billing service".to_string(),
            team_contact: "billing@yourdomain.com".to_string(),
            framework: framework.to_string(),
            port,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_expose_uses_descriptor_port() {
        let build = render(&descriptor("python", Some(9090)));
        assert!(build.contains("EXPOSE 9090"));
    }

    #[test]
    fn test_base_image_tracks_runtime_version() {
        let mut desc = descriptor("nodejs", None);
        desc.node_version = Some("20".to_string());
        assert!(render(&desc).contains("FROM node:20-alpine"));

        let desc = descriptor("nodejs", None);
        assert!(render(&desc).contains("FROM node:18-alpine"));
    }

    #[test]
    fn test_dependency_install_precedes_source_copy() {
        for framework in ["nodejs", "python"] {
            let build = render(&descriptor(framework, None));
            let install = build
                .find("RUN ")
                .expect("dependency install step present");
            let copy_all = build.find("COPY . .").expect("source copy present");
            assert!(install < copy_all, "{framework} copies source before deps");
        }
    }

    #[test]
    fn test_unknown_framework_gets_generic_build_file() {
        let build = render(&descriptor("cobol", None));
        assert!(build.contains("FROM alpine:latest"));
    }
}
