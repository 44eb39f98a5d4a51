// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Pipeline Generators
//!
//! One pipeline strategy per framework. Contract for every strategy: a build
//! stage tagging the image with both the commit SHA and `latest`, a staging
//! deploy on `main` and `develop`, and a production deploy gated on manual
//! approval and restricted to `main`. Framework strategies add validate,
//! test, and security-scan stages in front; the generic strategy skips the
//! framework-specific ones.

use crate::domain::descriptor::ApplicationDescriptor;
use crate::domain::framework::Framework;

use super::registry_url;

pub(super) fn render(descriptor: &ApplicationDescriptor) -> String {
    match descriptor.framework {
        Framework::Nodejs => nodejs(descriptor),
        Framework::Python => python(descriptor),
        Framework::Java => java(descriptor),
        Framework::Generic => generic(descriptor),
    }
}

fn nodejs(d: &ApplicationDescriptor) -> String {
    let version = d.runtime_version().unwrap_or("18");
    format!(
        r#"# CI/CD pipeline for {name}
# Generated by the Launchpad onboarding portal

stages:
  - validate
  - test
  - security-scan
  - build
  - deploy-staging
  - deploy-production

variables:
  NODE_VERSION: "{version}"
  APP_NAME: "{name}"
  DOCKER_REGISTRY: "{registry}"

cache:
  paths:
    - node_modules/

validate:
  stage: validate
  image: node:$NODE_VERSION
  script:
    - npm ci
    - npm run lint || echo "Linting step skipped"
    - npm run type-check || echo "Type checking skipped"

test:
  stage: test
  image: node:$NODE_VERSION
  script:
    - npm ci
    - npm test || echo "No tests found"
  coverage: '/Lines\s*:\s*(\d+\.?\d*)%/'
  artifacts:
    reports:
      coverage_report:
        coverage_format: cobertura
        path: coverage/cobertura-coverage.xml

security-scan:
  stage: security-scan
  image: node:$NODE_VERSION
  script:
    - npm audit --audit-level high || echo "Vulnerabilities found"
    - npx retire --severity high || echo "Outdated packages found"

{build}
{deploy}"#,
        name = d.name,
        version = version,
        registry = registry_url(d),
        build = build_job(),
        deploy = deploy_jobs(),
    )
}

fn python(d: &ApplicationDescriptor) -> String {
    let version = d.runtime_version().unwrap_or("3.11");
    format!(
        r#"# CI/CD pipeline for {name}
# Generated by the Launchpad onboarding portal

stages:
  - validate
  - test
  - security-scan
  - build
  - deploy-staging
  - deploy-production

variables:
  PYTHON_VERSION: "{version}"
  APP_NAME: "{name}"
  DOCKER_REGISTRY: "{registry}"

validate:
  stage: validate
  image: python:$PYTHON_VERSION
  script:
    - pip install flake8 black
    - flake8 . || echo "Linting issues found"
    - black --check . || echo "Formatting issues found"

test:
  stage: test
  image: python:$PYTHON_VERSION
  script:
    - pip install -r requirements.txt
    - pip install pytest pytest-cov
    - python -m pytest --cov=./ --cov-report=xml
  coverage: '/TOTAL.+ ([0-9]{{1,3}}%)/'
  artifacts:
    reports:
      coverage_report:
        coverage_format: cobertura
        path: coverage.xml

security-scan:
  stage: security-scan
  image: python:$PYTHON_VERSION
  script:
    - pip install safety
    - safety check || echo "Vulnerabilities found"

{build}
{deploy}"#,
        name = d.name,
        version = version,
        registry = registry_url(d),
        build = build_job(),
        deploy = deploy_jobs(),
    )
}

fn java(d: &ApplicationDescriptor) -> String {
    let version = d.runtime_version().unwrap_or("17");
    format!(
        r#"# CI/CD pipeline for {name}
# Generated by the Launchpad onboarding portal

stages:
  - validate
  - test
  - security-scan
  - build
  - deploy-staging
  - deploy-production

variables:
  JAVA_VERSION: "{version}"
  APP_NAME: "{name}"
  DOCKER_REGISTRY: "{registry}"

validate:
  stage: validate
  image: gradle:jdk$JAVA_VERSION
  script:
    - gradle checkstyleMain || echo "Checkstyle issues found"
    - gradle spotlessCheck || echo "Formatting issues found"

test:
  stage: test
  image: gradle:jdk$JAVA_VERSION
  script:
    - gradle test jacocoTestReport
  coverage: '/Total.*?([0-9]{{1,3}})%/'
  artifacts:
    reports:
      junit: build/test-results/test/**/TEST-*.xml
    paths:
      - build/reports/jacoco/

security-scan:
  stage: security-scan
  image: gradle:jdk$JAVA_VERSION
  script:
    - gradle dependencyCheckAnalyze || echo "Vulnerabilities found"

{build}
{deploy}"#,
        name = d.name,
        version = version,
        registry = registry_url(d),
        build = build_job(),
        deploy = deploy_jobs(),
    )
}

fn generic(d: &ApplicationDescriptor) -> String {
    format!(
        r#"# CI/CD pipeline for {name}
# Generated by the Launchpad onboarding portal

stages:
  - validate
  - build
  - deploy-staging
  - deploy-production

variables:
  APP_NAME: "{name}"
  DOCKER_REGISTRY: "{registry}"

{build}
{deploy}"#,
        name = d.name,
        registry = registry_url(d),
        build = build_job(),
        deploy = deploy_jobs(),
    )
}

/// Build job shared by every strategy. Pushes the commit-SHA tag and then
/// re-tags it as `latest`.
fn build_job() -> &'static str {
    r#"build:
  stage: build
  image: docker:24.0
  services:
    - docker:24.0-dind
  script:
    - echo "$DOCKER_PASSWORD" | docker login -u "$DOCKER_USERNAME" --password-stdin $DOCKER_REGISTRY
    - docker build -t $DOCKER_REGISTRY/$APP_NAME:$CI_COMMIT_SHA .
    - docker push $DOCKER_REGISTRY/$APP_NAME:$CI_COMMIT_SHA
    - docker tag $DOCKER_REGISTRY/$APP_NAME:$CI_COMMIT_SHA $DOCKER_REGISTRY/$APP_NAME:latest
    - docker push $DOCKER_REGISTRY/$APP_NAME:latest"#
}

/// Deploy jobs shared by every strategy. Staging tracks `main` and the
/// `develop` integration branch; production is manual and main-only.
fn deploy_jobs() -> &'static str {
    r#"deploy-staging:
  stage: deploy-staging
  image: bitnami/kubectl:latest
  script:
    - kubectl create namespace apps-staging --dry-run=client -o yaml | kubectl apply -f -
    - sed -e "s|__IMAGE__|$DOCKER_REGISTRY/$APP_NAME:$CI_COMMIT_SHA|g" deploy/deployment.yaml | kubectl -n apps-staging apply -f -
    - kubectl -n apps-staging apply -f deploy/service.yaml
    - kubectl -n apps-staging apply -f deploy/ingress.yaml
    - kubectl -n apps-staging rollout status deployment/$APP_NAME
  environment:
    name: staging
    url: https://$APP_NAME-staging.yourdomain.com
  only:
    - develop
    - main

deploy-production:
  stage: deploy-production
  image: bitnami/kubectl:latest
  script:
    - kubectl create namespace apps-production --dry-run=client -o yaml | kubectl apply -f -
    - sed -e "s|__IMAGE__|$DOCKER_REGISTRY/$APP_NAME:$CI_COMMIT_SHA|g" deploy/deployment.yaml | kubectl -n apps-production apply -f -
    - kubectl -n apps-production apply -f deploy/service.yaml
    - kubectl -n apps-production apply -f deploy/ingress.yaml
    - kubectl -n apps-production rollout status deployment/$APP_NAME
  environment:
    name: production
    url: https://$APP_NAME.yourdomain.com
  only:
    - main
  when: manual"#
}
