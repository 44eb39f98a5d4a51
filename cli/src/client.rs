// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP client for communicating with the portal API

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use launchpad_core::domain::catalog::TemplateInfo;
use launchpad_core::domain::descriptor::{OnboardRequest, UpdateRequest};

#[derive(Debug, Clone)]
pub struct PortalClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl PortalClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn templates(&self) -> Result<Vec<TemplateInfo>> {
        let response = self
            .client
            .get(format!("{}/templates", self.base_url))
            .send()
            .await
            .context("Failed to fetch templates")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Failed to fetch templates: {}", error_text);
        }

        response
            .json()
            .await
            .context("Failed to parse templates response")
    }

    pub async fn onboard(&self, request: &OnboardRequest) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}/onboard", self.base_url))
            .json(request)
            .send()
            .await
            .context("Failed to reach the portal")?;

        Self::into_payload(response, "Onboarding failed").await
    }

    pub async fn status(&self, name: &str) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}/status/{}", self.base_url, name))
            .send()
            .await
            .context("Failed to reach the portal")?;

        Self::into_payload(response, "Status lookup failed").await
    }

    pub async fn list(&self) -> Result<Value> {
        let response = self
            .authorized(self.client.get(format!("{}/applications", self.base_url)))
            .send()
            .await
            .context("Failed to reach the portal")?;

        Self::into_payload(response, "Listing applications failed").await
    }

    pub async fn update(&self, name: &str, request: &UpdateRequest) -> Result<Value> {
        let response = self
            .authorized(
                self.client
                    .put(format!("{}/applications/{}", self.base_url, name)),
            )
            .json(request)
            .send()
            .await
            .context("Failed to reach the portal")?;

        Self::into_payload(response, "Update failed").await
    }

    pub async fn delete(&self, name: &str, confirm: bool) -> Result<Value> {
        let mut url = format!("{}/applications/{}", self.base_url, name);
        if confirm {
            url.push_str("?confirm=true");
        }

        let response = self
            .authorized(self.client.delete(url))
            .send()
            .await
            .context("Failed to reach the portal")?;

        Self::into_payload(response, "Delete failed").await
    }

    /// Decode a portal response, turning error bodies into readable failures.
    async fn into_payload(response: reqwest::Response, what: &str) -> Result<Value> {
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("{what}: unreadable response"))?;

        if !status.is_success() {
            let message = body["message"].as_str().unwrap_or("unknown error");
            match body["details"].as_str() {
                Some(details) => anyhow::bail!("{what}: {message} ({details})"),
                None => anyhow::bail!("{what}: {message}"),
            }
        }

        Ok(body)
    }
}
