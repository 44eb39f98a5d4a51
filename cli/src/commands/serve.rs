// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Portal server runner

use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use launchpad_core::application::onboarding_service::StandardOnboardingService;
use launchpad_core::domain::portal_config::PortalConfig;
use launchpad_core::domain::provider::ProjectHost;
use launchpad_core::infrastructure::gitlab_client::GitLabClient;
use launchpad_core::presentation::api::{app, AppState};

pub async fn run() -> Result<()> {
    // Load configuration. A missing provider token is fatal here, before
    // the listener ever binds.
    let config = PortalConfig::from_env().context("Failed to load configuration")?;

    let host = GitLabClient::new(&config.provider_url, &config.provider_token)?;
    host.verify_credentials()
        .await
        .map_err(|e| anyhow!("Provider credential check failed: {e}"))?;

    info!(provider = %config.provider_url, "Provider credentials verified");

    let service = Arc::new(StandardOnboardingService::new(
        Arc::new(host),
        config.clone(),
    ));

    let state = Arc::new(AppState {
        service,
        admin_token: config.admin_token.clone(),
        start_time: Instant::now(),
    });

    let router = app(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Portal listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Portal shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
