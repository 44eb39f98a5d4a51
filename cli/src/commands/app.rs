// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Application lifecycle commands: onboard, status, list, update, delete,
//! templates. All of them delegate to a running portal over HTTP.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use launchpad_core::domain::descriptor::{OnboardRequest, UpdateRequest};

use crate::client::PortalClient;

#[derive(Args)]
pub struct OnboardArgs {
    /// Application name (lowercase, alphanumeric with dashes)
    #[arg(long)]
    pub name: String,

    /// Short description shown on the project
    #[arg(long)]
    pub description: String,

    /// Owning team's contact address
    #[arg(long)]
    pub team_contact: String,

    /// Framework tag (nodejs, python, java; anything else gets the generic
    /// pipeline)
    #[arg(long)]
    pub framework: String,

    /// Container port (defaults per framework)
    #[arg(long)]
    pub port: Option<u16>,

    /// Initial replica count (default 3)
    #[arg(long)]
    pub replicas: Option<u32>,

    #[arg(long)]
    pub memory_request: Option<String>,

    #[arg(long)]
    pub memory_limit: Option<String>,

    #[arg(long)]
    pub cpu_request: Option<String>,

    #[arg(long)]
    pub cpu_limit: Option<String>,

    /// Image registry override
    #[arg(long)]
    pub registry_url: Option<String>,

    /// Deployment webhook override
    #[arg(long)]
    pub webhook_url: Option<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Application name
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// New framework tag; re-generates the pipeline
    #[arg(long)]
    pub framework: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// New replica count; re-generates the deployment manifests
    #[arg(long)]
    pub replicas: Option<u32>,

    #[arg(long)]
    pub memory_request: Option<String>,

    #[arg(long)]
    pub memory_limit: Option<String>,

    #[arg(long)]
    pub cpu_request: Option<String>,

    #[arg(long)]
    pub cpu_limit: Option<String>,
}

pub async fn templates(portal_url: &str) -> Result<()> {
    let client = PortalClient::new(portal_url, None)?;
    let templates = client.templates().await?;

    println!("{}", "Available Application Templates:".bold());
    println!();
    for template in templates {
        println!("{}", template.name.bold());
        println!("   ID: {}", template.id.blue());
        println!("   Description: {}", template.description);
        println!("   Default Port: {}", template.default_port);
        println!("   Frameworks: {}", template.frameworks.join(", "));
        println!();
    }

    Ok(())
}

pub async fn onboard(portal_url: &str, args: OnboardArgs) -> Result<()> {
    let request = OnboardRequest {
        name: args.name,
        description: args.description,
        team_contact: args.team_contact,
        framework: args.framework,
        port: args.port,
        replicas: args.replicas,
        memory_request: args.memory_request,
        memory_limit: args.memory_limit,
        cpu_request: args.cpu_request,
        cpu_limit: args.cpu_limit,
        registry_url: args.registry_url,
        webhook_url: args.webhook_url,
        ..Default::default()
    };

    let client = PortalClient::new(portal_url, None)?;
    let payload = client.onboard(&request).await?;

    println!(
        "{} {}",
        "✓".green(),
        "Application successfully onboarded!".bold()
    );
    println!();
    println!("Important links:");
    println!(
        "  {} {}",
        "Repository:".bold(),
        payload["project_url"].as_str().unwrap_or("-")
    );
    println!(
        "  {} {}",
        "Staging URL:".bold(),
        payload["dev_url"].as_str().unwrap_or("-")
    );
    println!(
        "  {} {}",
        "Production URL:".bold(),
        payload["prod_url"].as_str().unwrap_or("-")
    );
    println!();
    println!("Next steps:");
    println!(
        "  1. Clone the repository: git clone {}",
        payload["project_url"].as_str().unwrap_or("-")
    );
    println!("  2. Push to main to trigger the pipeline");
    println!("  3. Promote to production through the manual gate when ready");

    Ok(())
}

pub async fn status(portal_url: &str, name: &str) -> Result<()> {
    let client = PortalClient::new(portal_url, None)?;
    let payload = client.status(name).await?;

    println!(
        "Status for {} (project {}):",
        payload["app_name"].as_str().unwrap_or(name).bold(),
        payload["project_id"]
    );
    println!();

    match payload["environments"].as_object() {
        Some(environments) if !environments.is_empty() => {
            for (env_name, env) in environments {
                let state = env["status"].as_str().unwrap_or("unknown");
                let colored_state = match state {
                    "available" => state.green(),
                    _ => state.yellow(),
                };
                println!("  {}: {}", env_name.bold(), colored_state);
                println!(
                    "    Last deployment: {}",
                    env["last_deployment"].as_str().unwrap_or("Never")
                );
                println!("    URL: {}", env["url"].as_str().unwrap_or(""));
            }
        }
        _ => println!("  No environments yet"),
    }

    Ok(())
}

pub async fn list(portal_url: &str, token: Option<&str>) -> Result<()> {
    let client = PortalClient::new(portal_url, token)?;
    let payload = client.list().await?;

    let total = payload["total"].as_u64().unwrap_or(0);
    println!("{} onboarded application(s)", total);
    println!();

    if let Some(applications) = payload["applications"].as_array() {
        for app in applications {
            println!(
                "  {} ({})",
                app["name"].as_str().unwrap_or("-").bold(),
                app["web_url"].as_str().unwrap_or("-")
            );
            if let Some(description) = app["description"].as_str() {
                println!("    {}", description);
            }
        }
    }

    Ok(())
}

pub async fn update(portal_url: &str, token: Option<&str>, args: UpdateArgs) -> Result<()> {
    let request = UpdateRequest {
        description: args.description,
        framework: args.framework,
        port: args.port,
        replicas: args.replicas,
        memory_request: args.memory_request,
        memory_limit: args.memory_limit,
        cpu_request: args.cpu_request,
        cpu_limit: args.cpu_limit,
        ..Default::default()
    };

    let client = PortalClient::new(portal_url, token)?;
    let payload = client.update(&args.name, &request).await?;

    println!(
        "{} {}",
        "✓".green(),
        payload["message"]
            .as_str()
            .unwrap_or("Application updated")
            .bold()
    );

    Ok(())
}

pub async fn delete(
    portal_url: &str,
    token: Option<&str>,
    name: &str,
    confirm: bool,
) -> Result<()> {
    if !confirm {
        anyhow::bail!("Deletion requires --confirm");
    }

    let client = PortalClient::new(portal_url, token)?;
    let payload = client.delete(name, true).await?;

    println!(
        "{} {}",
        "✓".green(),
        payload["message"]
            .as_str()
            .unwrap_or("Application deleted")
            .bold()
    );

    Ok(())
}
