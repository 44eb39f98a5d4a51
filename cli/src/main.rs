// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Launchpad CLI
//!
//! The `launchpad` binary drives the 1-click application onboarding portal.
//!
//! ## Architecture
//!
//! This CLI follows a **client-first** design with a server mode:
//!
//! - **Default mode**: commands delegate to a running portal over HTTP
//! - **Server mode**: `launchpad serve` runs the portal in the foreground
//!
//! ## Commands
//!
//! - `launchpad serve` - Run the portal server
//! - `launchpad templates` - List available application templates
//! - `launchpad onboard|status|list|update|delete` - Application operations

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod client;
mod commands;

use commands::app::{OnboardArgs, UpdateArgs};

/// Launchpad - 1-click application onboarding for the DevOps suite
#[derive(Parser)]
#[command(name = "launchpad")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Portal base URL for client commands
    #[arg(
        long,
        global = true,
        env = "PORTAL_URL",
        default_value = "http://localhost:5000"
    )]
    portal_url: String,

    /// Bearer token for authenticated commands
    #[arg(long, global = true, env = "PORTAL_TOKEN")]
    token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "LAUNCHPAD_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the portal server in the foreground
    Serve,

    /// List available application templates
    Templates,

    /// Onboard a new application
    Onboard(OnboardArgs),

    /// Show deployment status for an application
    Status {
        /// Application name
        name: String,
    },

    /// List applications onboarded through the portal
    List,

    /// Update an existing application
    Update(UpdateArgs),

    /// Delete an application and its project
    Delete {
        /// Application name
        name: String,

        /// Required safety flag; without it the portal refuses to delete
        #[arg(long)]
        confirm: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Serve => commands::serve::run().await,
        Commands::Templates => commands::app::templates(&cli.portal_url).await,
        Commands::Onboard(args) => commands::app::onboard(&cli.portal_url, args).await,
        Commands::Status { name } => commands::app::status(&cli.portal_url, &name).await,
        Commands::List => commands::app::list(&cli.portal_url, cli.token.as_deref()).await,
        Commands::Update(args) => {
            commands::app::update(&cli.portal_url, cli.token.as_deref(), args).await
        }
        Commands::Delete { name, confirm } => {
            commands::app::delete(&cli.portal_url, cli.token.as_deref(), &name, confirm).await
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
