//! Atrium command-line interface
//!
//! Inspect the role catalog, evaluate guards, preview the filtered sidebar
//! for a role, and drive a demo session against the in-memory identity
//! provider.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

mod commands;
mod context;
mod demo;

use commands::{check, nav, roles, session};
use context::CliContext;

#[derive(Parser)]
#[command(name = "atrium")]
#[command(about = "Atrium - role-based access control for the HR portal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "atrium.toml")]
    config: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List roles and their permissions
    Roles(roles::RolesArgs),

    /// Evaluate a guard requirement against a role
    Check(check::CheckArgs),

    /// Render the sidebar visible to a role
    Nav(nav::NavArgs),

    /// Run a scripted session against the demo identity provider
    Session(session::SessionArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging before loading configuration; the configured level
    // replaces the default afterwards unless --verbose is set
    let log_level = if cli.verbose { "debug" } else { "info" };
    let (filter, filter_handle) = reload::Layer::new(EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let ctx = CliContext::load(&cli.config, cli.json)?;
    if !cli.verbose {
        filter_handle.modify(|filter| *filter = EnvFilter::new(&ctx.config.log_level))?;
    }
    tracing::debug!(
        config = %cli.config.display(),
        roles = ctx.roles.len(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Roles(args) => roles::run(&ctx, args)?,
        Commands::Check(args) => check::run(&ctx, args)?,
        Commands::Nav(args) => nav::run(&ctx, args)?,
        Commands::Session(args) => session::run(&ctx, args).await?,
    }

    Ok(())
}
