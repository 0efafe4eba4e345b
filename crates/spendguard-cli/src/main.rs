//! SpendGuard CLI - Financial behavior risk scoring
//!
//! Usage:
//!   spendguard analyze --file expenses.json   Full analysis report
//!   spendguard risk --file expenses.csv       Risk assessment
//!   spendguard secure --file expenses.json --identity-risk HIGH
//!   spendguard serve --port 5000              Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Analyze { file, json } => commands::cmd_analyze(&file, json),
        Commands::Risk { file, budget, json } => commands::cmd_risk(&file, budget, json),
        Commands::Predict { file, json } => commands::cmd_predict(&file, json),
        Commands::Baseline { file, json } => commands::cmd_baseline(&file, json),
        Commands::Secure {
            file,
            identity_risk,
            budget,
            json,
        } => {
            let identity: spendguard_core::fusion::IdentityRisk = identity_risk
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            commands::cmd_secure(&file, identity, budget, json)
        }
        Commands::Serve { port, host } => commands::cmd_serve(&host, port).await,
    }
}
