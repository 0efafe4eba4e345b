//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SpendGuard - Financial behavior risk scoring
#[derive(Parser)]
#[command(name = "spendguard")]
#[command(about = "Stateless risk scoring over expense transactions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full spending analysis report
    Analyze {
        /// Expense file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Print the raw JSON report instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Score spending risk
    Risk {
        /// Expense file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Total budget for burn-rate scoring
        #[arg(short, long)]
        budget: Option<f64>,

        /// Print the raw JSON assessment instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Forecast spending for the next seven days
    Predict {
        /// Expense file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Print the raw JSON forecast instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Build a behavioral baseline profile
    Baseline {
        /// Expense file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Print the raw JSON profile instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Evaluate an access decision from finance and identity risk
    Secure {
        /// Expense file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Identity risk signal: LOW or HIGH
        #[arg(short, long)]
        identity_risk: String,

        /// Total budget for burn-rate scoring
        #[arg(short, long)]
        budget: Option<f64>,

        /// Print the raw JSON decision instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
