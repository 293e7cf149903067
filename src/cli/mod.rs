//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_ENV_FILE;

/// Integration check runner for the status-check backend API
#[derive(Parser, Debug)]
#[command(name = "backend-probe")]
#[command(version)]
#[command(about = "Check a status-check backend API and report pass/fail")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error); overrides --verbose
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the backend checks
    Run(RunArgs),

    /// List available checks
    List,

    /// Show recognised environment variables and their current values
    Env(EnvArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Backend base URL (overrides REACT_APP_BACKEND_URL)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Dotenv file to load before reading the environment
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: String,

    /// Specific check number to run (1-4)
    #[arg(short, long)]
    pub check: Option<u8>,

    /// Number of times to run the suite
    #[arg(short, long)]
    pub rounds: Option<u32>,

    /// API request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Connectivity check timeout in seconds
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Save results to file
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for env command
#[derive(Parser, Debug)]
pub struct EnvArgs {
    /// Dotenv file to load before reading the environment
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: String,
}
