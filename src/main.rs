//! Backend Probe - integration checks for the status-check backend API
//!
//! Runs four sequential checks against a backend and reports pass/fail:
//!
//! 1. Backend Connectivity (`GET` on the base URL, 200 or 404)
//! 2. Root Endpoint (`GET /api/`, 200 with JSON)
//! 3. Create Status Check (`POST /api/status`)
//! 4. Get Status Checks (`GET /api/status`)
//!
//! The process exits with 0 when every check passes and 1 otherwise.
//!
//! ## Usage
//!
//! ```bash
//! # Run all checks against REACT_APP_BACKEND_URL (or http://localhost:8001)
//! backend-probe run
//!
//! # Run against an explicit backend
//! backend-probe run --url http://localhost:8001
//!
//! # Run only the create check, three times, as JSON
//! backend-probe run --check 3 --rounds 3 --format json
//!
//! # List checks
//! backend-probe list
//! ```

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info, warn};

mod checks;
mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod utils;

use cli::{Args, Command};
use config::{EnvConfig, ProbeConfig};
use executor::{CheckEvent, CheckRunner};
use models::{CheckCase, RunSummary};
use output::{OutputFormat, ResultFormatter};
use utils::LogLevel;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    match args.command {
        Command::Run(ref run_args) => run_checks(&args, run_args).await,
        Command::List => {
            init_logging(&args, &EnvConfig::default());
            list_checks();
            Ok(ExitCode::SUCCESS)
        }
        Command::Env(ref env_args) => {
            let dotenv = config::load_dotenv(&env_args.env_file);
            let env = EnvConfig::load();
            init_logging(&args, &env);
            report_dotenv(&env_args.env_file, dotenv);
            show_env(&env);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(args: &Args, env: &EnvConfig) {
    let level = args
        .log_level
        .as_deref()
        .and_then(LogLevel::from_str)
        .unwrap_or_else(|| LogLevel::from_verbose(args.verbose || env.verbose.unwrap_or(false)));
    utils::init_logger(level);
}

fn report_dotenv(path: &str, outcome: Result<bool, dotenvy::Error>) {
    match outcome {
        Ok(true) => debug!("Loaded environment from {}", path),
        Ok(false) => debug!("No dotenv file at {}", path),
        Err(e) => warn!("Ignoring dotenv file {}: {}", path, e),
    }
}

async fn run_checks(args: &Args, run_args: &cli::RunArgs) -> Result<ExitCode> {
    let dotenv = config::load_dotenv(&run_args.env_file);
    let env = EnvConfig::load();
    init_logging(args, &env);
    report_dotenv(&run_args.env_file, dotenv);

    let config = resolve_config(run_args, &env)?;

    let format_name = run_args
        .format
        .as_deref()
        .or(env.format.as_deref())
        .unwrap_or("table");
    let format = OutputFormat::from_str(format_name)
        .ok_or_else(|| anyhow!("Unknown output format: {format_name}"))?;
    let formatter = ResultFormatter::new(format);

    let mut runner = CheckRunner::new(config)?;
    if let Some(number) = run_args.check {
        let case = CheckCase::from_number(number)
            .ok_or_else(|| anyhow!("Invalid check number: {number} (expected 1-4)"))?;
        runner = runner.with_cases(vec![case]);
    }

    info!(
        "Checking backend at {} ({} rounds)",
        runner.config().api_base_url(),
        runner.config().rounds
    );

    let streaming = formatter.format().streams_progress();
    if streaming {
        println!("{}", formatter.format_header(&runner.config().api_base_url()));
    }

    let summaries = runner
        .run_rounds(|_, event| {
            if !streaming {
                return;
            }
            match event {
                CheckEvent::Started(case) => println!("{}", formatter.format_running(case)),
                CheckEvent::Finished(result) => println!("{}", formatter.format_progress(result)),
            }
        })
        .await;

    match summaries.as_slice() {
        [single] => println!("{}", formatter.format_summary(single)),
        all => println!("{}", formatter.format_summaries(all)),
    }

    if let Some(path) = &run_args.output {
        output::write_results_to_file(path, &summaries, format)
            .context("Failed to save results")?;
        info!("Results written to {}", path);
    }

    Ok(ExitCode::from(exit_status(&summaries)))
}

/// 0 when every check of every round passed, 1 otherwise
fn exit_status(summaries: &[RunSummary]) -> u8 {
    if summaries.iter().all(RunSummary::is_all_passed) {
        0
    } else {
        1
    }
}

/// Layer command-line overrides on top of the environment
fn resolve_config(run_args: &cli::RunArgs, env: &EnvConfig) -> Result<ProbeConfig> {
    let mut config = ProbeConfig::from_env(env);

    if let Some(url) = &run_args.url {
        config = config.with_backend_url(url);
    }
    if let Some(secs) = run_args.timeout {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = run_args.connect_timeout {
        config = config.with_connect_timeout(Duration::from_secs(secs));
    }
    if let Some(rounds) = run_args.rounds {
        config = config.with_rounds(rounds);
    }

    config.validate()?;
    Ok(config)
}

fn list_checks() {
    println!("\nBackend Checks ({} total)\n", CheckCase::all().len());
    println!("──────────────────────────────────────────────────────────────");

    for case in CheckCase::all() {
        println!(
            "  {}. {:22} {}",
            case.number(),
            case.name(),
            case.endpoint()
        );
    }

    println!("──────────────────────────────────────────────────────────────");
    println!(
        "\nStatus check records must carry: {}\n",
        models::REQUIRED_FIELDS.join(", ")
    );
}

fn show_env(env: &EnvConfig) {
    env.print_summary();
    if !env.has_any() {
        println!("  (no variables set, defaults apply)");
    }
    println!();

    let config = ProbeConfig::from_env(env);
    println!("Resolved Configuration:");
    println!("  Backend URL:      {}", config.backend_url);
    println!("  API base URL:     {}", config.api_base_url());
    println!("  Connect timeout:  {:?}", config.connect_timeout);
    println!("  Request timeout:  {:?}", config.request_timeout);
    println!("  Rounds:           {}", config.rounds);
    println!();

    config::print_env_help();
}
