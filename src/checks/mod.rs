//! Backend check implementations
//!
//! ## Checks
//!
//! 1. Backend Connectivity - `GET` on the base URL answers 200 or 404
//! 2. Root Endpoint - `GET /api/` answers 200 with a JSON body
//! 3. Create Status Check - `POST /api/status` echoes a complete record
//! 4. Get Status Checks - `GET /api/status` answers a JSON array of records
//!
//! Every check folds transport, status and shape problems into a failed
//! [`CheckResult`]; none of them return errors.

mod connectivity;
mod root;
mod status;

pub use connectivity::ConnectivityCheck;
pub use root::RootEndpointCheck;
pub use status::{CreateStatusCheck, ListStatusChecks};

use thiserror::Error;

use crate::config::ProbeConfig;
use crate::http::{HttpClient, HttpError};
use crate::models::{CheckCase, CheckResult};
use crate::utils::Timer;

/// Reason a check did not pass
#[derive(Error, Debug)]
pub enum CheckFailure {
    #[error("{0}")]
    Transport(#[from] HttpError),

    #[error("Unexpected status {actual} (expected {expected})")]
    UnexpectedStatus { actual: u16, expected: &'static str },

    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Missing field in response: {0}")]
    MissingField(&'static str),

    #[error("Client name mismatch: expected {expected}, got {actual}")]
    ClientNameMismatch { expected: String, actual: String },

    #[error("Expected {expected}, got {actual}")]
    UnexpectedType {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Run a single check against the configured backend
pub async fn run_check(case: CheckCase, client: &HttpClient, config: &ProbeConfig) -> CheckResult {
    match case {
        CheckCase::BackendConnectivity => {
            ConnectivityCheck::new(config.connect_timeout)
                .run(client)
                .await
        }
        CheckCase::RootEndpoint => {
            RootEndpointCheck::new(config.request_timeout)
                .run(client)
                .await
        }
        CheckCase::CreateStatusCheck => {
            CreateStatusCheck::new(&config.client_name, config.request_timeout)
                .run(client)
                .await
        }
        CheckCase::GetStatusChecks => {
            ListStatusChecks::new(config.request_timeout)
                .run(client)
                .await
        }
    }
}

/// Turn an outcome into a result, recording the failure as the last detail
fn conclude(
    case: CheckCase,
    timer: Timer,
    mut details: Vec<String>,
    outcome: Result<(), CheckFailure>,
) -> CheckResult {
    let duration_ms = timer.stop().as_millis() as u64;

    match outcome {
        Ok(()) => CheckResult::pass(case, duration_ms).with_details(details),
        Err(failure) => {
            let message = failure.to_string();
            details.push(format!("❌ {message}"));
            CheckResult::fail(case, duration_ms, message).with_details(details)
        }
    }
}
