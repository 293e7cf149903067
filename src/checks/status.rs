//! Checks 3-4: Create and list status check records

use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{conclude, CheckFailure};
use crate::http::{HttpClient, HttpResponse};
use crate::models::{
    json_type_name, missing_required_field, CheckCase, CheckResult, StatusCheckCreate,
};
use crate::utils::Timer;

const STATUS_PATH: &str = "/api/status";

/// Check 3: `POST /api/status` returns the created record
#[derive(Clone, Debug)]
pub struct CreateStatusCheck {
    pub payload: StatusCheckCreate,
    pub timeout: Duration,
}

impl CreateStatusCheck {
    pub fn new(client_name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            payload: StatusCheckCreate::new(client_name),
            timeout,
        }
    }

    pub async fn run(&self, client: &HttpClient) -> CheckResult {
        let timer = Timer::start(CheckCase::CreateStatusCheck.name());
        let mut details = Vec::new();

        let outcome = match client
            .post_json(STATUS_PATH, &self.payload, self.timeout)
            .await
        {
            Ok(resp) => {
                details.push(format!(
                    "✅ Create status check status: {}",
                    resp.status_code
                ));
                self.evaluate(&resp, &mut details)
            }
            Err(e) => Err(CheckFailure::Transport(e)),
        };

        conclude(CheckCase::CreateStatusCheck, timer, details, outcome)
    }

    fn evaluate(&self, resp: &HttpResponse, details: &mut Vec<String>) -> Result<(), CheckFailure> {
        if !resp.is_ok() {
            details.push(format!("Response: {}", resp.body));
            return Err(CheckFailure::UnexpectedStatus {
                actual: resp.status_code,
                expected: "200",
            });
        }

        let data = resp.json()?;
        debug!("Created status check in {}ms: {}", resp.duration_ms, data);
        details.push(format!("✅ Created status check: {data}"));

        if let Some(field) = missing_required_field(&data) {
            return Err(CheckFailure::MissingField(field));
        }

        match data.get("client_name") {
            Some(Value::String(name)) if *name == self.payload.client_name => Ok(()),
            Some(other) => Err(CheckFailure::ClientNameMismatch {
                expected: self.payload.client_name.clone(),
                actual: match other {
                    Value::String(name) => name.clone(),
                    value => value.to_string(),
                },
            }),
            None => Err(CheckFailure::MissingField("client_name")),
        }
    }
}

/// Check 4: `GET /api/status` returns a list of records.
///
/// Only the first element's shape is inspected.
#[derive(Clone, Debug)]
pub struct ListStatusChecks {
    pub timeout: Duration,
}

impl ListStatusChecks {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn run(&self, client: &HttpClient) -> CheckResult {
        let timer = Timer::start(CheckCase::GetStatusChecks.name());
        let mut details = Vec::new();

        let outcome = match client.get(STATUS_PATH, self.timeout).await {
            Ok(resp) => {
                details.push(format!("✅ Get status checks status: {}", resp.status_code));
                evaluate_list(&resp, &mut details)
            }
            Err(e) => Err(CheckFailure::Transport(e)),
        };

        conclude(CheckCase::GetStatusChecks, timer, details, outcome)
    }
}

fn evaluate_list(resp: &HttpResponse, details: &mut Vec<String>) -> Result<(), CheckFailure> {
    if !resp.is_ok() {
        return Err(CheckFailure::UnexpectedStatus {
            actual: resp.status_code,
            expected: "200",
        });
    }

    let data = resp.json()?;
    let Value::Array(items) = &data else {
        return Err(CheckFailure::UnexpectedType {
            expected: "array",
            actual: json_type_name(&data),
        });
    };

    details.push(format!("✅ Retrieved {} status checks", items.len()));

    if let Some(field) = items.first().and_then(missing_required_field) {
        return Err(CheckFailure::MissingField(field));
    }

    Ok(())
}
