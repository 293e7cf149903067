//! Check 2: Root Endpoint

use std::time::Duration;
use tracing::debug;

use super::{conclude, CheckFailure};
use crate::http::{HttpClient, HttpResponse};
use crate::models::{CheckCase, CheckResult};
use crate::utils::Timer;

/// `GET /api/` must answer 200 with any JSON body
#[derive(Clone, Debug)]
pub struct RootEndpointCheck {
    pub timeout: Duration,
}

impl RootEndpointCheck {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn run(&self, client: &HttpClient) -> CheckResult {
        let timer = Timer::start(CheckCase::RootEndpoint.name());
        let mut details = Vec::new();

        let outcome = match client.get("/api/", self.timeout).await {
            Ok(resp) => {
                details.push(format!("✅ Root endpoint status: {}", resp.status_code));
                evaluate(&resp, &mut details)
            }
            Err(e) => Err(CheckFailure::Transport(e)),
        };

        conclude(CheckCase::RootEndpoint, timer, details, outcome)
    }
}

fn evaluate(resp: &HttpResponse, details: &mut Vec<String>) -> Result<(), CheckFailure> {
    if !resp.is_ok() {
        return Err(CheckFailure::UnexpectedStatus {
            actual: resp.status_code,
            expected: "200",
        });
    }

    let data = resp.json()?;
    debug!("Root response in {}ms: {}", resp.duration_ms, data);
    details.push(format!("✅ Root response: {data}"));
    Ok(())
}
