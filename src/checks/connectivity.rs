//! Check 1: Backend Connectivity

use std::time::Duration;

use super::{conclude, CheckFailure};
use crate::http::HttpClient;
use crate::models::{CheckCase, CheckResult};
use crate::utils::Timer;

/// Reachability check against the backend base URL.
///
/// 404 counts as reachable because the backend may not route its base path.
#[derive(Clone, Debug)]
pub struct ConnectivityCheck {
    pub timeout: Duration,
}

impl ConnectivityCheck {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn run(&self, client: &HttpClient) -> CheckResult {
        let timer = Timer::start(CheckCase::BackendConnectivity.name());
        let mut details = Vec::new();

        let outcome = match client.get_base(self.timeout).await {
            Ok(resp) => {
                details.push(format!(
                    "✅ Backend connectivity test status: {}",
                    resp.status_code
                ));
                evaluate(resp.status_code)
            }
            Err(e) => Err(CheckFailure::Transport(e)),
        };

        conclude(CheckCase::BackendConnectivity, timer, details, outcome)
    }
}

fn evaluate(status_code: u16) -> Result<(), CheckFailure> {
    match status_code {
        200 | 404 => Ok(()),
        actual => Err(CheckFailure::UnexpectedStatus {
            actual,
            expected: "200 or 404",
        }),
    }
}
