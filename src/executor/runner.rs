//! Check execution runner
//!
//! Runs the backend checks one after another, isolating each behind its own
//! panic barrier so a misbehaving check cannot stop the rest of the suite.

use anyhow::Result;
use chrono::Utc;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{error, info};

use crate::checks;
use crate::config::ProbeConfig;
use crate::http::HttpClient;
use crate::models::{CheckCase, CheckResult, RunSummary};
use crate::utils::Timer;

/// Progress notification emitted while a round runs
#[derive(Debug)]
pub enum CheckEvent<'a> {
    /// The check is about to send its first request
    Started(CheckCase),
    Finished(&'a CheckResult),
}

/// Sequential runner for the backend check suite
pub struct CheckRunner {
    config: ProbeConfig,
    client: HttpClient,
    cases: Vec<CheckCase>,
}

impl CheckRunner {
    /// Create a runner for every check
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let client = HttpClient::new(&config.backend_url, config.request_timeout)?;
        Ok(Self {
            config,
            client,
            cases: CheckCase::all(),
        })
    }

    /// Restrict the run to the given checks, keeping their order
    pub fn with_cases(mut self, cases: Vec<CheckCase>) -> Self {
        self.cases = cases;
        self
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run a single check behind the panic barrier
    pub async fn run_check(&self, case: CheckCase) -> CheckResult {
        info!("Running {}", case);
        guarded(case, checks::run_check(case, &self.client, &self.config)).await
    }

    /// Run the configured checks once, reporting each check as it starts and
    /// finishes
    pub async fn run_round<F>(&self, round: u32, mut on_event: F) -> RunSummary
    where
        F: FnMut(CheckEvent<'_>),
    {
        info!(
            "Starting round {} against {}",
            round,
            self.config.api_base_url()
        );

        let started_at = Utc::now();
        let timer = Timer::start(format!("round {round}"));
        let mut results = Vec::with_capacity(self.cases.len());

        for &case in &self.cases {
            on_event(CheckEvent::Started(case));
            let result = self.run_check(case).await;
            info!("  {}", result);
            on_event(CheckEvent::Finished(&result));
            results.push(result);
        }

        let summary = RunSummary::new(
            round,
            &self.config.backend_url,
            self.config.api_base_url(),
            started_at,
            results,
        );

        info!(
            "Round {} completed in {}ms - Pass: {}/{} ({:.1}%)",
            round,
            timer.elapsed_ms(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }

    /// Run the suite `config.rounds` times
    pub async fn run_rounds<F>(&self, mut on_event: F) -> Vec<RunSummary>
    where
        F: FnMut(u32, CheckEvent<'_>),
    {
        let rounds = self.config.rounds.max(1);
        let mut summaries = Vec::with_capacity(rounds as usize);

        for round in 1..=rounds {
            if rounds > 1 {
                info!("=== Round {}/{} ===", round, rounds);
            }
            let summary = self
                .run_round(round, |event| on_event(round, event))
                .await;
            summaries.push(summary);
        }

        summaries
    }
}

/// Await a check, converting a panic into an error result
pub async fn guarded<F>(case: CheckCase, check: F) -> CheckResult
where
    F: Future<Output = CheckResult>,
{
    match AssertUnwindSafe(check).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => {
            let reason = panic_message(panic.as_ref());
            error!("{} aborted: {}", case, reason);
            CheckResult::error(case, format!("ERROR in {}: {}", case.name(), reason))
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "check panicked".to_string()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::models::CheckStatus;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn healthy_backend() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Hello World" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "3f1c",
                "client_name": "flappy_bird_game_test",
                "timestamp": "2024-01-01T00:00:00"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "3f1c",
                "client_name": "flappy_bird_game_test",
                "timestamp": "2024-01-01T00:00:00"
            }])))
            .mount(&server)
            .await;
        server
    }

    fn runner_for(url: impl Into<String>) -> CheckRunner {
        let config = ProbeConfig::default()
            .with_backend_url(url)
            .with_connect_timeout(Duration::from_secs(2))
            .with_request_timeout(Duration::from_secs(2));
        CheckRunner::new(config).unwrap()
    }

    fn finished_case(event: CheckEvent<'_>) -> Option<CheckCase> {
        match event {
            CheckEvent::Finished(result) => Some(result.case),
            CheckEvent::Started(_) => None,
        }
    }

    fn outcomes(summary: &RunSummary) -> Vec<bool> {
        summary.results.iter().map(|r| r.passed()).collect()
    }

    #[test]
    fn test_runner_creation() {
        let runner = CheckRunner::new(ProbeConfig::default()).unwrap();
        assert_eq!(runner.cases.len(), 4);
        assert_eq!(runner.config().backend_url, "http://localhost:8001");
    }

    #[tokio::test]
    async fn test_healthy_backend_passes_all() {
        let server = healthy_backend().await;
        let runner = runner_for(server.uri());

        let mut seen = Vec::new();
        let summary = runner
            .run_round(1, |event| seen.extend(finished_case(event)))
            .await;

        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 4);
        assert!(summary.is_all_passed());
        assert_eq!(seen, CheckCase::all());
    }

    #[tokio::test]
    async fn test_unreachable_backend_fails_all() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let summary = runner_for(format!("http://{addr}")).run_round(1, |_| {}).await;

        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 0);
        assert_eq!(outcomes(&summary), vec![false; 4]);
        assert!(summary
            .results
            .iter()
            .all(|r| r.status == CheckStatus::Fail));
    }

    #[tokio::test]
    async fn test_failures_do_not_cascade() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let summary = runner_for(server.uri()).run_round(1, |_| {}).await;

        // "/" answers 404 from the mock server, which is tolerated.
        assert_eq!(outcomes(&summary), vec![true, false, false, true]);
        let expected = format!(
            "Results: 2/4 tests passed (50.0%) in {}ms",
            summary.total_duration_ms
        );
        assert_eq!(summary.to_string().lines().last(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_repeated_rounds_are_stable() {
        let server = healthy_backend().await;
        let runner = CheckRunner::new(
            ProbeConfig::default()
                .with_backend_url(server.uri())
                .with_rounds(2),
        )
        .unwrap();

        let mut rounds_seen = Vec::new();
        let summaries = runner
            .run_rounds(|round, event| {
                if finished_case(event).is_some() {
                    rounds_seen.push(round);
                }
            })
            .await;

        assert_eq!(summaries.len(), 2);
        assert_eq!(outcomes(&summaries[0]), outcomes(&summaries[1]));
        assert_eq!(summaries[1].round, 2);
        assert_eq!(rounds_seen, vec![1, 1, 1, 1, 2, 2, 2, 2]);
    }

    #[tokio::test]
    async fn test_selected_cases_only() {
        let server = healthy_backend().await;
        let runner = runner_for(server.uri()).with_cases(vec![CheckCase::GetStatusChecks]);

        let summary = runner.run_round(1, |_| {}).await;

        assert_eq!(summary.total, 1);
        assert_eq!(summary.results[0].case, CheckCase::GetStatusChecks);
    }

    #[tokio::test]
    async fn test_events_bracket_each_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        let runner = runner_for(server.uri()).with_cases(vec![CheckCase::RootEndpoint]);

        let mut log = Vec::new();
        runner
            .run_round(1, |event| match event {
                CheckEvent::Started(case) => {
                    log.push(format!("started {}", case.number()));
                }
                CheckEvent::Finished(result) => {
                    log.push(format!("finished {}", result.case.number()));
                }
            })
            .await;

        assert_eq!(log, ["started 2", "finished 2"]);
    }

    #[test]
    fn test_guard_converts_panic() {
        let result = tokio_test::block_on(guarded(CheckCase::RootEndpoint, async {
            if true {
                panic!("malformed check");
            }
            CheckResult::pass(CheckCase::RootEndpoint, 0)
        }));

        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(
            result.message.as_deref(),
            Some("ERROR in Root Endpoint: malformed check")
        );
    }

    #[test]
    fn test_guard_passes_through_results() {
        let result = tokio_test::block_on(guarded(CheckCase::RootEndpoint, async {
            CheckResult::pass(CheckCase::RootEndpoint, 7)
        }));

        assert!(result.passed());
    }
}
