//! Check result models
//!
//! Defines check cases, results, and status types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four backend checks, in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCase {
    BackendConnectivity,
    RootEndpoint,
    CreateStatusCheck,
    GetStatusChecks,
}

impl CheckCase {
    /// Get check number (1-4)
    pub fn number(&self) -> u8 {
        match self {
            CheckCase::BackendConnectivity => 1,
            CheckCase::RootEndpoint => 2,
            CheckCase::CreateStatusCheck => 3,
            CheckCase::GetStatusChecks => 4,
        }
    }

    /// Get check name
    pub fn name(&self) -> &'static str {
        match self {
            CheckCase::BackendConnectivity => "Backend Connectivity",
            CheckCase::RootEndpoint => "Root Endpoint",
            CheckCase::CreateStatusCheck => "Create Status Check",
            CheckCase::GetStatusChecks => "Get Status Checks",
        }
    }

    /// Request line exercised by the check
    pub fn endpoint(&self) -> &'static str {
        match self {
            CheckCase::BackendConnectivity => "GET /",
            CheckCase::RootEndpoint => "GET /api/",
            CheckCase::CreateStatusCheck => "POST /api/status",
            CheckCase::GetStatusChecks => "GET /api/status",
        }
    }

    /// All checks in declaration order
    pub fn all() -> Vec<CheckCase> {
        vec![
            CheckCase::BackendConnectivity,
            CheckCase::RootEndpoint,
            CheckCase::CreateStatusCheck,
            CheckCase::GetStatusChecks,
        ]
    }

    /// Parse from check number
    pub fn from_number(n: u8) -> Option<CheckCase> {
        match n {
            1 => Some(CheckCase::BackendConnectivity),
            2 => Some(CheckCase::RootEndpoint),
            3 => Some(CheckCase::CreateStatusCheck),
            4 => Some(CheckCase::GetStatusChecks),
            _ => None,
        }
    }
}

impl fmt::Display for CheckCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check {}: {}", self.number(), self.name())
    }
}

/// Check execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    /// The check itself misbehaved (panicked) and was stopped by the runner
    Error,
}

impl CheckStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "✅",
            CheckStatus::Fail | CheckStatus::Error => "❌",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckStatus::Pass)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Outcome of a single check
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckResult {
    pub case: CheckCase,
    pub status: CheckStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    /// Diagnostic lines in the order they were observed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl CheckResult {
    pub fn pass(case: CheckCase, duration_ms: u64) -> Self {
        Self {
            case,
            status: CheckStatus::Pass,
            duration_ms,
            message: None,
            details: Vec::new(),
        }
    }

    pub fn fail(case: CheckCase, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            case,
            status: CheckStatus::Fail,
            duration_ms,
            message: Some(message.into()),
            details: Vec::new(),
        }
    }

    pub fn error(case: CheckCase, error: impl Into<String>) -> Self {
        Self {
            case,
            status: CheckStatus::Error,
            duration_ms: 0,
            message: Some(error.into()),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn passed(&self) -> bool {
        self.status.is_success()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.case,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of one pass over the check suite
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub round: u32,
    pub backend_url: String,
    pub api_base_url: String,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<CheckResult>,
}

impl RunSummary {
    pub fn new(
        round: u32,
        backend_url: impl Into<String>,
        api_base_url: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<CheckResult>,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = results
            .iter()
            .filter(|r| r.status == CheckStatus::Fail)
            .count();
        let errors = results
            .iter()
            .filter(|r| r.status == CheckStatus::Error)
            .count();
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            round,
            backend_url: backend_url.into(),
            api_base_url: api_base_url.into(),
            started_at,
            total,
            passed,
            failed,
            errors,
            total_duration_ms,
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Round {} - {}", self.round, self.api_base_url)?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(
            f,
            "Results: {}/{} tests passed ({:.1}%) in {}ms",
            self.passed,
            self.total,
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_of(results: Vec<CheckResult>) -> RunSummary {
        RunSummary::new(
            1,
            "http://localhost:8001",
            "http://localhost:8001/api",
            Utc::now(),
            results,
        )
    }

    #[test]
    fn test_case_numbers() {
        assert_eq!(CheckCase::BackendConnectivity.number(), 1);
        assert_eq!(CheckCase::GetStatusChecks.number(), 4);
    }

    #[test]
    fn test_case_from_number() {
        assert_eq!(
            CheckCase::from_number(2),
            Some(CheckCase::RootEndpoint)
        );
        assert_eq!(CheckCase::from_number(0), None);
        assert_eq!(CheckCase::from_number(5), None);
    }

    #[test]
    fn test_all_cases_in_declaration_order() {
        let all = CheckCase::all();
        assert_eq!(all.len(), 4);
        let numbers: Vec<u8> = all.iter().map(|c| c.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_result_creation() {
        let result = CheckResult::pass(CheckCase::RootEndpoint, 12);
        assert!(result.passed());
        assert_eq!(result.duration_ms, 12);

        let result = CheckResult::error(CheckCase::RootEndpoint, "boom");
        assert!(!result.passed());
        assert_eq!(result.message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_summary_counts() {
        let summary = summary_of(vec![
            CheckResult::pass(CheckCase::BackendConnectivity, 10),
            CheckResult::pass(CheckCase::RootEndpoint, 20),
            CheckResult::fail(CheckCase::CreateStatusCheck, 30, "Missing field: id"),
            CheckResult::error(CheckCase::GetStatusChecks, "panicked"),
        ]);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.total_duration_ms, 60);
        assert_eq!(summary.pass_rate(), 50.0);
        assert!(!summary.is_all_passed());
        assert!(summary.to_string().contains("Results: 2/4 tests passed"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = summary_of(Vec::new());
        assert_eq!(summary.pass_rate(), 0.0);
        assert!(summary.is_all_passed());
    }

    #[test]
    fn test_details_skipped_when_empty() {
        let json = serde_json::to_value(CheckResult::pass(CheckCase::RootEndpoint, 1)).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["case"], "root_endpoint");
        assert_eq!(json["status"], "pass");
    }
}
