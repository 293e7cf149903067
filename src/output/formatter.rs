//! Output formatters for check results
//!
//! Provides the emoji console report, JSON, and one-line summary formats.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use crate::models::{CheckCase, CheckResult, CheckStatus, RunSummary};

const HEAVY_RULE: &str = "============================================================";
const LIGHT_RULE: &str = "----------------------------------------";

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }

    /// Whether per-check progress is printed while the suite runs
    pub fn streams_progress(&self) -> bool {
        matches!(self, OutputFormat::Table)
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Banner printed before the first check
    pub fn format_header(&self, api_base_url: &str) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "{HEAVY_RULE}");
        let _ = writeln!(output, "🧪 BACKEND API TESTS");
        let _ = writeln!(output, "{HEAVY_RULE}");
        let _ = writeln!(output, "Testing backend at: {api_base_url}");
        output
    }

    /// Line printed as a check starts, before any request goes out
    pub fn format_running(&self, case: CheckCase) -> String {
        format!("🔍 Running: {}", case.name())
    }

    /// Progress block for one finished check
    pub fn format_progress(&self, result: &CheckResult) -> String {
        let mut output = String::new();
        for detail in &result.details {
            let _ = writeln!(output, "{detail}");
        }
        if result.status == CheckStatus::Error {
            if let Some(message) = &result.message {
                let _ = writeln!(output, "❌ {message}");
            }
        }
        let _ = writeln!(output, "{}", status_line(result));
        let _ = write!(output, "{LIGHT_RULE}");
        output
    }

    /// Format a finished round
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    /// Format every round at once
    pub fn format_summaries(&self, summaries: &[RunSummary]) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string(summaries).unwrap_or_default(),
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(summaries).unwrap_or_default()
            }
            OutputFormat::Table | OutputFormat::Summary => summaries
                .iter()
                .map(|s| self.format_summary(s))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        let _ = writeln!(output);
        let _ = writeln!(output, "{HEAVY_RULE}");
        if summary.round > 1 {
            let _ = writeln!(output, "📊 TEST SUMMARY (round {})", summary.round);
        } else {
            let _ = writeln!(output, "📊 TEST SUMMARY");
        }
        let _ = writeln!(output, "{HEAVY_RULE}");

        for result in &summary.results {
            let _ = writeln!(output, "{}", status_line(result));
        }

        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "Results: {}/{} tests passed",
            summary.passed, summary.total
        );

        if summary.is_all_passed() {
            let _ = writeln!(output, "🎉 All backend tests passed!");
        } else {
            let _ = writeln!(output, "⚠️  Some backend tests failed!");
        }

        output
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        format!(
            "{} - Round {}: {}/{} passed ({:.1}%) in {}ms",
            summary.api_base_url,
            summary.round,
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.total_duration_ms
        )
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

fn status_line(result: &CheckResult) -> String {
    let tag = if result.passed() { "✅ PASS" } else { "❌ FAIL" };
    format!("{tag}: {}", result.case.name())
}

/// Write results to a file
pub fn write_results_to_file(
    path: impl AsRef<Path>,
    summaries: &[RunSummary],
    format: OutputFormat,
) -> Result<()> {
    let path = path.as_ref();
    let content = ResultFormatter::new(format).format_summaries(summaries);

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn summary(results: Vec<CheckResult>) -> RunSummary {
        RunSummary::new(
            1,
            "http://localhost:8001",
            "http://localhost:8001/api",
            Utc::now(),
            results,
        )
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TABLE"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("csv"), None);
        assert!(OutputFormat::Table.streams_progress());
        assert!(!OutputFormat::Json.streams_progress());
    }

    #[test]
    fn test_progress_block() {
        let result = CheckResult::fail(CheckCase::CreateStatusCheck, 5, "Missing field in response: id")
            .with_details(vec![
                "✅ Create status check status: 200".to_string(),
                "❌ Missing field in response: id".to_string(),
            ]);

        let output = ResultFormatter::default().format_progress(&result);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "✅ Create status check status: 200");
        assert_eq!(lines[2], "❌ FAIL: Create Status Check");
        assert_eq!(lines[3], LIGHT_RULE);
        assert!(!output.contains("Running"));
    }

    #[test]
    fn test_running_line_names_the_check() {
        let output = ResultFormatter::default().format_running(CheckCase::GetStatusChecks);
        assert_eq!(output, "🔍 Running: Get Status Checks");
    }

    #[test]
    fn test_progress_block_shows_error_message() {
        let result = CheckResult::error(CheckCase::RootEndpoint, "ERROR in Root Endpoint: boom");
        let output = ResultFormatter::default().format_progress(&result);
        assert!(output.contains("❌ ERROR in Root Endpoint: boom"));
        assert!(output.contains("❌ FAIL: Root Endpoint"));
    }

    #[test]
    fn test_summary_table_counts() {
        let output = ResultFormatter::default().format_summary(&summary(vec![
            CheckResult::pass(CheckCase::BackendConnectivity, 1),
            CheckResult::pass(CheckCase::RootEndpoint, 1),
            CheckResult::fail(CheckCase::CreateStatusCheck, 1, "mismatch"),
            CheckResult::pass(CheckCase::GetStatusChecks, 1),
        ]));

        assert!(output.contains("✅ PASS: Backend Connectivity"));
        assert!(output.contains("❌ FAIL: Create Status Check"));
        assert!(output.contains("Results: 3/4 tests passed"));
        assert!(output.contains("⚠️  Some backend tests failed!"));
    }

    #[test]
    fn test_summary_table_all_passed() {
        let output = ResultFormatter::default().format_summary(&summary(vec![
            CheckResult::pass(CheckCase::BackendConnectivity, 1),
        ]));

        assert!(output.contains("Results: 1/1 tests passed"));
        assert!(output.contains("🎉 All backend tests passed!"));
    }

    #[test]
    fn test_json_summary() {
        let formatter = ResultFormatter::new(OutputFormat::Json);
        let output = formatter.format_summary(&summary(vec![CheckResult::pass(
            CheckCase::RootEndpoint,
            3,
        )]));

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["passed"], 1);
        assert_eq!(value["results"][0]["case"], "root_endpoint");
    }

    #[test]
    fn test_write_results_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let summaries = vec![summary(vec![CheckResult::pass(CheckCase::RootEndpoint, 3)])];

        write_results_to_file(&path, &summaries, OutputFormat::Json).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.as_array().map(Vec::len), Some(1));
    }
}
