use serde::{Deserialize, Serialize};

use crate::harness::runner::{TestResult, TestStatus};

// ============================================================================
// Suite report: aggregates the results of one run
// ============================================================================

/// Aggregated report for one suite run.
///
/// Built from a `Vec<TestResult>` via `from_results()`. Consumed by the
/// console, HTML and JUnit reporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteReport {
    pub suite_name: String,

    /// Number of scenarios, skipped ones included
    pub total: usize,

    pub passed: usize,

    pub failed: usize,

    /// Scenarios marked as ignored
    pub skipped: usize,

    /// Wall-clock time of the whole run in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub test_results: Vec<TestResult>,
}

impl TestSuiteReport {
    /// Build a suite report, counting each status.
    pub fn from_results(suite_name: &str, results: Vec<TestResult>) -> Self {
        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();
        let passed = count(TestStatus::Passed);
        let failed = count(TestStatus::Failed);
        let skipped = count(TestStatus::Skipped);
        Self {
            suite_name: suite_name.to_string(),
            total: results.len(),
            passed,
            failed,
            skipped,
            duration_ms: None,
            test_results: results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// No scenario failed. Skipped scenarios do not count against the run.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.test_results
            .iter()
            .filter(|r| r.status == TestStatus::Failed)
    }
}
