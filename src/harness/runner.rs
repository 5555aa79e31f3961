use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::browser::driver::Launcher;
use crate::harness::context::AssertionResult;
use crate::harness::scenario::Scenario;
use crate::harness::session::{Attachment, SessionConfig, SessionRecord, TestSession};
use crate::trace::logger::TraceLogger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

/// Outcome of running one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// "TC01_Login_WithValidCredentials_ShouldSucceed"
    pub name: String,
    pub categories: Vec<String>,
    pub status: TestStatus,
    pub duration_ms: u128,
    pub steps_run: usize,
    pub assertion_results: Vec<AssertionResult>,
    /// Setup, browser or assertion error that stopped the scenario
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }

    pub fn skipped(&self) -> bool {
        self.status == TestStatus::Skipped
    }
}

/// Executes scenarios one at a time, each in its own browser session.
pub struct SuiteRunner<'a> {
    launcher: &'a dyn Launcher,
    config: SessionConfig,
    tracer: Arc<TraceLogger>,
}

impl<'a> SuiteRunner<'a> {
    pub fn new(launcher: &'a dyn Launcher, config: SessionConfig, tracer: Arc<TraceLogger>) -> Self {
        Self {
            launcher,
            config,
            tracer,
        }
    }

    pub fn run(&self, scenarios: &[Scenario]) -> Vec<TestResult> {
        scenarios.iter().map(|s| self.run_one(s)).collect()
    }

    /// Launch, set up, run the body, tear down. Teardown runs whenever a
    /// session was launched, whatever happened afterwards.
    pub fn run_one(&self, scenario: &Scenario) -> TestResult {
        let name = scenario.full_name();
        let categories = scenario
            .categories
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();

        if let Some(reason) = scenario.ignore {
            tracing::info!(scenario = %name, reason, "skipped");
            return TestResult {
                name,
                categories,
                status: TestStatus::Skipped,
                duration_ms: 0,
                steps_run: 0,
                assertion_results: Vec::new(),
                error: Some(reason.to_string()),
                attachments: Vec::new(),
            };
        }

        let start = Instant::now();
        let mut session =
            match TestSession::launch(&name, self.launcher, &self.config, self.tracer.clone()) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(scenario = %name, error = %e, "browser launch failed");
                    return TestResult {
                        name,
                        categories,
                        status: TestStatus::Failed,
                        duration_ms: start.elapsed().as_millis(),
                        steps_run: 0,
                        assertion_results: Vec::new(),
                        error: Some(format!("Browser launch failed: {}", e)),
                        attachments: Vec::new(),
                    };
                }
            };

        let outcome = session
            .setup(scenario.fixture)
            .map_err(|e| format!("Setup failed: {}", e))
            .and_then(|()| (scenario.body)(&session).map_err(|e| e.to_string()));

        let failed = outcome.is_err();
        let SessionRecord {
            steps_run,
            assertion_results,
            attachments,
        } = session.teardown(failed);

        TestResult {
            name,
            categories,
            status: if failed {
                TestStatus::Failed
            } else {
                TestStatus::Passed
            },
            duration_ms: start.elapsed().as_millis(),
            steps_run,
            assertion_results,
            error: outcome.err(),
            attachments,
        }
    }
}
