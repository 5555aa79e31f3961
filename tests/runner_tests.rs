use std::sync::Arc;

use storefront_e2e::error::{BrowserError, ScenarioError};
use storefront_e2e::harness::runner::{SuiteRunner, TestStatus};
use storefront_e2e::harness::scenario::{Category, FixtureKind, Scenario};
use storefront_e2e::harness::session::TestSession;
use storefront_e2e::trace::logger::TraceLogger;

use crate::common::fake_driver::{FakeLauncher, FakeState};
use crate::common::utils::fast_session_config;

mod common;

// ============================================================================
// Scenario bodies
// ============================================================================

fn passes(t: &TestSession) -> Result<(), ScenarioError> {
    t.step("Check the header");
    t.assert_true(t.pages().home.is_site_header_visible(), "Header should be visible")?;
    t.step("Check the URL");
    t.assert_true(t.url_contains("shop.test")?, "Should be on the site")
}

fn fails_assertion(t: &TestSession) -> Result<(), ScenarioError> {
    t.step("Look for the cart");
    t.assert_true(t.pages().cart.is_loaded(), "Cart table should be visible")?;
    t.step("Never reached");
    Ok(())
}

fn fails_in_browser(t: &TestSession) -> Result<(), ScenarioError> {
    t.step("Click a link that is not there");
    t.pages().home.click_products()?;
    Ok(())
}

fn never_runs(_t: &TestSession) -> Result<(), ScenarioError> {
    Err(ScenarioError::Browser(BrowserError::SessionState(
        "ignored scenario ran".into(),
    )))
}

fn scenario(id: &'static str, body: fn(&TestSession) -> Result<(), ScenarioError>) -> Scenario {
    Scenario {
        id,
        name: "Fake_Scenario",
        categories: &[Category::Smoke],
        fixture: FixtureKind::Base,
        ignore: None,
        body,
    }
}

fn header_page(state: &mut FakeState) {
    state.visible.insert("header".to_string());
}

fn runner_parts() -> (tempfile::TempDir, Arc<TraceLogger>) {
    (tempfile::tempdir().unwrap(), Arc::new(TraceLogger::disabled()))
}

// ============================================================================
// Outcomes
// ============================================================================

#[test]
fn passing_scenario_is_reported_passed() {
    let (dir, tracer) = runner_parts();
    let launcher = FakeLauncher::with_page(header_page);
    let runner = SuiteRunner::new(&launcher, fast_session_config(dir.path()), tracer);

    let result = runner.run_one(&scenario("TC01", passes));

    assert_eq!(result.name, "TC01_Fake_Scenario");
    assert_eq!(result.categories, vec!["Smoke"]);
    assert_eq!(result.status, TestStatus::Passed);
    assert_eq!(result.steps_run, 2);
    assert_eq!(result.assertion_results.len(), 2);
    assert!(result.error.is_none());
    assert!(result.attachments.is_empty());
    assert_eq!(launcher.state(0).borrow().closed, vec!["page", "context", "browser"]);
}

#[test]
fn failed_assertion_stops_scenario_and_attaches_screenshot() {
    let (dir, tracer) = runner_parts();
    let launcher = FakeLauncher::new();
    let runner = SuiteRunner::new(&launcher, fast_session_config(dir.path()), tracer);

    let result = runner.run_one(&scenario("TC02", fails_assertion));

    assert_eq!(result.status, TestStatus::Failed);
    assert_eq!(result.steps_run, 1);
    assert_eq!(result.assertion_results.len(), 1);
    assert!(!result.assertion_results[0].passed);
    assert!(result.error.as_deref().unwrap().contains("Cart table should be visible"));
    assert_eq!(result.attachments.len(), 1);
    assert_eq!(launcher.state(0).borrow().screenshots.len(), 1);
}

#[test]
fn browser_error_fails_scenario() {
    let (dir, tracer) = runner_parts();
    let launcher = FakeLauncher::new();
    let runner = SuiteRunner::new(&launcher, fast_session_config(dir.path()), tracer);

    let result = runner.run_one(&scenario("TC03", fails_in_browser));

    assert_eq!(result.status, TestStatus::Failed);
    assert!(result.assertion_results.is_empty());
    assert!(result.error.as_deref().unwrap().contains("click"));
    assert_eq!(launcher.state(0).borrow().closed.len(), 3);
}

#[test]
fn ignored_scenario_is_skipped_without_a_browser() {
    let (dir, tracer) = runner_parts();
    let launcher = FakeLauncher::new();
    let runner = SuiteRunner::new(&launcher, fast_session_config(dir.path()), tracer);

    let mut ignored = scenario("TC04", never_runs);
    ignored.ignore = Some("flaky upstream");
    let result = runner.run_one(&ignored);

    assert_eq!(result.status, TestStatus::Skipped);
    assert!(result.skipped());
    assert_eq!(result.error.as_deref(), Some("flaky upstream"));
    assert_eq!(launcher.launch_count(), 0);
}

#[test]
fn launch_failure_is_a_failed_result() {
    let (dir, tracer) = runner_parts();
    let launcher = FakeLauncher::failing();
    let runner = SuiteRunner::new(&launcher, fast_session_config(dir.path()), tracer);

    let result = runner.run_one(&scenario("TC05", passes));

    assert_eq!(result.status, TestStatus::Failed);
    assert!(result.error.as_deref().unwrap().starts_with("Browser launch failed"));
}

#[test]
fn setup_failure_is_reported_as_setup() {
    let (dir, tracer) = runner_parts();
    let launcher = FakeLauncher::new();
    let runner = SuiteRunner::new(&launcher, fast_session_config(dir.path()), tracer);

    let mut needs_login = scenario("TC06", passes);
    needs_login.fixture = FixtureKind::Login;
    let result = runner.run_one(&needs_login);

    assert_eq!(result.status, TestStatus::Failed);
    assert!(result.error.as_deref().unwrap().starts_with("Setup failed"));
    assert_eq!(launcher.state(0).borrow().closed.len(), 3);
}

// ============================================================================
// Suite runs
// ============================================================================

#[test]
fn each_scenario_gets_its_own_session() {
    let (dir, tracer) = runner_parts();
    let launcher = FakeLauncher::with_page(header_page);
    let runner = SuiteRunner::new(&launcher, fast_session_config(dir.path()), tracer);

    let scenarios = vec![
        scenario("TC01", passes),
        scenario("TC02", fails_assertion),
        scenario("TC03", passes),
    ];
    let results = runner.run(&scenarios);

    assert_eq!(results.len(), 3);
    assert_eq!(launcher.launch_count(), 3);
    let statuses: Vec<TestStatus> = results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![TestStatus::Passed, TestStatus::Failed, TestStatus::Passed]
    );
    for i in 0..3 {
        assert_eq!(launcher.state(i).borrow().navigations.len(), 1);
    }
}
