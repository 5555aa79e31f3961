use std::sync::Arc;

use storefront_e2e::error::ScenarioError;
use storefront_e2e::harness::context::AssertionKind;
use storefront_e2e::harness::scenario::FixtureKind;
use storefront_e2e::harness::session::{SessionState, TestSession};
use storefront_e2e::trace::logger::TraceLogger;

use crate::common::fake_driver::{FakeDriver, FakeState};
use crate::common::utils::{BASE_URL, fake_session, fast_config, shared};

mod common;

// ============================================================================
// Setup
// ============================================================================

#[test]
fn setup_loads_site_root() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(FakeState::default());
    let mut session = fake_session("TC00_Setup", &state, dir.path());
    assert_eq!(session.state(), SessionState::Uninitialized);

    session.setup(FixtureKind::Base).unwrap();

    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(state.borrow().navigations, vec![BASE_URL.to_string()]);
    assert!(session.account().is_err());
}

#[test]
fn signup_fixture_generates_unregistered_account() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(FakeState::default());
    let mut session = fake_session("TC00_Signup", &state, dir.path());

    session.setup(FixtureKind::Signup).unwrap();

    let account = session.account().unwrap();
    assert!(account.email.ends_with("@example.com"));
    assert!(!state.borrow().calls.iter().any(|c| c.starts_with("click")));
}

#[test]
fn login_fixture_fails_when_signup_link_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(FakeState::default());
    let mut session = fake_session("TC00_Login", &state, dir.path());

    let err = session.setup(FixtureKind::Login).unwrap_err();
    assert!(matches!(err, ScenarioError::Browser(_)));
}

const REGISTRATION_FLOW: [&str; 6] = [
    "a[href='/login']",
    "button[data-qa='signup-button']",
    "button[data-qa='create-account']",
    "h2[data-qa='account-created']",
    "a[data-qa='continue-button']",
    "a[href='/logout']",
];

fn registration_page(skip: Option<&str>) -> FakeState {
    FakeState {
        visible: REGISTRATION_FLOW
            .iter()
            .filter(|s| Some(**s) != skip)
            .map(|s| s.to_string())
            .collect(),
        ..FakeState::default()
    }
}

#[test]
fn login_fixture_registers_then_logs_out() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(registration_page(None));
    let mut session = fake_session("TC00_Login", &state, dir.path());

    session.setup(FixtureKind::Login).unwrap();

    let account = session.account().unwrap();
    let calls = state.borrow().calls.clone();
    let email_fill = format!("fill input[data-qa='signup-email'] {}", account.email);
    assert!(calls.contains(&email_fill));
    let clicks: Vec<&str> = calls
        .iter()
        .filter(|c| c.starts_with("click"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        clicks,
        vec![
            "click a[href='/login']",
            "click button[data-qa='signup-button']",
            "click button[data-qa='create-account']",
            "click a[data-qa='continue-button']",
            "click a[href='/logout']",
        ]
    );
}

#[test]
fn login_fixture_fails_when_account_is_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(registration_page(Some("h2[data-qa='account-created']")));
    let mut session = fake_session("TC00_Login", &state, dir.path());

    let err = session.setup(FixtureKind::Login).unwrap_err();

    assert!(matches!(err, ScenarioError::Assertion { .. }));
    assert!(session.account().is_err());
    assert!(!state.borrow().calls.iter().any(|c| c == "click a[href='/logout']"));
}

#[test]
fn sessions_do_not_share_state() {
    let dir = tempfile::tempdir().unwrap();
    let first_state = shared(FakeState::default());
    let second_state = shared(FakeState::default());

    let mut first = fake_session("TC00_A", &first_state, dir.path());
    first.setup(FixtureKind::Signup).unwrap();
    let first_email = first.account().unwrap().email.clone();
    first.step("only in the first session");
    let first_record = first.teardown(false);

    let mut second = fake_session("TC00_B", &second_state, dir.path());
    second.setup(FixtureKind::Signup).unwrap();
    assert_ne!(second.account().unwrap().email, first_email);
    let second_record = second.teardown(false);

    assert_eq!(first_record.steps_run, 1);
    assert_eq!(second_record.steps_run, 0);
    assert_eq!(first_state.borrow().closed.len(), 3);
    assert_eq!(second_state.borrow().closed.len(), 3);
}

// ============================================================================
// Assertions
// ============================================================================

#[test]
fn assertions_record_and_fail_fast() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(FakeState::default());
    let session = fake_session("TC00_Assert", &state, dir.path());

    session.step("compare things");
    assert!(session.assert_true(true, "truth holds").is_ok());
    assert!(session.assert_eq(2 + 2, 4, "math works").is_ok());
    assert!(session.assert_contains("Blue Top", "blue", "ignores case").is_ok());
    assert!(session.assert_ge(5, 5, "inclusive bound").is_ok());

    let err = session.assert_lt(10, 3, "ten is small").unwrap_err();
    assert!(err.to_string().contains("ten is small"));
    assert!(err.to_string().contains("expected < 3, actual 10"));

    let results = session.assertion_results();
    assert_eq!(results.len(), 5);
    assert!(results[..4].iter().all(|r| r.passed));
    assert_eq!(results[4].kind, AssertionKind::Less);
    assert_eq!(results[4].step_index, 1);
    assert!(!results[4].passed);
}

#[test]
fn assert_starts_with_is_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(FakeState::default());
    let session = fake_session("TC00_Prefix", &state, dir.path());

    assert!(session.assert_starts_with("Rs. 500", "Rs.", "price prefix").is_ok());
    assert!(session.assert_starts_with("rs. 500", "Rs.", "price prefix").is_err());
}

#[test]
fn url_contains_ignores_case() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(FakeState {
        url: "https://shop.test/View_Cart".into(),
        ..FakeState::default()
    });
    let session = fake_session("TC00_Url", &state, dir.path());
    assert!(session.url_contains("/view_cart").unwrap());
    assert!(!session.url_contains("/products").unwrap());
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn failed_teardown_takes_screenshot_and_releases_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(FakeState::default());
    let session = fake_session("TC99_Broken", &state, dir.path());

    let record = session.teardown(true);

    assert_eq!(record.attachments.len(), 1);
    let attachment = &record.attachments[0];
    assert_eq!(attachment.description, "Failure Screenshot");
    let file = attachment.path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file.starts_with("FAILED_TC99_Broken_"), "{}", file);
    assert!(file.ends_with(".png"));

    let state = state.borrow();
    assert_eq!(state.screenshots.len(), 1);
    assert_eq!(state.closed, vec!["page", "context", "browser"]);
}

#[test]
fn passed_teardown_takes_no_screenshot() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(FakeState::default());
    let record = fake_session("TC98_Fine", &state, dir.path()).teardown(false);

    assert!(record.attachments.is_empty());
    assert!(state.borrow().screenshots.is_empty());
    assert_eq!(state.borrow().closed, vec!["page", "context", "browser"]);
}

#[test]
fn cleanup_errors_never_stop_teardown() {
    let dir = tempfile::tempdir().unwrap();
    let state = shared(FakeState {
        fail_close_page: true,
        fail_screenshot: true,
        ..FakeState::default()
    });
    let record = fake_session("TC97_Flaky", &state, dir.path()).teardown(true);

    assert!(record.attachments.is_empty());
    assert_eq!(state.borrow().closed, vec!["page", "context", "browser"]);
}

// ============================================================================
// Trace file
// ============================================================================

#[test]
fn lifecycle_is_written_to_trace_file() {
    let dir = tempfile::tempdir().unwrap();
    let trace_path = dir.path().join("trace.jsonl");
    let state = shared(FakeState::default());
    let mut session = TestSession::with_driver(
        "TC00_Trace",
        Box::new(FakeDriver::new(state)),
        fast_config(dir.path()),
        Arc::new(TraceLogger::new(&trace_path)),
    );

    session.setup(FixtureKind::Base).unwrap();
    session.step("look around");
    session.assert_true(true, "still fine").unwrap();
    session.teardown(false);

    let content = std::fs::read_to_string(&trace_path).unwrap();
    let kinds: Vec<String> = content
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["kind"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds, vec!["started", "step", "assertion", "finished"]);
}
