use std::time::{Duration, Instant};

use storefront_e2e::browser::locator::Locator;
use storefront_e2e::pages::Pages;
use storefront_e2e::pages::base::{PageConfig, Probe};

use crate::common::fake_driver::{COOKIE_BUTTON, FakeDriver, FakeState, SharedState};
use crate::common::utils::{BASE_URL, fast_config, shared};

mod common;

fn page_with(visible: &[&str]) -> SharedState {
    shared(FakeState {
        visible: visible.iter().map(|s| s.to_string()).collect(),
        ..FakeState::default()
    })
}

// ============================================================================
// PageConfig
// ============================================================================

#[test]
fn url_joins_paths_onto_base() {
    let config = PageConfig {
        base_url: "https://shop.test/".into(),
        ..PageConfig::default()
    };
    assert_eq!(config.url(""), "https://shop.test");
    assert_eq!(config.url("/products"), "https://shop.test/products");
    assert_eq!(config.url("view_cart"), "https://shop.test/view_cart");
}

#[test]
fn default_config_targets_live_site() {
    let config = PageConfig::default();
    assert_eq!(config.base_url, "https://automationexercise.com");
    assert_eq!(config.settle_scale, 1.0);
    assert_eq!(config.probe_timeout(), Duration::from_millis(5000));
}

// ============================================================================
// Probes
// ============================================================================

#[test]
fn probe_reports_visible_and_hidden() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path());
    let state = page_with(&["#header"]);
    let driver = FakeDriver::new(state);
    let base = Pages::new(&driver, &config).base;

    let header = Locator::new("#header");
    let footer = Locator::new("#footer");
    assert_eq!(base.probe(&header, Duration::ZERO), Probe::Visible);
    assert_eq!(base.probe(&header, Duration::from_millis(50)), Probe::Visible);
    assert_eq!(base.probe(&footer, Duration::ZERO), Probe::Hidden);
    assert_eq!(base.probe(&footer, Duration::from_millis(50)), Probe::TimedOut);
}

#[test]
fn probe_never_errors_for_any_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path());
    let state = page_with(&["#header"]);
    state.borrow_mut().fail_queries = true;
    let driver = FakeDriver::new(state);
    let base = Pages::new(&driver, &config).base;

    let header = Locator::new("#header");
    for ms in [0, 1, 100, 5000, 60_000] {
        let timeout = Duration::from_millis(ms);
        assert!(matches!(base.probe(&header, timeout), Probe::Failed(_)));
        assert!(!base.is_visible(&header, timeout));
    }
}

// ============================================================================
// Page utilities
// ============================================================================

#[test]
fn open_navigates_relative_to_base() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path());
    let state = page_with(&[]);
    let driver = FakeDriver::new(state.clone());
    let base = Pages::new(&driver, &config).base;

    base.open("/products").unwrap();
    assert_eq!(state.borrow().url, format!("{}/products", BASE_URL));
    assert_eq!(base.current_url().unwrap(), format!("{}/products", BASE_URL));
}

#[test]
fn cookie_banner_is_clicked_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path());
    let state = page_with(&[COOKIE_BUTTON]);
    let driver = FakeDriver::new(state.clone());
    let pages = Pages::new(&driver, &config);

    pages.home.navigate_to_home().unwrap();

    let state = state.borrow();
    assert_eq!(state.navigations, vec![BASE_URL.to_string()]);
    assert!(state.calls.iter().any(|c| c.starts_with("click button:has-text")));
    assert!(!state.visible.contains(COOKIE_BUTTON));
}

#[test]
fn missing_cookie_banner_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path());
    let state = page_with(&[]);
    let driver = FakeDriver::new(state.clone());
    let pages = Pages::new(&driver, &config);

    pages.home.navigate_to_home().unwrap();
    assert!(!state.borrow().calls.iter().any(|c| c.starts_with("click")));
}

#[test]
fn zero_settle_scale_skips_delays() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path());
    let driver = FakeDriver::new(page_with(&[]));
    let base = Pages::new(&driver, &config).base;

    let start = Instant::now();
    base.settle(5_000);
    assert!(start.elapsed() < Duration::from_millis(500));
}

#[test]
fn screenshot_lands_in_configured_directory() {
    let dir = tempfile::tempdir().unwrap();
    let shots = dir.path().join("shots");
    let config = fast_config(&shots);
    let state = page_with(&[]);
    let driver = FakeDriver::new(state.clone());
    let base = Pages::new(&driver, &config).base;

    let path = base.screenshot("TC01_example").unwrap();
    assert_eq!(path, shots.join("TC01_example.png"));
    assert!(shots.is_dir());
    assert_eq!(state.borrow().screenshots, vec![path]);
}
