use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use storefront_e2e::harness::session::{SessionConfig, TestSession};
use storefront_e2e::pages::base::PageConfig;
use storefront_e2e::trace::logger::TraceLogger;

use crate::common::fake_driver::{FakeDriver, FakeState, SharedState};

pub const BASE_URL: &str = "https://shop.test";

/// Page settings with every settle delay disabled.
pub fn fast_config(screenshots: &Path) -> PageConfig {
    PageConfig {
        base_url: BASE_URL.to_string(),
        screenshots_dir: screenshots.to_path_buf(),
        settle_scale: 0.0,
        probe_timeout_ms: 10,
    }
}

pub fn fast_session_config(screenshots: &Path) -> SessionConfig {
    SessionConfig {
        pages: fast_config(screenshots),
        ..SessionConfig::default()
    }
}

pub fn shared(state: FakeState) -> SharedState {
    Rc::new(RefCell::new(state))
}

/// A session over a fake page, not yet set up.
pub fn fake_session(name: &str, state: &SharedState, screenshots: &Path) -> TestSession {
    TestSession::with_driver(
        name,
        Box::new(FakeDriver::new(state.clone())),
        fast_config(screenshots),
        Arc::new(TraceLogger::disabled()),
    )
}
