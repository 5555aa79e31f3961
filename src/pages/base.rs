use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::browser::driver::{Driver, WaitUntil};
use crate::browser::locator::Locator;
use crate::error::BrowserError;

pub const DEFAULT_BASE_URL: &str = "https://automationexercise.com";

const COOKIE_CONSENT_BUTTON: &str = "button:has-text('Einwilligen')";

/// Site and timing settings shared by every page object of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub base_url: String,
    pub screenshots_dir: PathBuf,
    /// Multiplier for fixed settle delays. 0.0 disables them.
    pub settle_scale: f64,
    pub probe_timeout_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            screenshots_dir: PathBuf::from("screenshots"),
            settle_scale: 1.0,
            probe_timeout_ms: 5000,
        }
    }
}

impl PageConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Absolute URL for a site route such as `/products`.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() {
            base.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// Outcome of a visibility probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Visible,
    Hidden,
    TimedOut,
    Failed(String),
}

impl Probe {
    pub fn is_visible(&self) -> bool {
        matches!(self, Probe::Visible)
    }
}

/// Shared behaviour for every page object: one driver handle plus the
/// session's page settings.
#[derive(Clone, Copy)]
pub struct BasePage<'a> {
    driver: &'a dyn Driver,
    config: &'a PageConfig,
}

impl<'a> BasePage<'a> {
    pub fn new(driver: &'a dyn Driver, config: &'a PageConfig) -> Self {
        Self { driver, config }
    }

    pub fn driver(&self) -> &'a dyn Driver {
        self.driver
    }

    pub fn config(&self) -> &'a PageConfig {
        self.config
    }

    // =====================================================================
    // Actions
    // =====================================================================

    /// Load `url` and wait for DOMContentLoaded.
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        tracing::debug!(url, "navigate");
        self.driver.navigate(url, WaitUntil::DomContentLoaded, None)?;
        self.driver.wait_for_load_state(WaitUntil::DomContentLoaded, None)
    }

    /// Navigate to a site route relative to the base URL.
    pub fn open(&self, path: &str) -> Result<(), BrowserError> {
        self.navigate(&self.config.url(path))
    }

    pub fn click(&self, locator: &Locator) -> Result<(), BrowserError> {
        tracing::trace!(%locator, "click");
        self.driver.click(locator)
    }

    pub fn fill(&self, locator: &Locator, text: &str) -> Result<(), BrowserError> {
        tracing::trace!(%locator, "fill");
        self.driver.fill(locator, text)
    }

    /// Fixed settle delay, scaled by `settle_scale`.
    pub fn settle(&self, ms: u64) {
        let scaled = (ms as f64 * self.config.settle_scale.max(0.0)) as u64;
        if scaled > 0 {
            std::thread::sleep(Duration::from_millis(scaled));
        }
    }

    // =====================================================================
    // Queries
    // =====================================================================

    /// Wait up to `timeout` for `locator` to become visible.
    ///
    /// Never fails: every driver error is folded into the returned `Probe`.
    pub fn probe(&self, locator: &Locator, timeout: Duration) -> Probe {
        if timeout.is_zero() {
            return match self.driver.is_visible(locator) {
                Ok(true) => Probe::Visible,
                Ok(false) => Probe::Hidden,
                Err(e) => Probe::Failed(e.to_string()),
            };
        }
        match self.driver.wait_for_visible(locator, timeout) {
            Ok(()) => match self.driver.is_visible(locator) {
                Ok(true) => Probe::Visible,
                Ok(false) => Probe::Hidden,
                Err(e) => Probe::Failed(e.to_string()),
            },
            Err(e) if e.is_timeout() => Probe::TimedOut,
            Err(e) => Probe::Failed(e.to_string()),
        }
    }

    pub fn is_visible(&self, locator: &Locator, timeout: Duration) -> bool {
        let probe = self.probe(locator, timeout);
        if let Probe::Failed(reason) = &probe {
            tracing::debug!(%locator, reason = %reason, "visibility probe failed");
        }
        probe.is_visible()
    }

    /// `is_visible` with the configured default probe timeout.
    pub fn is_shown(&self, locator: &Locator) -> bool {
        self.is_visible(locator, self.config.probe_timeout())
    }

    /// Condition-based wait that propagates failure.
    pub fn wait_until_visible(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.driver.wait_for_visible(locator, timeout)
    }

    /// Text content of the element, empty when it has none.
    pub fn text(&self, locator: &Locator) -> Result<String, BrowserError> {
        Ok(self.driver.text_content(locator)?.unwrap_or_default())
    }

    /// Trimmed text content.
    pub fn trimmed_text(&self, locator: &Locator) -> Result<String, BrowserError> {
        Ok(self.text(locator)?.trim().to_string())
    }

    pub fn count(&self, locator: &Locator) -> Result<usize, BrowserError> {
        self.driver.count(locator)
    }

    pub fn title(&self) -> Result<String, BrowserError> {
        self.driver.title()
    }

    pub fn current_url(&self) -> Result<String, BrowserError> {
        self.driver.current_url()
    }

    /// Rendered text of the whole `<body>`.
    pub fn body_text(&self) -> Result<String, BrowserError> {
        self.text(&Locator::new("body"))
    }

    /// Browser validation message of a form control (empty when valid).
    pub fn validation_message(&self, locator: &Locator) -> Result<String, BrowserError> {
        let value = self
            .driver
            .evaluate_on(locator, "el => el.validationMessage")?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    // =====================================================================
    // Page utilities
    // =====================================================================

    /// Click the consent button if it shows up within 3 s. Best-effort.
    pub fn dismiss_cookie_banner(&self) {
        let button = Locator::new(COOKIE_CONSENT_BUTTON);
        if !self.is_visible(&button, Duration::from_millis(3000)) {
            return;
        }
        match self.driver.click(&button) {
            Ok(()) => self.settle(1000),
            Err(e) => tracing::debug!(error = %e, "cookie banner click failed"),
        }
    }

    /// Full-page screenshot at `{screenshots_dir}/{name}.png`.
    pub fn screenshot(&self, name: &str) -> Result<PathBuf, BrowserError> {
        std::fs::create_dir_all(&self.config.screenshots_dir).map_err(|e| {
            BrowserError::SessionIO(format!(
                "Failed to create {}: {}",
                self.config.screenshots_dir.display(),
                e
            ))
        })?;
        let path = self.config.screenshots_dir.join(format!("{}.png", name));
        self.driver.screenshot(&path, true)?;
        Ok(path)
    }

    pub fn scroll_to_bottom(&self) -> Result<(), BrowserError> {
        self.driver
            .evaluate("window.scrollTo(0, document.body.scrollHeight)")?;
        Ok(())
    }

    pub fn scroll_to_top(&self) -> Result<(), BrowserError> {
        self.scroll_to(0)
    }

    pub fn scroll_to(&self, y: u64) -> Result<(), BrowserError> {
        self.driver.evaluate(&format!("window.scrollTo(0, {})", y))?;
        Ok(())
    }

    /// Current vertical scroll offset in pixels.
    pub fn scroll_offset(&self) -> Result<f64, BrowserError> {
        let value = self.driver.evaluate("window.pageYOffset")?;
        Ok(value.as_f64().unwrap_or(0.0))
    }

    pub fn scroll_into_view(&self, locator: &Locator) -> Result<(), BrowserError> {
        self.driver.scroll_into_view(locator)
    }
}
