use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::browser::locator::Locator;
use crate::error::BrowserError;

/// Browser launch configuration for one isolated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchOptions {
    pub headless: bool,
    /// No fixed viewport; the window is started maximized.
    pub maximized: bool,
    pub accept_downloads: bool,
    /// Default timeout for navigation and actions.
    pub default_timeout_ms: u64,
    pub slow_mo_ms: u64,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: false,
            maximized: true,
            accept_downloads: true,
            default_timeout_ms: 30_000,
            slow_mo_ms: 0,
        }
    }
}

/// Page lifecycle signal to wait for after navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitUntil {
    #[serde(rename = "domcontentloaded")]
    DomContentLoaded,
    Load,
    #[serde(rename = "networkidle")]
    NetworkIdle,
}

/// How to pick an `<option>` in a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectBy {
    Value(String),
    Label(String),
}

/// What the page does with `alert`/`confirm`/`prompt` dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogPolicy {
    Accept,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(rename = "httpOnly", default)]
    pub http_only: bool,
    #[serde(rename = "sameSite", default)]
    pub same_site: Option<String>,
}

/// Page events recorded by the driver since the last `take_events` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    Request {
        method: String,
        #[serde(rename = "resourceType")]
        resource_type: String,
        url: String,
    },
    Response {
        url: String,
        status: u16,
        #[serde(rename = "resourceType", default)]
        resource_type: String,
        #[serde(default)]
        headers: HashMap<String, String>,
    },
    RequestFailed {
        url: String,
        #[serde(rename = "resourceType", default)]
        resource_type: String,
        #[serde(default)]
        failure: Option<String>,
    },
    Dialog {
        #[serde(rename = "dialogType", default)]
        dialog_type: String,
        message: String,
    },
}

/// The browser-automation boundary.
///
/// One implementation owns one browser, one context and one page. Every
/// method is a blocking call that returns once the browser has acted or the
/// operation's timeout elapsed. Page objects only ever talk to this trait.
pub trait Driver {
    fn navigate(
        &self,
        url: &str,
        wait_until: WaitUntil,
        timeout: Option<Duration>,
    ) -> Result<(), BrowserError>;
    fn wait_for_load_state(
        &self,
        state: WaitUntil,
        timeout: Option<Duration>,
    ) -> Result<(), BrowserError>;
    fn reload(&self) -> Result<(), BrowserError>;
    fn go_back(&self) -> Result<(), BrowserError>;
    fn current_url(&self) -> Result<String, BrowserError>;
    fn title(&self) -> Result<String, BrowserError>;
    /// Full serialized HTML of the page.
    fn content(&self) -> Result<String, BrowserError>;

    fn click(&self, locator: &Locator) -> Result<(), BrowserError>;
    fn fill(&self, locator: &Locator, text: &str) -> Result<(), BrowserError>;
    fn clear(&self, locator: &Locator) -> Result<(), BrowserError>;
    fn hover(&self, locator: &Locator) -> Result<(), BrowserError>;
    fn set_checked(&self, locator: &Locator, checked: bool) -> Result<(), BrowserError>;
    fn select_option(&self, locator: &Locator, option: &SelectBy) -> Result<(), BrowserError>;
    fn scroll_into_view(&self, locator: &Locator) -> Result<(), BrowserError>;

    /// Wait until the locator resolves to a visible element.
    fn wait_for_visible(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError>;
    fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError>;
    fn is_enabled(&self, locator: &Locator) -> Result<bool, BrowserError>;
    fn is_checked(&self, locator: &Locator) -> Result<bool, BrowserError>;
    fn count(&self, locator: &Locator) -> Result<usize, BrowserError>;
    fn text_content(&self, locator: &Locator) -> Result<Option<String>, BrowserError>;
    fn all_text_contents(&self, locator: &Locator) -> Result<Vec<String>, BrowserError>;
    fn input_value(&self, locator: &Locator) -> Result<String, BrowserError>;
    fn attribute(&self, locator: &Locator, name: &str) -> Result<Option<String>, BrowserError>;

    /// Evaluate a JS expression or function source in the page.
    fn evaluate(&self, script: &str) -> Result<Value, BrowserError>;
    /// Evaluate a JS function with the resolved element as its argument.
    fn evaluate_on(&self, locator: &Locator, script: &str) -> Result<Value, BrowserError>;

    fn screenshot(&self, path: &Path, full_page: bool) -> Result<(), BrowserError>;
    fn cookies(&self) -> Result<Vec<Cookie>, BrowserError>;
    fn set_dialog_policy(&self, policy: DialogPolicy) -> Result<(), BrowserError>;
    fn take_events(&self) -> Result<Vec<PageEvent>, BrowserError>;

    fn close_page(&self) -> Result<(), BrowserError>;
    fn close_context(&self) -> Result<(), BrowserError>;
    fn close_browser(&self) -> Result<(), BrowserError>;
}

/// Creates a fresh driver per test session.
pub trait Launcher {
    fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn Driver>, BrowserError>;
}
