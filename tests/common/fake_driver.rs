use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use serde_json::Value;

use storefront_e2e::browser::driver::{
    Cookie, DialogPolicy, Driver, LaunchOptions, Launcher, PageEvent, SelectBy, WaitUntil,
};
use storefront_e2e::browser::locator::Locator;
use storefront_e2e::error::BrowserError;

// Cart table selectors, mirrored from the cart page object
pub const CART_ROWS: &str = "tbody tr";
pub const CART_NAME: &str = ".cart_description h4 a";
pub const CART_PRICE: &str = ".cart_price p";
pub const CART_QUANTITY: &str = ".cart_quantity button";
pub const CART_TOTAL: &str = ".cart_total_price";
pub const CART_DELETE: &str = ".cart_quantity_delete";
pub const CART_EMPTY: &str = "text=Cart is empty!";

pub const COOKIE_BUTTON: &str = "button:has-text('Einwilligen')";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub total: String,
}

impl CartLine {
    pub fn new(name: &str, price: i64, quantity: i64) -> Self {
        Self {
            name: name.to_string(),
            price: format!("Rs. {}", price),
            quantity: quantity.to_string(),
            total: format!("Rs. {}", price * quantity),
        }
    }
}

/// Everything the fake browser knows about its single page.
#[derive(Debug, Default)]
pub struct FakeState {
    pub url: String,
    pub title: String,
    /// Innermost selectors that resolve to a visible element
    pub visible: HashSet<String>,
    /// Texts per innermost selector, one entry per match
    pub texts: HashMap<String, Vec<String>>,
    pub attributes: HashMap<(String, String), String>,
    /// Results of `evaluate`, keyed by exact script
    pub evaluations: HashMap<String, Value>,
    pub cart: Vec<CartLine>,
    pub cookies: Vec<Cookie>,
    pub events: Vec<PageEvent>,
    pub dialog_policy: Option<DialogPolicy>,

    /// Every call, formatted as "command target"
    pub calls: Vec<String>,
    pub navigations: Vec<String>,
    pub screenshots: Vec<PathBuf>,
    /// "page", "context", "browser" in the order they were closed
    pub closed: Vec<&'static str>,

    /// Visibility queries fail with a protocol error
    pub fail_queries: bool,
    pub fail_close_page: bool,
    pub fail_screenshot: bool,
}

pub type SharedState = Rc<RefCell<FakeState>>;

/// In-memory `Driver` that models a page as selector sets plus a cart.
pub struct FakeDriver {
    state: SharedState,
}

impl FakeDriver {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }

    fn protocol_error(command: &str, error: impl Into<String>) -> BrowserError {
        BrowserError::SessionProtocol {
            command: command.into(),
            error: error.into(),
        }
    }

    fn is_cart_selector(selector: &str) -> bool {
        matches!(
            selector,
            CART_ROWS | CART_NAME | CART_PRICE | CART_QUANTITY | CART_TOTAL | CART_DELETE
        )
    }

    fn cart_column(line: &CartLine, selector: &str) -> String {
        match selector {
            CART_NAME => line.name.clone(),
            CART_PRICE => line.price.clone(),
            CART_QUANTITY => line.quantity.clone(),
            CART_TOTAL => line.total.clone(),
            _ => String::new(),
        }
    }

    /// All texts the locator resolves to, ignoring `nth`.
    fn matches(&self, locator: &Locator) -> Vec<String> {
        let state = self.state.borrow();
        let selector = locator.selector();

        if selector == CART_EMPTY {
            return if state.cart.is_empty() {
                vec!["Cart is empty!".to_string()]
            } else {
                Vec::new()
            };
        }

        if Self::is_cart_selector(selector) {
            return state
                .cart
                .iter()
                .map(|line| Self::cart_column(line, selector))
                .collect();
        }

        if let Some(texts) = state.texts.get(selector) {
            return texts.clone();
        }
        if state.visible.contains(selector) {
            return vec![String::new()];
        }
        Vec::new()
    }

    fn resolve(&self, locator: &Locator) -> Option<String> {
        let all = self.matches(locator);
        let index = locator.index().unwrap_or(0);
        all.into_iter().nth(index)
    }

    fn shown(&self, locator: &Locator) -> bool {
        let selector = locator.selector();
        let is_data_only = {
            let state = self.state.borrow();
            state.texts.contains_key(selector) && !state.visible.contains(selector)
        };
        !is_data_only && self.resolve(locator).is_some()
    }
}

impl Driver for FakeDriver {
    fn navigate(
        &self,
        url: &str,
        _wait_until: WaitUntil,
        _timeout: Option<Duration>,
    ) -> Result<(), BrowserError> {
        self.record(format!("navigate {}", url));
        let mut state = self.state.borrow_mut();
        state.url = url.to_string();
        state.navigations.push(url.to_string());
        Ok(())
    }

    fn wait_for_load_state(
        &self,
        _state: WaitUntil,
        _timeout: Option<Duration>,
    ) -> Result<(), BrowserError> {
        Ok(())
    }

    fn reload(&self) -> Result<(), BrowserError> {
        self.record("reload".into());
        Ok(())
    }

    fn go_back(&self) -> Result<(), BrowserError> {
        self.record("go_back".into());
        Ok(())
    }

    fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.state.borrow().url.clone())
    }

    fn title(&self) -> Result<String, BrowserError> {
        Ok(self.state.borrow().title.clone())
    }

    fn content(&self) -> Result<String, BrowserError> {
        let state = self.state.borrow();
        Ok(state
            .texts
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn click(&self, locator: &Locator) -> Result<(), BrowserError> {
        self.record(format!("click {}", locator));
        if locator.selector() == CART_DELETE {
            let index = locator.index().unwrap_or(0);
            let mut state = self.state.borrow_mut();
            if index >= state.cart.len() {
                return Err(Self::protocol_error("click", "no such cart row"));
            }
            state.cart.remove(index);
            return Ok(());
        }
        if !self.shown(locator) {
            return Err(BrowserError::Timeout {
                command: "click".into(),
                error: format!("{} not visible", locator),
            });
        }
        if locator.selector() == COOKIE_BUTTON {
            self.state.borrow_mut().visible.remove(COOKIE_BUTTON);
        }
        Ok(())
    }

    fn fill(&self, locator: &Locator, text: &str) -> Result<(), BrowserError> {
        self.record(format!("fill {} {}", locator, text));
        Ok(())
    }

    fn clear(&self, locator: &Locator) -> Result<(), BrowserError> {
        self.record(format!("clear {}", locator));
        Ok(())
    }

    fn hover(&self, locator: &Locator) -> Result<(), BrowserError> {
        self.record(format!("hover {}", locator));
        Ok(())
    }

    fn set_checked(&self, locator: &Locator, checked: bool) -> Result<(), BrowserError> {
        self.record(format!("set_checked {} {}", locator, checked));
        Ok(())
    }

    fn select_option(&self, locator: &Locator, option: &SelectBy) -> Result<(), BrowserError> {
        self.record(format!("select_option {} {:?}", locator, option));
        Ok(())
    }

    fn scroll_into_view(&self, locator: &Locator) -> Result<(), BrowserError> {
        self.record(format!("scroll_into_view {}", locator));
        Ok(())
    }

    fn wait_for_visible(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError> {
        if self.state.borrow().fail_queries {
            return Err(Self::protocol_error("wait_for_visible", "target closed"));
        }
        if self.shown(locator) {
            Ok(())
        } else {
            Err(BrowserError::Timeout {
                command: "wait_for_visible".into(),
                error: format!("{} not visible after {}ms", locator, timeout.as_millis()),
            })
        }
    }

    fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError> {
        if self.state.borrow().fail_queries {
            return Err(Self::protocol_error("is_visible", "target closed"));
        }
        Ok(self.shown(locator))
    }

    fn is_enabled(&self, locator: &Locator) -> Result<bool, BrowserError> {
        Ok(self.shown(locator))
    }

    fn is_checked(&self, _locator: &Locator) -> Result<bool, BrowserError> {
        Ok(false)
    }

    fn count(&self, locator: &Locator) -> Result<usize, BrowserError> {
        Ok(self.matches(locator).len())
    }

    fn text_content(&self, locator: &Locator) -> Result<Option<String>, BrowserError> {
        match self.resolve(locator) {
            Some(text) => Ok(Some(text)),
            None => Err(BrowserError::Timeout {
                command: "text_content".into(),
                error: format!("{} not found", locator),
            }),
        }
    }

    fn all_text_contents(&self, locator: &Locator) -> Result<Vec<String>, BrowserError> {
        Ok(self.matches(locator))
    }

    fn input_value(&self, locator: &Locator) -> Result<String, BrowserError> {
        Ok(self.resolve(locator).unwrap_or_default())
    }

    fn attribute(&self, locator: &Locator, name: &str) -> Result<Option<String>, BrowserError> {
        let key = (locator.selector().to_string(), name.to_string());
        Ok(self.state.borrow().attributes.get(&key).cloned())
    }

    fn evaluate(&self, script: &str) -> Result<Value, BrowserError> {
        self.record(format!("evaluate {}", script));
        Ok(self
            .state
            .borrow()
            .evaluations
            .get(script)
            .cloned()
            .unwrap_or(Value::Null))
    }

    fn evaluate_on(&self, locator: &Locator, script: &str) -> Result<Value, BrowserError> {
        self.record(format!("evaluate_on {} {}", locator, script));
        Ok(Value::String(String::new()))
    }

    fn screenshot(&self, path: &Path, _full_page: bool) -> Result<(), BrowserError> {
        let mut state = self.state.borrow_mut();
        if state.fail_screenshot {
            return Err(Self::protocol_error("screenshot", "page crashed"));
        }
        state.screenshots.push(path.to_path_buf());
        Ok(())
    }

    fn cookies(&self) -> Result<Vec<Cookie>, BrowserError> {
        Ok(self.state.borrow().cookies.clone())
    }

    fn set_dialog_policy(&self, policy: DialogPolicy) -> Result<(), BrowserError> {
        self.state.borrow_mut().dialog_policy = Some(policy);
        Ok(())
    }

    fn take_events(&self) -> Result<Vec<PageEvent>, BrowserError> {
        Ok(std::mem::take(&mut self.state.borrow_mut().events))
    }

    fn close_page(&self) -> Result<(), BrowserError> {
        let mut state = self.state.borrow_mut();
        state.closed.push("page");
        if state.fail_close_page {
            return Err(Self::protocol_error("close_page", "already closed"));
        }
        Ok(())
    }

    fn close_context(&self) -> Result<(), BrowserError> {
        self.state.borrow_mut().closed.push("context");
        Ok(())
    }

    fn close_browser(&self) -> Result<(), BrowserError> {
        self.state.borrow_mut().closed.push("browser");
        Ok(())
    }
}

/// Hands out drivers over a fresh state per launch and keeps every state for
/// inspection.
#[derive(Default)]
pub struct FakeLauncher {
    pub launched: RefCell<Vec<SharedState>>,
    pub options: RefCell<Vec<LaunchOptions>>,
    /// Applied to each new state before the driver is returned
    pub prepare: Option<fn(&mut FakeState)>,
    pub fail: bool,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(prepare: fn(&mut FakeState)) -> Self {
        Self {
            prepare: Some(prepare),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn launch_count(&self) -> usize {
        self.launched.borrow().len()
    }

    pub fn state(&self, index: usize) -> SharedState {
        self.launched.borrow()[index].clone()
    }
}

impl Launcher for FakeLauncher {
    fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn Driver>, BrowserError> {
        if self.fail {
            return Err(BrowserError::SessionIO("browser_server.js not found".into()));
        }
        self.options.borrow_mut().push(options.clone());
        let mut state = FakeState::default();
        if let Some(prepare) = self.prepare {
            prepare(&mut state);
        }
        let shared = Rc::new(RefCell::new(state));
        self.launched.borrow_mut().push(shared.clone());
        Ok(Box::new(FakeDriver::new(shared)))
    }
}
