use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::browser::driver::{Driver, LaunchOptions, Launcher};
use crate::error::{BrowserError, ScenarioError};
use crate::harness::context::{AssertionKind, AssertionResult, TestContext};
use crate::harness::scenario::FixtureKind;
use crate::pages::Pages;
use crate::pages::base::PageConfig;
use crate::support::fixtures::{self, Account};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{TraceEvent, TraceKind};

/// Everything needed to provision one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub launch: LaunchOptions,
    pub pages: PageConfig,
}

/// A file produced while a scenario ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub path: PathBuf,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Browser launched, site not loaded yet
    Uninitialized,
    /// Site root loaded; page objects usable
    Ready,
}

/// What a closed session leaves behind.
#[derive(Debug, Clone, Default)]
pub struct SessionRecord {
    pub steps_run: usize,
    pub assertion_results: Vec<AssertionResult>,
    pub attachments: Vec<Attachment>,
}

/// One isolated browser session owned by one scenario.
///
/// Created by [`TestSession::launch`], made ready by [`TestSession::setup`],
/// and closed by [`TestSession::teardown`], which consumes it.
pub struct TestSession {
    name: String,
    driver: Box<dyn Driver>,
    config: PageConfig,
    state: Cell<SessionState>,
    account: Option<Account>,
    context: RefCell<TestContext>,
    attachments: RefCell<Vec<Attachment>>,
    tracer: Arc<TraceLogger>,
}

impl TestSession {
    /// Launch a fresh browser for the scenario `name`.
    pub fn launch(
        name: &str,
        launcher: &dyn Launcher,
        config: &SessionConfig,
        tracer: Arc<TraceLogger>,
    ) -> Result<Self, BrowserError> {
        let driver = launcher.launch(&config.launch)?;
        Ok(Self::with_driver(name, driver, config.pages.clone(), tracer))
    }

    /// Wrap an already launched driver.
    pub fn with_driver(
        name: &str,
        driver: Box<dyn Driver>,
        config: PageConfig,
        tracer: Arc<TraceLogger>,
    ) -> Self {
        Self {
            name: name.to_string(),
            driver,
            config,
            state: Cell::new(SessionState::Uninitialized),
            account: None,
            context: RefCell::new(TestContext::new()),
            attachments: RefCell::new(Vec::new()),
            tracer,
        }
    }

    /// Load the site root, dismiss the cookie banner, then run the fixture's
    /// extension.
    pub fn setup(&mut self, fixture: FixtureKind) -> Result<(), ScenarioError> {
        self.pages().home.navigate_to_home()?;
        self.state.set(SessionState::Ready);

        tracing::info!("========================================");
        tracing::info!("Test Started: {}", self.name);
        tracing::info!("========================================");
        self.trace(TraceEvent::now(&self.name, 0, TraceKind::Started, "Test Started"));

        match fixture {
            FixtureKind::Base => {}
            FixtureKind::Signup => {
                self.account = Some(Account::generate());
            }
            FixtureKind::Login => {
                let account = Account::generate();
                self.register(&account)?;
                self.account = Some(account);
            }
        }
        Ok(())
    }

    /// Sign up `account`, complete registration, continue, then log out.
    fn register(&self, account: &Account) -> Result<(), ScenarioError> {
        let pages = self.pages();
        self.step(format!("Registering {}", account.email));
        pages.home.click_signup_login()?;
        pages.login.perform_signup(&account.name, &account.email)?;
        pages.signup.quick_registration(
            &account.password,
            "Test",
            "User",
            &fixtures::random_mobile(),
        )?;
        if !pages.signup.is_account_created_visible() {
            return Err(ScenarioError::assertion(format!(
                "Account for {} was not created",
                account.email
            )));
        }
        pages.signup.click_continue()?;
        pages.home.click_logout()?;
        self.wait(1000);
        Ok(())
    }

    /// Record the outcome, capture a failure screenshot if needed, and
    /// release page, context and browser in that order.
    pub fn teardown(self, failed: bool) -> SessionRecord {
        let status = if failed { "Failed" } else { "Passed" };
        let step = self.context.borrow().current_step;

        tracing::info!("========================================");
        tracing::info!("Test Finished: {}", self.name);
        tracing::info!("Status: {}", status);
        tracing::info!("========================================");
        self.trace(
            TraceEvent::now(&self.name, step, TraceKind::Finished, "Test Finished")
                .with_status(status),
        );

        if failed {
            let name = format!("FAILED_{}_{}", self.name, timestamp());
            match self.pages().base.screenshot(&name) {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "Screenshot saved");
                    self.attach(path, "Failure Screenshot");
                }
                Err(e) => tracing::warn!(error = %e, "Failed to take screenshot"),
            }
        }

        if let Err(e) = self.driver.close_page() {
            tracing::warn!(error = %e, "Error closing page");
        }
        if let Err(e) = self.driver.close_context() {
            tracing::warn!(error = %e, "Error closing context");
        }
        if let Err(e) = self.driver.close_browser() {
            tracing::warn!(error = %e, "Error closing browser");
        }

        let context = self.context.into_inner();
        SessionRecord {
            steps_run: context.current_step,
            assertion_results: context.assertion_results,
            attachments: self.attachments.into_inner(),
        }
    }

    // =====================================================================
    // Accessors
    // =====================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn pages(&self) -> Pages<'_> {
        Pages::new(self.driver.as_ref(), &self.config)
    }

    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Account created by the Signup/Login fixtures.
    pub fn account(&self) -> Result<&Account, ScenarioError> {
        self.account
            .as_ref()
            .ok_or_else(|| ScenarioError::assertion("scenario has no account fixture"))
    }

    pub fn assertion_results(&self) -> Vec<AssertionResult> {
        self.context.borrow().assertion_results.clone()
    }

    // =====================================================================
    // Helpers
    // =====================================================================

    /// Log a scenario step to the console and the trace file.
    pub fn step(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        let step = {
            let mut ctx = self.context.borrow_mut();
            ctx.advance();
            ctx.current_step
        };
        tracing::info!(scenario = %self.name, step, "{}", message);
        self.trace(TraceEvent::now(&self.name, step, TraceKind::Step, message));
    }

    /// Fixed delay, scaled like every settle delay.
    pub fn wait(&self, ms: u64) {
        self.pages().base.settle(ms);
    }

    pub fn current_url(&self) -> Result<String, BrowserError> {
        self.driver.current_url()
    }

    /// Case-insensitive substring test on the current URL.
    pub fn url_contains(&self, text: &str) -> Result<bool, BrowserError> {
        Ok(self
            .current_url()?
            .to_lowercase()
            .contains(&text.to_lowercase()))
    }

    pub fn reload(&self) -> Result<(), BrowserError> {
        self.driver.reload()?;
        self.wait(1000);
        Ok(())
    }

    pub fn go_back(&self) -> Result<(), BrowserError> {
        self.driver.go_back()?;
        self.wait(1000);
        Ok(())
    }

    /// Full-page screenshot at `{screenshots_dir}/{name}_{timestamp}.png`.
    pub fn screenshot(&self, name: &str) -> Result<PathBuf, BrowserError> {
        let path = self
            .pages()
            .base
            .screenshot(&format!("{}_{}", name, timestamp()))?;
        tracing::info!(path = %path.display(), "Screenshot saved");
        self.attach(path.clone(), name);
        Ok(path)
    }

    pub fn random_name(&self) -> String {
        fixtures::random_name()
    }

    pub fn random_email(&self) -> String {
        fixtures::random_email()
    }

    pub fn random_mobile(&self) -> String {
        fixtures::random_mobile()
    }

    fn attach(&self, path: PathBuf, description: &str) {
        let step = self.context.borrow().current_step;
        self.trace(TraceEvent::now(
            &self.name,
            step,
            TraceKind::Attachment,
            path.display(),
        ));
        self.attachments.borrow_mut().push(Attachment {
            path,
            description: description.to_string(),
        });
    }

    fn trace(&self, event: TraceEvent) {
        self.tracer.log(&event);
    }

    // =====================================================================
    // Assertions (record, then fail fast)
    // =====================================================================

    fn check(
        &self,
        kind: AssertionKind,
        passed: bool,
        expected: Option<String>,
        actual: Option<String>,
        message: &str,
    ) -> Result<(), ScenarioError> {
        let step = self.context.borrow().current_step;
        self.context.borrow_mut().record(AssertionResult {
            step_index: step,
            kind,
            passed,
            expected: expected.clone(),
            actual: actual.clone(),
            message: message.to_string(),
        });
        self.trace(
            TraceEvent::now(&self.name, step, TraceKind::Assertion, message).with_passed(passed),
        );

        if passed {
            return Ok(());
        }
        let detail = match (expected, actual) {
            (Some(e), Some(a)) => format!("{} (expected {}, actual {})", message, e, a),
            (None, Some(a)) => format!("{} (actual {})", message, a),
            _ => message.to_string(),
        };
        tracing::error!(scenario = %self.name, "{}", detail);
        Err(ScenarioError::assertion(detail))
    }

    pub fn assert_true(&self, condition: bool, message: &str) -> Result<(), ScenarioError> {
        self.check(AssertionKind::True, condition, None, None, message)
    }

    pub fn assert_false(&self, condition: bool, message: &str) -> Result<(), ScenarioError> {
        self.check(AssertionKind::False, !condition, None, None, message)
    }

    pub fn assert_eq<T: PartialEq + Debug>(
        &self,
        actual: T,
        expected: T,
        message: &str,
    ) -> Result<(), ScenarioError> {
        self.check(
            AssertionKind::Equal,
            actual == expected,
            Some(format!("{:?}", expected)),
            Some(format!("{:?}", actual)),
            message,
        )
    }

    pub fn assert_ne<T: PartialEq + Debug>(
        &self,
        actual: T,
        unexpected: T,
        message: &str,
    ) -> Result<(), ScenarioError> {
        self.check(
            AssertionKind::NotEqual,
            actual != unexpected,
            Some(format!("not {:?}", unexpected)),
            Some(format!("{:?}", actual)),
            message,
        )
    }

    /// Case-insensitive substring assertion.
    pub fn assert_contains(
        &self,
        haystack: &str,
        needle: &str,
        message: &str,
    ) -> Result<(), ScenarioError> {
        self.check(
            AssertionKind::Contains,
            haystack.to_lowercase().contains(&needle.to_lowercase()),
            Some(format!("contains {:?}", needle)),
            Some(format!("{:?}", haystack)),
            message,
        )
    }

    pub fn assert_starts_with(
        &self,
        text: &str,
        prefix: &str,
        message: &str,
    ) -> Result<(), ScenarioError> {
        self.check(
            AssertionKind::StartsWith,
            text.starts_with(prefix),
            Some(format!("starts with {:?}", prefix)),
            Some(format!("{:?}", text)),
            message,
        )
    }

    pub fn assert_gt<T: PartialOrd + Debug>(
        &self,
        actual: T,
        bound: T,
        message: &str,
    ) -> Result<(), ScenarioError> {
        self.ordered(AssertionKind::Greater, actual > bound, "> ", &actual, &bound, message)
    }

    pub fn assert_ge<T: PartialOrd + Debug>(
        &self,
        actual: T,
        bound: T,
        message: &str,
    ) -> Result<(), ScenarioError> {
        self.ordered(
            AssertionKind::GreaterOrEqual,
            actual >= bound,
            ">= ",
            &actual,
            &bound,
            message,
        )
    }

    pub fn assert_lt<T: PartialOrd + Debug>(
        &self,
        actual: T,
        bound: T,
        message: &str,
    ) -> Result<(), ScenarioError> {
        self.ordered(AssertionKind::Less, actual < bound, "< ", &actual, &bound, message)
    }

    pub fn assert_le<T: PartialOrd + Debug>(
        &self,
        actual: T,
        bound: T,
        message: &str,
    ) -> Result<(), ScenarioError> {
        self.ordered(
            AssertionKind::LessOrEqual,
            actual <= bound,
            "<= ",
            &actual,
            &bound,
            message,
        )
    }

    fn ordered<T: Debug>(
        &self,
        kind: AssertionKind,
        passed: bool,
        op: &str,
        actual: &T,
        bound: &T,
        message: &str,
    ) -> Result<(), ScenarioError> {
        self.check(
            kind,
            passed,
            Some(format!("{}{:?}", op, bound)),
            Some(format!("{:?}", actual)),
            message,
        )
    }
}

/// `yyyyMMdd_HHmmss` in local time, as used in artifact file names.
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}
