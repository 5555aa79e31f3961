use std::time::Duration;

use crate::browser::locator::Locator;
use crate::error::BrowserError;
use crate::pages::base::BasePage;

const LOGIN_EMAIL: &str = "input[data-qa='login-email']";
const LOGIN_PASSWORD: &str = "input[data-qa='login-password']";
const LOGIN_BUTTON: &str = "button[data-qa='login-button']";
const LOGIN_HEADER: &str = "text=Login to your account";

const SIGNUP_NAME: &str = "input[data-qa='signup-name']";
const SIGNUP_EMAIL: &str = "input[data-qa='signup-email']";
const SIGNUP_BUTTON: &str = "button[data-qa='signup-button']";
const SIGNUP_HEADER: &str = "text=New User Signup!";

const LOGIN_ERROR: &str = "p[style*='color: red']";
const EMAIL_EXISTS_ERROR: &str = "text=Email Address already exist!";
const LOGGED_IN_AS: &str = "text=Logged in as";
const ACCOUNT_DELETED: &str = "h2[data-qa='account-deleted']";
const LOGIN_OUTCOME: &str = "a:has-text('Logout'), p:has-text('incorrect')";

/// `/login`: the login form and the first step of signup.
#[derive(Clone, Copy)]
pub struct LoginPage<'a> {
    base: BasePage<'a>,
}

impl<'a> LoginPage<'a> {
    pub fn new(base: BasePage<'a>) -> Self {
        Self { base }
    }

    pub fn open(&self) -> Result<(), BrowserError> {
        self.base.open("/login")
    }

    // --- login ---

    pub fn enter_login_email(&self, email: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(LOGIN_EMAIL), email)
    }

    pub fn enter_login_password(&self, password: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(LOGIN_PASSWORD), password)
    }

    pub fn click_login(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(LOGIN_BUTTON))
    }

    pub fn perform_login(&self, email: &str, password: &str) -> Result<(), BrowserError> {
        self.enter_login_email(email)?;
        self.enter_login_password(password)?;
        self.click_login()?;
        self.base.settle(1000);
        Ok(())
    }

    // --- signup ---

    pub fn enter_signup_name(&self, name: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(SIGNUP_NAME), name)
    }

    pub fn enter_signup_email(&self, email: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(SIGNUP_EMAIL), email)
    }

    pub fn click_signup(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(SIGNUP_BUTTON))
    }

    /// First step of registration: name, email, submit.
    pub fn perform_signup(&self, name: &str, email: &str) -> Result<(), BrowserError> {
        self.enter_signup_name(name)?;
        self.enter_signup_email(email)?;
        self.click_signup()?;
        self.base.settle(1000);
        Ok(())
    }

    // --- queries ---

    pub fn is_login_form_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(LOGIN_EMAIL))
    }

    pub fn is_signup_form_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(SIGNUP_NAME))
    }

    pub fn is_login_header_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(LOGIN_HEADER))
    }

    pub fn is_signup_header_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(SIGNUP_HEADER))
    }

    pub fn is_login_successful(&self) -> bool {
        self.base.is_shown(&Locator::new(LOGGED_IN_AS))
    }

    pub fn is_login_error_displayed(&self) -> bool {
        self.base.is_shown(&Locator::new(LOGIN_ERROR))
    }

    pub fn login_error_message(&self) -> Result<String, BrowserError> {
        if !self.is_login_error_displayed() {
            return Ok(String::new());
        }
        self.base.trimmed_text(&Locator::new(LOGIN_ERROR).first())
    }

    /// Wait for either a logged-in header or the credentials error.
    pub fn wait_for_login_outcome(&self, timeout: Duration) -> bool {
        self.base.is_visible(&Locator::new(LOGIN_OUTCOME), timeout)
    }

    pub fn is_email_exists_error_displayed(&self) -> bool {
        self.base.is_shown(&Locator::new(EMAIL_EXISTS_ERROR))
    }

    pub fn is_account_deleted_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(ACCOUNT_DELETED))
    }

    pub fn account_deleted_message(&self) -> Result<String, BrowserError> {
        if !self.is_account_deleted_visible() {
            return Ok(String::new());
        }
        self.base.text(&Locator::new(ACCOUNT_DELETED))
    }

    // --- form utilities ---

    pub fn clear_login_email(&self) -> Result<(), BrowserError> {
        self.base.driver().clear(&Locator::new(LOGIN_EMAIL))
    }

    pub fn clear_login_password(&self) -> Result<(), BrowserError> {
        self.base.driver().clear(&Locator::new(LOGIN_PASSWORD))
    }

    pub fn is_login_button_enabled(&self) -> Result<bool, BrowserError> {
        self.base.driver().is_enabled(&Locator::new(LOGIN_BUTTON))
    }

    pub fn is_signup_button_enabled(&self) -> Result<bool, BrowserError> {
        self.base.driver().is_enabled(&Locator::new(SIGNUP_BUTTON))
    }

    /// `type` attribute of the login password field.
    pub fn login_password_type(&self) -> Result<Option<String>, BrowserError> {
        self.base
            .driver()
            .attribute(&Locator::new(LOGIN_PASSWORD), "type")
    }
}
