use std::time::Duration;

use crate::browser::locator::Locator;
use crate::error::BrowserError;
use crate::pages::base::BasePage;

const FORM_TITLE: &str = ".contact-form h2.title.text-center";
const NAME: &str = "input[data-qa='name']";
const EMAIL: &str = "input[data-qa='email']";
const SUBJECT: &str = "input[data-qa='subject']";
const MESSAGE: &str = "textarea[data-qa='message']";
const SUBMIT: &str = "input[data-qa='submit-button']";
const SUCCESS: &str = ".status.alert.alert-success";
const FILE_UPLOAD: &str = "input[type='file']";

/// `/contact_us`.
///
/// Submitting raises a `confirm()` dialog; the driver's dialog policy
/// decides whether it is accepted.
#[derive(Clone, Copy)]
pub struct ContactUsPage<'a> {
    base: BasePage<'a>,
}

impl<'a> ContactUsPage<'a> {
    pub fn new(base: BasePage<'a>) -> Self {
        Self { base }
    }

    /// "GET IN TOUCH".
    pub fn form_title(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(FORM_TITLE).first())
    }

    pub fn fill_form(
        &self,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(NAME), name)?;
        self.base.fill(&Locator::new(EMAIL), email)?;
        self.base.fill(&Locator::new(SUBJECT), subject)?;
        self.base.fill(&Locator::new(MESSAGE), message)
    }

    pub fn submit(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(SUBMIT))?;
        self.base.settle(1000);
        Ok(())
    }

    pub fn is_success_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(SUCCESS))
    }

    pub fn success_message(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(SUCCESS).first())
    }

    pub fn email_validation_message(&self) -> Result<String, BrowserError> {
        self.base.validation_message(&Locator::new(EMAIL))
    }

    pub fn has_file_upload(&self, timeout: Duration) -> bool {
        self.base.is_visible(&Locator::new(FILE_UPLOAD), timeout)
    }

    /// `accept` attribute of the upload input, if it restricts file types.
    pub fn file_upload_accept(&self) -> Result<Option<String>, BrowserError> {
        let accept = self
            .base
            .driver()
            .attribute(&Locator::new(FILE_UPLOAD).first(), "accept")?;
        Ok(accept.filter(|a| !a.trim().is_empty()))
    }
}
