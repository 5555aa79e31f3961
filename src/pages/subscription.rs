use std::time::Duration;

use crate::browser::locator::Locator;
use crate::error::BrowserError;
use crate::pages::base::BasePage;

const HEADER: &str = "h2:has-text('Subscription')";
const EMAIL: &str = "input#susbscribe_email";
const SUBSCRIBE: &str = "button#subscribe";
const SUCCESS: &str = "#success-subscribe .alert-success";
const FOOTER: &str = "footer";

/// Newsletter box in the footer of every page.
#[derive(Clone, Copy)]
pub struct SubscriptionSection<'a> {
    base: BasePage<'a>,
}

impl<'a> SubscriptionSection<'a> {
    pub fn new(base: BasePage<'a>) -> Self {
        Self { base }
    }

    pub fn is_header_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(HEADER).first())
    }

    pub fn is_email_input_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(EMAIL))
    }

    pub fn subscribe(&self, email: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(EMAIL), email)?;
        self.base.click(&Locator::new(SUBSCRIBE))?;
        self.base.settle(1000);
        Ok(())
    }

    pub fn is_success_visible(&self, timeout: Duration) -> bool {
        self.base.is_visible(&Locator::new(SUCCESS), timeout)
    }

    pub fn success_message(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(SUCCESS))
    }

    pub fn email_validation_message(&self) -> Result<String, BrowserError> {
        self.base.validation_message(&Locator::new(EMAIL))
    }

    pub fn is_footer_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(FOOTER))
    }

    pub fn footer_text(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(FOOTER))
    }
}
