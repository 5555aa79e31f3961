use crate::browser::locator::Locator;
use crate::error::BrowserError;
use crate::pages::base::BasePage;

const SIGNUP_LOGIN_LINK: &str = "a[href='/login']";
const PRODUCTS_LINK: &str = "a[href='/products']";
const CART_LINK: &str = "a[href='/view_cart']";
const CONTACT_US_LINK: &str = "a[href='/contact_us']";
const TEST_CASES_LINK: &str = "a[href='/test_cases']";
const LOGGED_IN_AS: &str = "text=Logged in as";
const LOGOUT_LINK: &str = "a[href='/logout']";
const DELETE_ACCOUNT_LINK: &str = "a[href='/delete_account']";
const HOME_LINK: &str = "a[href='/']";
const SECTION_HEADER: &str = "h2.title.text-center";
const SITE_HEADER: &str = "header";

/// Landing page and the site header shared by every page.
#[derive(Clone, Copy)]
pub struct HomePage<'a> {
    base: BasePage<'a>,
}

impl<'a> HomePage<'a> {
    pub fn new(base: BasePage<'a>) -> Self {
        Self { base }
    }

    /// Load the site root and dismiss the consent banner.
    pub fn navigate_to_home(&self) -> Result<(), BrowserError> {
        self.base.open("")?;
        self.base.dismiss_cookie_banner();
        Ok(())
    }

    pub fn click_signup_login(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(SIGNUP_LOGIN_LINK))
    }

    pub fn click_products(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(PRODUCTS_LINK))
    }

    pub fn click_cart(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(CART_LINK).first())
    }

    pub fn click_contact_us(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(CONTACT_US_LINK))
    }

    pub fn click_test_cases(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(TEST_CASES_LINK).first())
    }

    pub fn click_logout(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(LOGOUT_LINK))
    }

    pub fn click_delete_account(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(DELETE_ACCOUNT_LINK))
    }

    pub fn click_home(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(HOME_LINK).first())
    }

    pub fn is_home_page_loaded(&self) -> bool {
        self.base.is_shown(&Locator::new(SIGNUP_LOGIN_LINK))
    }

    pub fn is_user_logged_in(&self) -> bool {
        self.base.is_shown(&Locator::new(LOGGED_IN_AS))
    }

    /// "Logged in as X" → "X"; empty when nobody is logged in.
    pub fn logged_in_username(&self) -> Result<String, BrowserError> {
        if !self.is_user_logged_in() {
            return Ok(String::new());
        }
        let full = self.base.text(&Locator::new(LOGGED_IN_AS))?;
        Ok(full.replace("Logged in as ", "").trim().to_string())
    }

    pub fn is_logout_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(LOGOUT_LINK))
    }

    pub fn is_delete_account_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(DELETE_ACCOUNT_LINK))
    }

    pub fn is_site_header_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(SITE_HEADER).first())
    }

    pub fn scroll_to_footer(&self) -> Result<(), BrowserError> {
        self.base.scroll_to_bottom()?;
        self.base.settle(500);
        Ok(())
    }

    pub fn scroll_to_top(&self) -> Result<(), BrowserError> {
        self.base.scroll_to_top()?;
        self.base.settle(500);
        Ok(())
    }

    /// Text of the first section header on the page.
    pub fn header_text(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(SECTION_HEADER).first())
    }

    pub fn title(&self) -> Result<String, BrowserError> {
        self.base.title()
    }
}
