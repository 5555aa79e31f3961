use std::time::Duration;

use crate::browser::driver::SelectBy;
use crate::browser::locator::Locator;
use crate::error::BrowserError;
use crate::pages::base::BasePage;

// Account information
const TITLE_MR: &str = "input#id_gender1";
const TITLE_MRS: &str = "input#id_gender2";
const PASSWORD: &str = "input[data-qa='password']";
const DAY: &str = "select[data-qa='days']";
const MONTH: &str = "select[data-qa='months']";
const YEAR: &str = "select[data-qa='years']";
const NEWSLETTER: &str = "input#newsletter";
const OFFERS: &str = "input#optin";
const ACCOUNT_INFO_HEADER: &str = "text=Enter Account Information";

// Address information
const FIRST_NAME: &str = "input[data-qa='first_name']";
const LAST_NAME: &str = "input[data-qa='last_name']";
const COMPANY: &str = "input[data-qa='company']";
const ADDRESS: &str = "input[data-qa='address']";
const ADDRESS2: &str = "input[data-qa='address2']";
const COUNTRY: &str = "select[data-qa='country']";
const STATE: &str = "input[data-qa='state']";
const CITY: &str = "input[data-qa='city']";
const ZIPCODE: &str = "input[data-qa='zipcode']";
const MOBILE: &str = "input[data-qa='mobile_number']";

const CREATE_ACCOUNT: &str = "button[data-qa='create-account']";
const ACCOUNT_CREATED: &str = "h2[data-qa='account-created']";
const CONTINUE: &str = "a[data-qa='continue-button']";

const ACCOUNT_CREATED_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Every field of the "Enter Account Information" form.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationDetails {
    pub title: String,
    pub password: String,
    pub day: String,
    pub month: String,
    pub year: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address: String,
    pub address2: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zipcode: String,
    pub mobile: String,
    pub newsletter: bool,
    pub offers: bool,
}

impl RegistrationDetails {
    /// Defaults for tests that do not care about individual fields.
    pub fn quick(password: &str, first_name: &str, last_name: &str, mobile: &str) -> Self {
        Self {
            title: "Mr".into(),
            password: password.into(),
            day: "15".into(),
            month: "5".into(),
            year: "1990".into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            company: "Test Company".into(),
            address: "123 Test Street".into(),
            address2: "Apt 456".into(),
            country: "India".into(),
            state: "Test State".into(),
            city: "Test City".into(),
            zipcode: "12345".into(),
            mobile: mobile.into(),
            newsletter: true,
            offers: true,
        }
    }
}

/// `/signup`: account and address details after the first signup step.
#[derive(Clone, Copy)]
pub struct SignupPage<'a> {
    base: BasePage<'a>,
}

impl<'a> SignupPage<'a> {
    pub fn new(base: BasePage<'a>) -> Self {
        Self { base }
    }

    /// "mr"/"male" → Mr, "mrs"/"female" → Mrs, anything else is ignored.
    pub fn select_title(&self, title: &str) -> Result<(), BrowserError> {
        let driver = self.base.driver();
        match title.to_lowercase().as_str() {
            "mr" | "male" => driver.set_checked(&Locator::new(TITLE_MR), true),
            "mrs" | "female" => driver.set_checked(&Locator::new(TITLE_MRS), true),
            _ => Ok(()),
        }
    }

    pub fn enter_password(&self, password: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(PASSWORD), password)
    }

    /// Day, month (numeric value) and year dropdowns, all by option value.
    pub fn select_date_of_birth(
        &self,
        day: &str,
        month: &str,
        year: &str,
    ) -> Result<(), BrowserError> {
        let driver = self.base.driver();
        driver.select_option(&Locator::new(DAY), &SelectBy::Value(day.into()))?;
        driver.select_option(&Locator::new(MONTH), &SelectBy::Value(month.into()))?;
        driver.select_option(&Locator::new(YEAR), &SelectBy::Value(year.into()))
    }

    pub fn set_newsletter(&self, checked: bool) -> Result<(), BrowserError> {
        self.base
            .driver()
            .set_checked(&Locator::new(NEWSLETTER), checked)
    }

    pub fn set_special_offers(&self, checked: bool) -> Result<(), BrowserError> {
        self.base.driver().set_checked(&Locator::new(OFFERS), checked)
    }

    pub fn enter_first_name(&self, value: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(FIRST_NAME), value)
    }

    pub fn enter_last_name(&self, value: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(LAST_NAME), value)
    }

    pub fn enter_company(&self, value: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(COMPANY), value)
    }

    pub fn enter_address(&self, value: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(ADDRESS), value)
    }

    pub fn enter_address2(&self, value: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(ADDRESS2), value)
    }

    /// Country by its visible label, e.g. "India".
    pub fn select_country(&self, country: &str) -> Result<(), BrowserError> {
        self.base
            .driver()
            .select_option(&Locator::new(COUNTRY), &SelectBy::Label(country.into()))
    }

    pub fn enter_state(&self, value: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(STATE), value)
    }

    pub fn enter_city(&self, value: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(CITY), value)
    }

    pub fn enter_zipcode(&self, value: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(ZIPCODE), value)
    }

    pub fn enter_mobile(&self, value: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(MOBILE), value)
    }

    /// Title, password, date of birth and the opt-in checkboxes.
    /// Checkboxes are only ever checked here, never unchecked.
    pub fn fill_account_information(
        &self,
        details: &RegistrationDetails,
    ) -> Result<(), BrowserError> {
        self.select_title(&details.title)?;
        self.enter_password(&details.password)?;
        self.select_date_of_birth(&details.day, &details.month, &details.year)?;
        if details.newsletter {
            self.set_newsletter(true)?;
        }
        if details.offers {
            self.set_special_offers(true)?;
        }
        Ok(())
    }

    pub fn fill_address_information(
        &self,
        details: &RegistrationDetails,
    ) -> Result<(), BrowserError> {
        self.enter_first_name(&details.first_name)?;
        self.enter_last_name(&details.last_name)?;
        self.enter_company(&details.company)?;
        self.enter_address(&details.address)?;
        self.enter_address2(&details.address2)?;
        self.select_country(&details.country)?;
        self.enter_state(&details.state)?;
        self.enter_city(&details.city)?;
        self.enter_zipcode(&details.zipcode)?;
        self.enter_mobile(&details.mobile)
    }

    pub fn complete_registration(&self, details: &RegistrationDetails) -> Result<(), BrowserError> {
        self.fill_account_information(details)?;
        self.fill_address_information(details)?;
        self.click_create_account()
    }

    pub fn quick_registration(
        &self,
        password: &str,
        first_name: &str,
        last_name: &str,
        mobile: &str,
    ) -> Result<(), BrowserError> {
        self.complete_registration(&RegistrationDetails::quick(
            password, first_name, last_name, mobile,
        ))
    }

    pub fn click_create_account(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(CREATE_ACCOUNT))?;
        self.base.settle(2000);
        Ok(())
    }

    pub fn click_continue(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(CONTINUE))
    }

    pub fn is_account_info_header_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(ACCOUNT_INFO_HEADER))
    }

    pub fn is_account_created_visible(&self) -> bool {
        self.base
            .is_visible(&Locator::new(ACCOUNT_CREATED), ACCOUNT_CREATED_TIMEOUT)
    }

    pub fn account_created_message(&self) -> Result<String, BrowserError> {
        if !self.is_account_created_visible() {
            return Ok(String::new());
        }
        self.base.text(&Locator::new(ACCOUNT_CREATED))
    }

    pub fn is_create_account_enabled(&self) -> Result<bool, BrowserError> {
        self.base.driver().is_enabled(&Locator::new(CREATE_ACCOUNT))
    }

    pub fn is_newsletter_checked(&self) -> Result<bool, BrowserError> {
        self.base.driver().is_checked(&Locator::new(NEWSLETTER))
    }

    pub fn is_special_offers_checked(&self) -> Result<bool, BrowserError> {
        self.base.driver().is_checked(&Locator::new(OFFERS))
    }

    /// Value of the selected country option.
    pub fn selected_country(&self) -> Result<String, BrowserError> {
        self.base.driver().input_value(&Locator::new(COUNTRY))
    }

    pub fn available_countries(&self) -> Result<Vec<String>, BrowserError> {
        self.base
            .driver()
            .all_text_contents(&Locator::new(COUNTRY).locator("option"))
    }

    /// `type` attribute of the password input; "password" when masked.
    pub fn password_type(&self) -> Result<Option<String>, BrowserError> {
        self.base
            .driver()
            .attribute(&Locator::new(PASSWORD), "type")
    }

    pub fn password_value(&self) -> Result<String, BrowserError> {
        self.base.driver().input_value(&Locator::new(PASSWORD))
    }
}
