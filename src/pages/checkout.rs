use std::time::Duration;

use crate::browser::locator::Locator;
use crate::error::BrowserError;
use crate::pages::base::BasePage;

const ADDRESS_DETAILS: &str = ".checkout-information";
const DELIVERY_ADDRESS: &str = "#address_delivery";
const BILLING_ADDRESS: &str = "#address_invoice";
const ORDER_REVIEW: &str = "#cart_items";
const ORDER_ITEMS: &str = "#cart_info .cart_description";
const ORDER_TOTAL: &str = ".cart_total_price";
const COMMENT: &str = "textarea[name='message']";
const PLACE_ORDER: &str = "a:has-text('Place Order')";

const NAME_ON_CARD: &str = "input[data-qa='name-on-card']";
const CARD_NUMBER: &str = "input[data-qa='card-number']";
const CVC: &str = "input[data-qa='cvc']";
const EXPIRY_MONTH: &str = "input[data-qa='expiry-month']";
const EXPIRY_YEAR: &str = "input[data-qa='expiry-year']";
const PAY_BUTTON: &str = "button[data-qa='pay-button']";

const ORDER_SUCCESS: &str = "p:has-text('Congratulations')";
const DOWNLOAD_INVOICE: &str = "a:has-text('Download Invoice')";
const CONTINUE: &str = "a[data-qa='continue-button']";

const ORDER_CONFIRM_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Card details for the payment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCard {
    pub name_on_card: String,
    pub number: String,
    pub cvc: String,
    pub expiry_month: String,
    pub expiry_year: String,
}

impl PaymentCard {
    /// MasterCard test number accepted by the demo store.
    pub fn test_card() -> Self {
        Self {
            name_on_card: "Test User".into(),
            number: "5555555555554444".into(),
            cvc: "123".into(),
            expiry_month: "12".into(),
            expiry_year: "2030".into(),
        }
    }

    /// Malformed number, impossible month and a past year.
    pub fn invalid_card() -> Self {
        Self {
            name_on_card: "Test User".into(),
            number: "1234567890123456".into(),
            cvc: "999".into(),
            expiry_month: "13".into(),
            expiry_year: "2020".into(),
        }
    }
}

/// `/checkout` and `/payment`, through to the order confirmation.
#[derive(Clone, Copy)]
pub struct CheckoutPage<'a> {
    base: BasePage<'a>,
}

impl<'a> CheckoutPage<'a> {
    pub fn new(base: BasePage<'a>) -> Self {
        Self { base }
    }

    // --- review ---

    pub fn address_details(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(ADDRESS_DETAILS))
    }

    pub fn delivery_address(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(DELIVERY_ADDRESS))
    }

    pub fn billing_address(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(BILLING_ADDRESS))
    }

    pub fn is_order_review_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(ORDER_REVIEW))
    }

    pub fn order_items(&self) -> Result<Vec<String>, BrowserError> {
        self.base
            .driver()
            .all_text_contents(&Locator::new(ORDER_ITEMS))
    }

    pub fn is_total_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(ORDER_TOTAL).first())
    }

    pub fn is_comment_box_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(COMMENT))
    }

    pub fn enter_comment(&self, comment: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(COMMENT), comment)
    }

    pub fn comment(&self) -> Result<String, BrowserError> {
        self.base.driver().input_value(&Locator::new(COMMENT))
    }

    /// Click "Place Order" and wait for the payment form.
    pub fn place_order(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(PLACE_ORDER))?;
        self.base.settle(1000);
        Ok(())
    }

    // --- payment ---

    pub fn is_payment_form_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(CARD_NUMBER))
    }

    pub fn fill_payment(&self, card: &PaymentCard) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(NAME_ON_CARD), &card.name_on_card)?;
        self.base.fill(&Locator::new(CARD_NUMBER), &card.number)?;
        self.base.fill(&Locator::new(CVC), &card.cvc)?;
        self.base.fill(&Locator::new(EXPIRY_MONTH), &card.expiry_month)?;
        self.base.fill(&Locator::new(EXPIRY_YEAR), &card.expiry_year)
    }

    pub fn pay_and_confirm(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(PAY_BUTTON))?;
        self.base.settle(2000);
        Ok(())
    }

    // --- confirmation ---

    pub fn is_order_success_visible(&self) -> bool {
        self.base
            .is_visible(&Locator::new(ORDER_SUCCESS), ORDER_CONFIRM_TIMEOUT)
    }

    pub fn order_success_message(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(ORDER_SUCCESS).first())
    }

    pub fn is_download_invoice_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(DOWNLOAD_INVOICE))
    }

    pub fn download_invoice(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(DOWNLOAD_INVOICE))?;
        self.base.settle(2000);
        Ok(())
    }

    pub fn is_continue_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(CONTINUE))
    }

    pub fn click_continue(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(CONTINUE))?;
        self.base.settle(1000);
        Ok(())
    }
}
