use std::collections::BTreeMap;
use std::time::Duration;

use crate::browser::locator::Locator;
use crate::error::BrowserError;
use crate::pages::base::BasePage;

const NAME: &str = ".product-information h2";
const CATEGORY: &str = ".product-information p:has-text('Category:')";
const PRICE: &str = ".product-information span span";
const AVAILABILITY: &str = ".product-information p:has-text('Availability:')";
const CONDITION: &str = ".product-information p:has-text('Condition:')";
const BRAND: &str = ".product-information p:has-text('Brand:')";

const MAIN_IMAGE: &str = ".view-product img";
const THUMBNAILS: &str = ".product-image-wrapper img";

const QUANTITY: &str = "input#quantity";
const ADD_TO_CART: &str = "button.btn.btn-default.cart";
const CONTINUE_SHOPPING: &str = "button.btn.btn-success";
const VIEW_CART: &str = "text=View Cart";

const WRITE_REVIEW: &str = "a[href='#reviews']";
const REVIEW_NAME: &str = "input#name";
const REVIEW_EMAIL: &str = "input#email";
const REVIEW_TEXT: &str = "textarea#review";
const REVIEW_SUBMIT: &str = "button#button-review";
const REVIEW_SUCCESS: &str = ".alert-success.alert";

/// Name → value map with keys "Name", "Category", "Price", "Availability",
/// "Condition" and "Brand".
pub type ProductDetails = BTreeMap<String, String>;

/// `/product_details/{id}`.
#[derive(Clone, Copy)]
pub struct ProductDetailsPage<'a> {
    base: BasePage<'a>,
}

impl<'a> ProductDetailsPage<'a> {
    pub fn new(base: BasePage<'a>) -> Self {
        Self { base }
    }

    pub fn is_details_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(NAME))
    }

    /// Every info line is probed; all must be visible.
    pub fn are_all_details_visible(&self) -> bool {
        [NAME, CATEGORY, PRICE, AVAILABILITY, CONDITION, BRAND]
            .iter()
            .map(|sel| self.base.is_shown(&Locator::new(*sel)))
            .fold(true, |all, visible| all && visible)
    }

    pub fn name(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(NAME))
    }

    /// Full "Category: X > Y" line, trimmed.
    pub fn category(&self) -> Result<String, BrowserError> {
        self.base.trimmed_text(&Locator::new(CATEGORY))
    }

    pub fn price(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(PRICE))
    }

    pub fn availability(&self) -> Result<String, BrowserError> {
        self.labelled(AVAILABILITY, "Availability:")
    }

    pub fn condition(&self) -> Result<String, BrowserError> {
        self.labelled(CONDITION, "Condition:")
    }

    pub fn brand(&self) -> Result<String, BrowserError> {
        self.labelled(BRAND, "Brand:")
    }

    fn labelled(&self, selector: &str, label: &str) -> Result<String, BrowserError> {
        let text = self.base.text(&Locator::new(selector))?;
        Ok(text.replace(label, "").trim().to_string())
    }

    pub fn all_details(&self) -> Result<ProductDetails, BrowserError> {
        let mut details = ProductDetails::new();
        details.insert("Name".into(), self.name()?);
        details.insert("Category".into(), self.category()?);
        details.insert("Price".into(), self.price()?);
        details.insert("Availability".into(), self.availability()?);
        details.insert("Condition".into(), self.condition()?);
        details.insert("Brand".into(), self.brand()?);
        Ok(details)
    }

    // --- quantity and cart ---

    pub fn quantity(&self) -> Result<String, BrowserError> {
        self.base.driver().input_value(&Locator::new(QUANTITY))
    }

    pub fn set_quantity(&self, quantity: &str) -> Result<(), BrowserError> {
        let input = Locator::new(QUANTITY);
        self.base.driver().clear(&input)?;
        self.base.fill(&input, quantity)
    }

    /// Read the current quantity, add `amount`, write it back.
    pub fn increase_quantity(&self, amount: i64) -> Result<(), BrowserError> {
        let current = self.quantity()?;
        let parsed: i64 = current
            .trim()
            .parse()
            .map_err(|_| BrowserError::UnexpectedText {
                context: "product quantity".into(),
                text: current.clone(),
            })?;
        self.set_quantity(&(parsed + amount).to_string())
    }

    pub fn add_to_cart(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(ADD_TO_CART))?;
        self.base.settle(1000);
        Ok(())
    }

    pub fn add_with_quantity(&self, quantity: &str) -> Result<(), BrowserError> {
        self.set_quantity(quantity)?;
        self.add_to_cart()
    }

    pub fn continue_shopping(&self) -> Result<(), BrowserError> {
        let button = Locator::new(CONTINUE_SHOPPING);
        if self.base.is_visible(&button, Duration::from_millis(3000)) {
            self.base.click(&button)?;
        }
        Ok(())
    }

    pub fn view_cart(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(VIEW_CART))?;
        self.base.settle(1000);
        Ok(())
    }

    // --- reviews ---

    pub fn write_review(&self, name: &str, email: &str, review: &str) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(WRITE_REVIEW))?;
        self.base.settle(500);
        self.base.fill(&Locator::new(REVIEW_NAME), name)?;
        self.base.fill(&Locator::new(REVIEW_EMAIL), email)?;
        self.base.fill(&Locator::new(REVIEW_TEXT), review)?;
        self.base.click(&Locator::new(REVIEW_SUBMIT))?;
        self.base.settle(1000);
        Ok(())
    }

    pub fn is_review_success_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(REVIEW_SUCCESS))
    }

    pub fn review_success_message(&self) -> Result<String, BrowserError> {
        if !self.is_review_success_visible() {
            return Ok(String::new());
        }
        self.base.text(&Locator::new(REVIEW_SUCCESS).first())
    }

    // --- images ---

    pub fn is_image_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(MAIN_IMAGE))
    }

    pub fn images_count(&self) -> Result<usize, BrowserError> {
        self.base.count(&Locator::new(THUMBNAILS))
    }

    /// Main image within 5 s, otherwise any `<img>` on the page.
    pub fn has_product_images(&self) -> bool {
        if self
            .base
            .is_visible(&Locator::new(MAIN_IMAGE), Duration::from_millis(5000))
        {
            return true;
        }
        self.base
            .count(&Locator::new("img"))
            .map(|n| n > 0)
            .unwrap_or(false)
    }
}
