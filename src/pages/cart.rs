use std::collections::BTreeMap;
use std::time::Duration;

use crate::browser::locator::Locator;
use crate::error::BrowserError;
use crate::pages::base::BasePage;
use crate::support::price::line_total_matches;

const CART_TABLE: &str = "#cart_info_table";
const BREADCRUMB: &str = ".breadcrumb";
const EMPTY_CART: &str = "text=Cart is empty!";

const ROWS: &str = "tbody tr";
const IMAGE: &str = ".cart_product img";
const NAME: &str = ".cart_description h4 a";
const PRICE: &str = ".cart_price p";
const QUANTITY: &str = ".cart_quantity button";
const TOTAL: &str = ".cart_total_price";
const DELETE: &str = ".cart_quantity_delete";

const PROCEED_TO_CHECKOUT: &str = "text=Proceed To Checkout";
const REGISTER_LOGIN: &str = "text=Register / Login";

const RECOMMENDED: &str = "#recommended-item-carousel";
const RECOMMENDED_ADD: &str = ".recommendeditem_add_to_cart";

const SHORT_PROBE: Duration = Duration::from_millis(3000);

/// Name → value map with keys "Name", "Price", "Quantity" and "Total".
pub type CartLineDetails = BTreeMap<String, String>;

/// `/view_cart`.
///
/// Cart lines are addressed by their current row index. Indices shift after
/// every delete, so callers re-query rather than hold on to them.
#[derive(Clone, Copy)]
pub struct CartPage<'a> {
    base: BasePage<'a>,
}

impl<'a> CartPage<'a> {
    pub fn new(base: BasePage<'a>) -> Self {
        Self { base }
    }

    pub fn open(&self) -> Result<(), BrowserError> {
        self.base.open("/view_cart")
    }

    pub fn is_loaded(&self) -> bool {
        self.base.is_shown(&Locator::new(CART_TABLE))
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_visible(&Locator::new(EMPTY_CART), SHORT_PROBE)
    }

    pub fn breadcrumb_text(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(BREADCRUMB))
    }

    /// Number of lines; 0 whenever the empty-cart message is shown.
    pub fn line_count(&self) -> Result<usize, BrowserError> {
        if self.is_empty() {
            return Ok(0);
        }
        self.base.count(&Locator::new(ROWS))
    }

    pub fn has_products(&self) -> Result<bool, BrowserError> {
        Ok(self.line_count()? > 0)
    }

    // --- per-line read-back ---

    pub fn name_at(&self, index: usize) -> Result<String, BrowserError> {
        self.base.trimmed_text(&Locator::new(NAME).nth(index))
    }

    pub fn price_at(&self, index: usize) -> Result<String, BrowserError> {
        self.base.trimmed_text(&Locator::new(PRICE).nth(index))
    }

    pub fn quantity_at(&self, index: usize) -> Result<String, BrowserError> {
        self.base.trimmed_text(&Locator::new(QUANTITY).nth(index))
    }

    pub fn total_at(&self, index: usize) -> Result<String, BrowserError> {
        self.base.trimmed_text(&Locator::new(TOTAL).nth(index))
    }

    pub fn all_names(&self) -> Result<Vec<String>, BrowserError> {
        let names = self.base.driver().all_text_contents(&Locator::new(NAME))?;
        Ok(names.into_iter().map(|n| n.trim().to_string()).collect())
    }

    /// Index of the first line whose name contains `name`, ignoring case.
    pub fn index_of(&self, name: &str) -> Result<Option<usize>, BrowserError> {
        let needle = name.to_lowercase();
        Ok(self
            .all_names()?
            .iter()
            .position(|n| n.to_lowercase().contains(&needle)))
    }

    pub fn is_product_in_cart(&self, name: &str) -> Result<bool, BrowserError> {
        Ok(self.index_of(name)?.is_some())
    }

    // --- mutation ---

    pub fn delete_at(&self, index: usize) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(DELETE).nth(index))?;
        self.base.settle(1000);
        Ok(())
    }

    /// Delete the first line matching `name`. No match is a no-op.
    pub fn delete_by_name(&self, name: &str) -> Result<(), BrowserError> {
        match self.index_of(name)? {
            Some(index) => self.delete_at(index),
            None => Ok(()),
        }
    }

    /// Delete every line: the count is taken once, then index 0 is removed
    /// that many times.
    pub fn clear_cart(&self) -> Result<(), BrowserError> {
        let count = self.line_count()?;
        tracing::debug!(count, "clearing cart");
        for _ in 0..count {
            self.delete_at(0)?;
            self.base.settle(500);
        }
        Ok(())
    }

    // --- totals ---

    pub fn verify_product_total_price(&self, index: usize) -> Result<bool, BrowserError> {
        let price = self.price_at(index)?;
        let quantity = self.quantity_at(index)?;
        let total = self.total_at(index)?;
        line_total_matches(&price, &quantity, &total)
    }

    pub fn verify_all_product_total_prices(&self) -> Result<bool, BrowserError> {
        let count = self.line_count()?;
        for index in 0..count {
            if !self.verify_product_total_price(index)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // --- checkout ---

    pub fn proceed_to_checkout(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(PROCEED_TO_CHECKOUT))?;
        self.base.settle(1000);
        Ok(())
    }

    pub fn is_proceed_to_checkout_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(PROCEED_TO_CHECKOUT))
    }

    /// Shown in the checkout modal when nobody is logged in.
    pub fn is_register_login_visible(&self) -> bool {
        self.base.is_visible(&Locator::new(REGISTER_LOGIN), SHORT_PROBE)
    }

    pub fn click_register_login(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(REGISTER_LOGIN).first())
    }

    // --- recommended items ---

    pub fn are_recommended_items_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(RECOMMENDED))
    }

    pub fn add_recommended_item(&self, index: usize) -> Result<(), BrowserError> {
        let item = Locator::new(RECOMMENDED_ADD).nth(index);
        self.base.scroll_into_view(&item)?;
        self.base.click(&item)?;
        self.base.settle(1000);
        Ok(())
    }

    // --- details ---

    pub fn line_details(&self, index: usize) -> Result<CartLineDetails, BrowserError> {
        let mut details = CartLineDetails::new();
        details.insert("Name".into(), self.name_at(index)?);
        details.insert("Price".into(), self.price_at(index)?);
        details.insert("Quantity".into(), self.quantity_at(index)?);
        details.insert("Total".into(), self.total_at(index)?);
        Ok(details)
    }

    pub fn all_line_details(&self) -> Result<Vec<CartLineDetails>, BrowserError> {
        let count = self.line_count()?;
        (0..count).map(|i| self.line_details(i)).collect()
    }

    pub fn scroll_to_line(&self, index: usize) -> Result<(), BrowserError> {
        self.base.scroll_into_view(&Locator::new(ROWS).nth(index))?;
        self.base.settle(300);
        Ok(())
    }

    pub fn is_image_visible(&self, index: usize) -> bool {
        self.base
            .driver()
            .is_visible(&Locator::new(IMAGE).nth(index))
            .unwrap_or(false)
    }

    pub fn image_url(&self, index: usize) -> Result<String, BrowserError> {
        Ok(self
            .base
            .driver()
            .attribute(&Locator::new(IMAGE).nth(index), "src")?
            .unwrap_or_default())
    }
}
