use std::time::Duration;

use crate::browser::locator::Locator;
use crate::error::BrowserError;
use crate::pages::base::BasePage;

const SECTION_HEADER: &str = "h2.title.text-center";
const PRODUCTS_LIST: &str = ".features_items";
const PRODUCT_CARD: &str = ".product-image-wrapper";
const PRODUCT_NAME: &str = ".productinfo p";
const PRODUCT_PRICE: &str = ".productinfo h2";

const SEARCH_INPUT: &str = "input#search_product";
const SEARCH_BUTTON: &str = "button#submit_search";

const VIEW_PRODUCT: &str = "a[href*='/product_details/']";
const ADD_TO_CART: &str = ".btn.btn-default.add-to-cart";
const CONTINUE_SHOPPING: &str = "button.btn.btn-success";
const VIEW_CART: &str = "text=View Cart";
const CART_MODAL: &str = ".modal-content";

const MODAL_TIMEOUT: Duration = Duration::from_millis(3000);

/// `/products`: the catalogue grid, search and the add-to-cart modal.
#[derive(Clone, Copy)]
pub struct ProductsPage<'a> {
    base: BasePage<'a>,
}

impl<'a> ProductsPage<'a> {
    pub fn new(base: BasePage<'a>) -> Self {
        Self { base }
    }

    pub fn open(&self) -> Result<(), BrowserError> {
        self.base.open("/products")
    }

    pub fn is_all_products_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(SECTION_HEADER))
    }

    /// Text of the first section header ("ALL PRODUCTS", "SEARCHED PRODUCTS", ...).
    pub fn header_title(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(SECTION_HEADER).first())
    }

    pub fn products_count(&self) -> Result<usize, BrowserError> {
        self.base.count(&Locator::new(PRODUCT_CARD))
    }

    // --- search ---

    pub fn search(&self, term: &str) -> Result<(), BrowserError> {
        self.submit_search(term)?;
        self.base.settle(1000);
        Ok(())
    }

    /// Fill and submit the search box without waiting afterwards.
    pub fn submit_search(&self, term: &str) -> Result<(), BrowserError> {
        self.base.fill(&Locator::new(SEARCH_INPUT), term)?;
        self.base.click(&Locator::new(SEARCH_BUTTON))
    }

    /// Block until at least one product card is visible.
    pub fn wait_for_products(&self, timeout: Duration) -> Result<(), BrowserError> {
        self.base.wait_until_visible(&Locator::new(PRODUCT_CARD).first(), timeout)
    }

    pub fn is_search_results_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(PRODUCTS_LIST))
    }

    pub fn searched_header_text(&self) -> Result<String, BrowserError> {
        self.header_title()
    }

    /// Trimmed names of every product card currently rendered.
    pub fn product_names(&self) -> Result<Vec<String>, BrowserError> {
        let names = self
            .base
            .driver()
            .all_text_contents(&Locator::new(PRODUCT_NAME))?;
        Ok(names.into_iter().map(|n| n.trim().to_string()).collect())
    }

    /// Case-insensitive substring match over the current product names.
    pub fn is_product_in_search_results(&self, name: &str) -> Result<bool, BrowserError> {
        let needle = name.to_lowercase();
        Ok(self
            .product_names()?
            .iter()
            .any(|n| n.to_lowercase().contains(&needle)))
    }

    pub fn clear_search_input(&self) -> Result<(), BrowserError> {
        self.base.driver().clear(&Locator::new(SEARCH_INPUT))
    }

    // --- product interaction ---

    pub fn view_product(&self, index: usize) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(VIEW_PRODUCT).nth(index))?;
        self.base.settle(1000);
        Ok(())
    }

    pub fn view_product_by_name(&self, name: &str) -> Result<(), BrowserError> {
        let card = Locator::new(PRODUCT_CARD).filter_text(name);
        self.base.click(&card.locator(VIEW_PRODUCT).first())?;
        self.base.settle(1000);
        Ok(())
    }

    /// Hover the card so its overlay shows, then click its add-to-cart button.
    pub fn add_to_cart(&self, index: usize) -> Result<(), BrowserError> {
        let card = Locator::new(PRODUCT_CARD).nth(index);
        self.base.driver().hover(&card)?;
        self.base.settle(500);
        self.base.click(&card.locator(ADD_TO_CART).first())?;
        self.base.settle(1000);
        Ok(())
    }

    pub fn add_to_cart_by_name(&self, name: &str) -> Result<(), BrowserError> {
        let card = Locator::new(PRODUCT_CARD).filter_text(name).first();
        self.base.driver().hover(&card)?;
        self.base.settle(500);
        self.base.click(&card.locator(ADD_TO_CART).first())?;
        self.base.settle(1000);
        Ok(())
    }

    /// Add the first `count` products, closing the modal after each.
    pub fn add_multiple_to_cart(&self, count: usize) -> Result<(), BrowserError> {
        for index in 0..count {
            self.add_to_cart(index)?;
            self.continue_shopping()?;
            self.base.settle(500);
        }
        Ok(())
    }

    // --- modal ---

    /// Close the modal if its button shows up within 3 s; otherwise do nothing.
    pub fn continue_shopping(&self) -> Result<(), BrowserError> {
        let button = Locator::new(CONTINUE_SHOPPING);
        if self.base.is_visible(&button, MODAL_TIMEOUT) {
            self.base.click(&button)?;
            self.base.settle(500);
        }
        Ok(())
    }

    pub fn view_cart(&self) -> Result<(), BrowserError> {
        self.base.click(&Locator::new(VIEW_CART))?;
        self.base.settle(1000);
        Ok(())
    }

    pub fn wait_for_cart_modal(&self, timeout: Duration) -> Result<(), BrowserError> {
        self.base.wait_until_visible(&Locator::new(CART_MODAL), timeout)
    }

    pub fn is_cart_modal_visible(&self) -> bool {
        self.base.is_visible(&Locator::new(CART_MODAL), MODAL_TIMEOUT)
    }

    // --- read-back ---

    pub fn price_at(&self, index: usize) -> Result<String, BrowserError> {
        self.base.trimmed_text(&Locator::new(PRODUCT_PRICE).nth(index))
    }

    pub fn name_at(&self, index: usize) -> Result<String, BrowserError> {
        self.base.trimmed_text(&Locator::new(PRODUCT_NAME).nth(index))
    }

    pub fn all_products_have_price(&self) -> Result<bool, BrowserError> {
        let products = self.products_count()?;
        let prices = self.base.count(&Locator::new(PRODUCT_PRICE))?;
        Ok(products == prices && products > 0)
    }

    pub fn all_products_have_view_button(&self) -> Result<bool, BrowserError> {
        let products = self.products_count()?;
        let buttons = self.base.count(&Locator::new(VIEW_PRODUCT))?;
        Ok(products == buttons && products > 0)
    }

    pub fn scroll_to_product(&self, index: usize) -> Result<(), BrowserError> {
        self.base.scroll_into_view(&Locator::new(PRODUCT_CARD).nth(index))?;
        self.base.settle(300);
        Ok(())
    }
}
