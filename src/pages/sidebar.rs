use crate::browser::locator::Locator;
use crate::error::BrowserError;
use crate::pages::base::BasePage;

const CATEGORY_HEADER: &str = "h2:has-text('Category')";
const BRANDS_HEADER: &str = "h2:has-text('Brands')";
const BRAND_LINKS: &str = ".brands-name .nav.nav-pills.nav-stacked li a";
const SECTION_HEADER: &str = "h2.title.text-center";
const PRODUCT_CARD: &str = ".product-image-wrapper";

/// Left-hand category accordion and brand list.
#[derive(Clone, Copy)]
pub struct Sidebar<'a> {
    base: BasePage<'a>,
}

impl<'a> Sidebar<'a> {
    pub fn new(base: BasePage<'a>) -> Self {
        Self { base }
    }

    pub fn is_category_header_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(CATEGORY_HEADER).first())
    }

    /// Open an accordion panel such as "Women" or "Men".
    pub fn expand_category(&self, category: &str) -> Result<(), BrowserError> {
        self.base
            .click(&Locator::new(format!("a[href='#{}']", category)))?;
        self.base.settle(500);
        Ok(())
    }

    /// Click a subcategory link inside an expanded panel.
    pub fn click_subcategory(&self, category: &str, subcategory: &str) -> Result<(), BrowserError> {
        let link = Locator::new(format!("#{} a", category))
            .filter_text(subcategory)
            .first();
        self.base.wait_until_visible(&link, self.base.config().probe_timeout())?;
        self.base.click(&link)?;
        self.base.settle(1000);
        Ok(())
    }

    pub fn is_brands_header_visible(&self) -> bool {
        self.base.is_shown(&Locator::new(BRANDS_HEADER).first())
    }

    pub fn brand_names(&self) -> Result<Vec<String>, BrowserError> {
        let names = self
            .base
            .driver()
            .all_text_contents(&Locator::new(BRAND_LINKS))?;
        Ok(names.into_iter().map(|n| n.trim().to_string()).collect())
    }

    /// Click the first brand and return its trimmed label.
    pub fn click_first_brand(&self) -> Result<String, BrowserError> {
        let first = Locator::new(BRAND_LINKS).first();
        let name = self.base.trimmed_text(&first)?;
        self.base.click(&first)?;
        self.base.settle(1000);
        Ok(name)
    }

    /// Header of the filtered listing, e.g. "WOMEN - DRESS PRODUCTS".
    pub fn products_title(&self) -> Result<String, BrowserError> {
        self.base.text(&Locator::new(SECTION_HEADER).first())
    }

    pub fn products_count(&self) -> Result<usize, BrowserError> {
        self.base.count(&Locator::new(PRODUCT_CARD))
    }
}
