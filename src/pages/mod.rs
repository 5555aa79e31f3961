pub mod base;
pub mod cart;
pub mod checkout;
pub mod contact_us;
pub mod home;
pub mod login;
pub mod product_details;
pub mod products;
pub mod sidebar;
pub mod signup;
pub mod subscription;

use crate::browser::driver::Driver;
use base::{BasePage, PageConfig};

/// Every page object of one session, all bound to the same driver.
#[derive(Clone, Copy)]
pub struct Pages<'a> {
    pub base: BasePage<'a>,
    pub home: home::HomePage<'a>,
    pub login: login::LoginPage<'a>,
    pub signup: signup::SignupPage<'a>,
    pub products: products::ProductsPage<'a>,
    pub product_details: product_details::ProductDetailsPage<'a>,
    pub cart: cart::CartPage<'a>,
    pub checkout: checkout::CheckoutPage<'a>,
    pub contact_us: contact_us::ContactUsPage<'a>,
    pub subscription: subscription::SubscriptionSection<'a>,
    pub sidebar: sidebar::Sidebar<'a>,
}

impl<'a> Pages<'a> {
    pub fn new(driver: &'a dyn Driver, config: &'a PageConfig) -> Self {
        let base = BasePage::new(driver, config);
        Self {
            base,
            home: home::HomePage::new(base),
            login: login::LoginPage::new(base),
            signup: signup::SignupPage::new(base),
            products: products::ProductsPage::new(base),
            product_details: product_details::ProductDetailsPage::new(base),
            cart: cart::CartPage::new(base),
            checkout: checkout::CheckoutPage::new(base),
            contact_us: contact_us::ContactUsPage::new(base),
            subscription: subscription::SubscriptionSection::new(base),
            sidebar: sidebar::Sidebar::new(base),
        }
    }
}
