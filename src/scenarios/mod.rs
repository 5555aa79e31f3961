pub mod brand_category;
pub mod cart;
pub mod checkout;
pub mod contact_us;
pub mod login;
pub mod navigation;
pub mod performance;
pub mod products;
pub mod security;
pub mod signup;
pub mod subscription;

use crate::harness::scenario::Scenario;

/// Every scenario in TC order.
pub fn all() -> Vec<Scenario> {
    let mut scenarios = Vec::new();
    scenarios.extend(login::scenarios());
    scenarios.extend(signup::scenarios());
    scenarios.extend(products::scenarios());
    scenarios.extend(cart::scenarios());
    scenarios.extend(contact_us::scenarios());
    scenarios.extend(subscription::scenarios());
    scenarios.extend(brand_category::scenarios());
    scenarios.extend(checkout::scenarios());
    scenarios.extend(navigation::scenarios());
    scenarios.extend(performance::scenarios());
    scenarios.extend(security::scenarios());
    scenarios
}
