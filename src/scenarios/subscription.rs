use std::time::Duration;

use crate::error::ScenarioError;
use crate::harness::scenario::{Category, FixtureKind, Scenario};
use crate::harness::session::TestSession;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "TC19",
            name: "SubscribeFromHomePage_ShouldShowSuccessMessage",
            categories: &[Category::Subscription, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: subscribe_from_home,
        },
        Scenario {
            id: "TC20",
            name: "SubscribeFromCartPage_ShouldShowSuccessMessage",
            categories: &[Category::Subscription, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: subscribe_from_cart,
        },
        Scenario {
            id: "TC21",
            name: "SubscribeWithInvalidEmail_ShouldShowValidation",
            categories: &[Category::Subscription, Category::Negative],
            fixture: FixtureKind::Base,
            ignore: None,
            body: subscribe_invalid_email,
        },
    ]
}

fn subscribe_and_confirm(t: &TestSession, where_: &str) -> Result<(), ScenarioError> {
    let pages = t.pages();
    t.assert_true(
        pages.subscription.is_header_visible(),
        &format!("Subscription section should be visible{}", where_),
    )?;

    let email = t.random_email();
    t.step(format!("Subscribe {}", email));
    pages.subscription.subscribe(&email)?;
    t.wait(1000);

    let message = pages.subscription.success_message()?;
    t.assert_contains(&message, "successfully subscribed", "Success message should be displayed")
}

fn subscribe_from_home(t: &TestSession) -> Result<(), ScenarioError> {
    t.step("Scroll to the footer");
    t.pages().home.scroll_to_footer()?;
    t.wait(500);
    subscribe_and_confirm(t, "")
}

fn subscribe_from_cart(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Open the cart and scroll to the footer");
    pages.home.click_cart()?;
    t.wait(2000);
    pages.base.scroll_to_bottom()?;
    t.wait(1000);
    subscribe_and_confirm(t, " in cart page")
}

fn subscribe_invalid_email(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Subscribe with a malformed email");
    pages.home.scroll_to_footer()?;
    t.wait(500);
    pages.subscription.subscribe("not-an-email")?;

    let validation = pages.subscription.email_validation_message()?;
    tracing::info!(%validation, "subscribe field validation");
    t.assert_false(
        pages.subscription.is_success_visible(Duration::from_millis(2000)),
        "Success message should NOT appear with invalid email",
    )
}
