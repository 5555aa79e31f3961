use crate::error::ScenarioError;
use crate::harness::scenario::{Category, FixtureKind, Scenario};
use crate::harness::session::TestSession;
use crate::pages::checkout::PaymentCard;
use crate::scenarios::signup::register_and_continue;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "TC26",
            name: "CompleteCheckout_WithValidCard_ShouldPlaceOrder",
            categories: &[Category::Checkout, Category::Payment, Category::Smoke],
            fixture: FixtureKind::Signup,
            ignore: None,
            body: complete_checkout,
        },
        Scenario {
            id: "TC27",
            name: "Checkout_WithInvalidCard_ShouldShowError",
            categories: &[Category::Checkout, Category::Payment, Category::Negative],
            fixture: FixtureKind::Signup,
            ignore: None,
            body: checkout_invalid_card,
        },
        Scenario {
            id: "TC28",
            name: "VerifyOrderSummary_BeforePayment_ShouldShowCorrectDetails",
            categories: &[Category::Checkout, Category::Smoke],
            fixture: FixtureKind::Signup,
            ignore: None,
            body: verify_order_summary,
        },
        Scenario {
            id: "TC29",
            name: "DownloadInvoice_AfterOrder_ShouldDownloadSuccessfully",
            categories: &[Category::Checkout, Category::Smoke],
            fixture: FixtureKind::Signup,
            ignore: None,
            body: download_invoice,
        },
        Scenario {
            id: "TC30",
            name: "Checkout_WithOrderComment_ShouldAcceptComment",
            categories: &[Category::Checkout, Category::Smoke],
            fixture: FixtureKind::Signup,
            ignore: None,
            body: checkout_with_comment,
        },
        Scenario {
            id: "TC31",
            name: "VerifyOrderConfirmation_AfterPayment_ShouldShowAllDetails",
            categories: &[Category::Checkout, Category::Smoke],
            fixture: FixtureKind::Signup,
            ignore: None,
            body: verify_order_confirmation,
        },
    ]
}

/// Register the fixture account with the given address name, put the first
/// product in the cart and proceed to checkout.
fn register_and_reach_checkout(
    t: &TestSession,
    first_name: &str,
    last_name: &str,
) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let account = t.account()?;

    t.step(format!("Register {} {}", first_name, last_name));
    register_and_continue(
        t,
        &account.name,
        &account.email,
        &account.password,
        first_name,
        last_name,
    )?;

    t.step("Add a product and proceed to checkout");
    pages.home.click_products()?;
    t.wait(2000);
    pages.products.add_to_cart(0)?;
    pages.products.view_cart()?;
    pages.cart.proceed_to_checkout()?;
    Ok(())
}

fn pay_with(t: &TestSession, card: &PaymentCard) -> Result<(), ScenarioError> {
    let pages = t.pages();
    t.step(format!("Pay with card ending {}", &card.number[card.number.len().saturating_sub(4)..]));
    pages.checkout.fill_payment(card)?;
    pages.checkout.pay_and_confirm()?;
    Ok(())
}

fn complete_checkout(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    register_and_reach_checkout(t, "Test", "User")?;

    let address = pages.checkout.address_details()?;
    t.assert_contains(&address, "Test User", "Address should contain user name")?;
    t.assert_true(
        pages.checkout.is_order_review_visible(),
        "Order review should be visible",
    )?;

    pages
        .checkout
        .enter_comment("Please deliver between 9 AM and 5 PM")?;
    pages.checkout.place_order()?;
    pay_with(t, &PaymentCard::test_card())?;

    t.assert_true(
        pages.checkout.is_order_success_visible(),
        "Order success message should be displayed",
    )?;
    let message = pages.checkout.order_success_message()?;
    t.assert_contains(
        &message,
        "order has been confirmed",
        "Order success message should be displayed",
    )?;
    t.assert_true(
        pages.checkout.is_download_invoice_visible(),
        "Download invoice button should be visible",
    )
}

/// The demo store accepts any card; this only logs where the flow ended.
fn checkout_invalid_card(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    register_and_reach_checkout(t, "Test", "User")?;

    pages.checkout.place_order()?;
    pay_with(t, &PaymentCard::invalid_card())?;
    t.wait(1000);

    let still_on_payment = pages.checkout.is_payment_form_visible();
    tracing::info!(still_on_payment, url = %t.current_url()?, "invalid card submitted");
    Ok(())
}

fn verify_order_summary(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let account = t.account()?;
    let first_name = account.short_name().to_string();

    t.step(format!("Register with first name {}", first_name));
    register_and_continue(
        t,
        &account.name,
        &account.email,
        &account.password,
        &first_name,
        "User",
    )?;

    t.step("Add two products");
    pages.home.click_products()?;
    t.wait(2000);
    pages.products.add_to_cart(0)?;
    pages.products.continue_shopping()?;
    pages.products.add_to_cart(1)?;
    pages.products.view_cart()?;
    t.assert_eq(pages.cart.line_count()?, 2, "Cart should have 2 products")?;

    t.step("Review the order");
    pages.cart.proceed_to_checkout()?;
    let delivery = pages.checkout.delivery_address()?;
    t.assert_contains(&delivery, &first_name, "Delivery address should contain user name")?;
    let billing = pages.checkout.billing_address()?;
    t.assert_contains(&billing, &first_name, "Billing address should contain user name")?;
    t.assert_ge(
        pages.checkout.order_items()?.len(),
        2,
        "Order summary should show all products",
    )?;
    t.assert_true(pages.checkout.is_total_visible(), "Total amount should be visible")
}

fn download_invoice(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    register_and_reach_checkout(t, "Invoice", "Test")?;

    pages.checkout.place_order()?;
    pay_with(t, &PaymentCard::test_card())?;
    t.assert_true(
        pages.checkout.is_order_success_visible(),
        "Order should be confirmed",
    )?;
    t.assert_true(
        pages.checkout.is_download_invoice_visible(),
        "Download invoice button should be visible",
    )?;

    t.step("Download the invoice");
    pages.checkout.download_invoice()?;
    t.assert_true(
        pages.checkout.is_continue_visible(),
        "Continue button should be visible",
    )
}

fn checkout_with_comment(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let comment = "Please handle with care. Gift wrapping required. Call before delivery.";
    register_and_reach_checkout(t, "Comment", "Test")?;

    t.assert_true(
        pages.checkout.is_comment_box_visible(),
        "Comment textarea should be visible",
    )?;
    t.step("Enter an order comment");
    pages.checkout.enter_comment(comment)?;
    let entered = pages.checkout.comment()?;
    t.assert_eq(entered.as_str(), comment, "Comment should be correctly entered")?;

    pages.checkout.place_order()?;
    t.assert_true(
        pages.checkout.is_payment_form_visible(),
        "Payment form should be visible after comment",
    )
}

fn verify_order_confirmation(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    register_and_reach_checkout(t, "Confirm", "User")?;

    pages.checkout.enter_comment("Automated test order")?;
    pages.checkout.place_order()?;
    pay_with(t, &PaymentCard::test_card())?;

    t.assert_true(
        pages.checkout.is_order_success_visible(),
        "Congratulations message should be visible",
    )?;
    let confirmation = pages.checkout.order_success_message()?;
    t.assert_contains(
        &confirmation,
        "order has been confirmed",
        "Order confirmation text should be present",
    )?;
    t.assert_true(
        pages.checkout.is_download_invoice_visible(),
        "Download invoice button should be visible",
    )?;
    t.assert_true(
        pages.checkout.is_continue_visible(),
        "Continue button should be visible",
    )?;

    t.step("Continue after the order");
    pages.checkout.click_continue()?;
    let url = t.current_url()?;
    t.assert_contains(&url, "/", "Should redirect after order completion")
}
