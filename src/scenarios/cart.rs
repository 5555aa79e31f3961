use crate::error::ScenarioError;
use crate::harness::scenario::{Category, FixtureKind, Scenario};
use crate::harness::session::TestSession;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "TC11",
            name: "AddMultipleProducts_ShouldAddAllToCart",
            categories: &[Category::Cart, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: add_multiple_products,
        },
        Scenario {
            id: "TC12",
            name: "RemoveProduct_ShouldRemoveFromCart",
            categories: &[Category::Cart, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: remove_product,
        },
        Scenario {
            id: "TC13",
            name: "UpdateQuantity_ShouldReflectNewQuantity",
            categories: &[Category::Cart, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: update_quantity,
        },
        Scenario {
            id: "TC14",
            name: "VerifyCartTotals_ShouldCalculateCorrectly",
            categories: &[Category::Cart, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: verify_cart_totals,
        },
        Scenario {
            id: "TC15",
            name: "ClearCart_ShouldRemoveAllProducts",
            categories: &[Category::Cart],
            fixture: FixtureKind::Base,
            ignore: None,
            body: clear_cart,
        },
        Scenario {
            id: "TC16",
            name: "ViewEmptyCart_ShouldShowEmptyMessage",
            categories: &[Category::Cart, Category::Negative],
            fixture: FixtureKind::Base,
            ignore: None,
            body: view_empty_cart,
        },
    ]
}

/// Products page, add the first two products, open the cart.
fn add_two_and_view_cart(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    pages.home.click_products()?;
    t.wait(2000);
    pages.products.add_to_cart(0)?;
    pages.products.continue_shopping()?;
    pages.products.add_to_cart(1)?;
    pages.products.view_cart()?;
    Ok(())
}

fn add_multiple_products(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let wanted = 2;

    t.step("Collect product names");
    pages.home.click_products()?;
    t.wait(2000);
    let mut expected = Vec::with_capacity(wanted);
    for index in 0..wanted {
        expected.push(pages.products.name_at(index)?);
    }

    t.step(format!("Add {} products to the cart", wanted));
    pages.products.add_to_cart(0)?;
    pages.products.continue_shopping()?;
    pages.products.add_to_cart(1)?;
    pages.products.view_cart()?;

    t.assert_true(pages.cart.is_loaded(), "Cart page should be loaded")?;
    t.assert_eq(
        pages.cart.line_count()?,
        wanted,
        &format!("Cart should contain {} products", wanted),
    )?;
    for name in &expected {
        t.assert_true(
            pages.cart.is_product_in_cart(name)?,
            &format!("Product '{}' should be in cart", name),
        )?;
    }
    Ok(())
}

fn remove_product(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Add two products");
    pages.home.click_products()?;
    t.wait(2000);
    let first = pages.products.name_at(0)?;
    let second = pages.products.name_at(1)?;
    pages.products.add_to_cart(0)?;
    pages.products.continue_shopping()?;
    pages.products.add_to_cart(1)?;
    pages.products.view_cart()?;
    t.assert_eq(pages.cart.line_count()?, 2, "Should have 2 products initially")?;

    t.step(format!("Remove '{}'", first));
    pages.cart.delete_at(0)?;
    t.wait(1000);

    t.assert_eq(pages.cart.line_count()?, 1, "Should have 1 product after deletion")?;
    t.assert_false(
        pages.cart.is_product_in_cart(&first)?,
        &format!("Product '{}' should be removed from cart", first),
    )?;
    t.assert_true(
        pages.cart.is_product_in_cart(&second)?,
        &format!("Product '{}' should still be in cart", second),
    )
}

fn update_quantity(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let quantity = "4";

    t.step("Open the first product");
    pages.home.click_products()?;
    t.wait(2000);
    pages.products.view_product(0)?;

    t.step(format!("Add it with quantity {}", quantity));
    pages.product_details.set_quantity(quantity)?;
    pages.product_details.add_to_cart()?;
    pages.product_details.view_cart()?;

    t.assert_true(pages.cart.is_loaded(), "Cart page should be loaded")?;
    let in_cart = pages.cart.quantity_at(0)?;
    t.assert_eq(
        in_cart.as_str(),
        quantity,
        &format!("Product quantity should be {}", quantity),
    )?;
    t.assert_true(
        pages.cart.verify_product_total_price(0)?,
        "Total price should be correctly calculated (price x quantity)",
    )
}

fn verify_cart_totals(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Fill the cart");
    add_two_and_view_cart(t)?;

    for line in pages.cart.all_line_details()? {
        tracing::info!(?line, "cart line");
    }
    t.assert_true(
        pages.cart.verify_all_product_total_prices()?,
        "All product totals should be correctly calculated",
    )?;

    let count = pages.cart.line_count()?;
    for index in 0..count {
        t.assert_true(
            pages.cart.verify_product_total_price(index)?,
            &format!("Product {} total price should be correct", index + 1),
        )?;
    }
    Ok(())
}

fn clear_cart(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Fill the cart");
    add_two_and_view_cart(t)?;
    t.assert_gt(pages.cart.line_count()?, 0, "Cart should have products initially")?;

    t.step("Delete every line");
    pages.cart.clear_cart()?;
    t.wait(2000);

    t.assert_true(pages.cart.is_empty(), "Cart should be empty after clearing")
}

fn view_empty_cart(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Open the cart without adding anything");
    pages.home.click_cart()?;
    t.wait(2000);

    t.assert_true(t.url_contains("/view_cart")?, "Should navigate to cart page")?;
    t.assert_true(pages.cart.is_empty(), "Cart should be empty")?;
    t.assert_eq(pages.cart.line_count()?, 0, "Cart should have 0 products")?;
    t.assert_false(pages.cart.has_products()?, "Cart should not have any products")
}
