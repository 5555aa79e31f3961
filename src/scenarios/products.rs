use crate::error::ScenarioError;
use crate::harness::scenario::{Category, FixtureKind, Scenario};
use crate::harness::session::TestSession;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "TC07",
            name: "ViewAllProducts_ShouldDisplayProductsList",
            categories: &[Category::Products, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: view_all_products,
        },
        Scenario {
            id: "TC08",
            name: "ViewProductDetails_ShouldDisplayAllDetails",
            categories: &[Category::Products, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: view_product_details,
        },
        Scenario {
            id: "TC09",
            name: "SearchProduct_WithValidName_ShouldDisplayResults",
            categories: &[Category::Products, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: search_product,
        },
        Scenario {
            id: "TC10",
            name: "AddProductToCart_ShouldAddSuccessfully",
            categories: &[Category::Products, Category::Cart, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: add_product_to_cart,
        },
    ]
}

fn view_all_products(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Open the products page");
    pages.home.click_products()?;
    t.wait(2000);

    t.assert_true(
        pages.products.is_all_products_visible(),
        "Products page should be visible",
    )?;
    let title = pages.products.header_title()?;
    t.assert_contains(&title, "ALL PRODUCTS", "Page title should contain 'All Products'")?;
    t.assert_gt(
        pages.products.products_count()?,
        0,
        "Products list should not be empty",
    )?;
    t.assert_true(
        pages.products.all_products_have_view_button()?,
        "All products should have View Product button",
    )?;
    t.assert_true(
        pages.products.all_products_have_price()?,
        "All products should display price",
    )
}

fn view_product_details(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Open the first product");
    pages.home.click_products()?;
    t.wait(2000);
    let listed = pages.products.name_at(0)?;
    t.step(format!("Viewing {}", listed));
    pages.products.view_product(0)?;

    t.assert_true(
        pages.product_details.is_details_visible(),
        "Product details should be visible",
    )?;
    t.assert_true(
        pages.product_details.are_all_details_visible(),
        "All product details (name, category, price, availability, condition, brand) should be visible",
    )?;

    let details = pages.product_details.all_details()?;
    for key in ["Name", "Price", "Availability", "Condition", "Brand"] {
        let value = details.get(key).map(|v| v.trim()).unwrap_or_default();
        t.assert_false(value.is_empty(), &format!("{} should not be empty", key))?;
    }

    t.assert_true(
        pages.product_details.has_product_images(),
        "Product should have at least one image",
    )
}

fn search_product(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let term = "Top";

    t.step(format!("Search for '{}'", term));
    pages.home.click_products()?;
    t.wait(2000);
    pages.products.search(term)?;

    t.assert_true(
        pages.products.is_search_results_visible(),
        "Search results should be visible",
    )?;
    let header = pages.products.searched_header_text()?;
    t.assert_contains(&header, "SEARCHED PRODUCTS", "Header should indicate searched products")?;
    t.assert_true(
        pages.products.is_product_in_search_results(term)?,
        &format!("Search results should contain products with '{}'", term),
    )?;

    let names = pages.products.product_names()?;
    for name in names.iter().take(5) {
        tracing::info!("  - {}", name);
    }
    t.assert_gt(names.len(), 0, "Search should return at least one product")
}

fn add_product_to_cart(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Add the first product to the cart");
    pages.home.click_products()?;
    t.wait(2000);
    let name = pages.products.name_at(0)?;
    let price = pages.products.price_at(0)?;
    tracing::info!(product = %name, price = %price, "adding to cart");
    pages.products.add_to_cart(0)?;

    t.step("View the cart");
    pages.products.view_cart()?;
    t.assert_true(pages.cart.is_loaded(), "Cart page should be loaded")?;
    t.assert_true(
        pages.cart.is_product_in_cart(&name)?,
        &format!("Product '{}' should be in cart", name),
    )?;
    t.assert_eq(pages.cart.line_count()?, 1, "Cart should contain exactly 1 product")?;

    let cart_name = pages.cart.name_at(0)?;
    t.assert_contains(&cart_name, &name, "Product name in cart should match")?;
    let quantity = pages.cart.quantity_at(0)?;
    t.assert_eq(quantity.as_str(), "1", "Default quantity should be 1")?;
    t.assert_true(
        pages.cart.verify_product_total_price(0)?,
        "Total price should be correctly calculated",
    )
}
