use crate::error::ScenarioError;
use crate::harness::scenario::{Category, FixtureKind, Scenario};
use crate::harness::session::TestSession;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "TC22",
            name: "ViewAllBrands_ShouldDisplayBrandsList",
            categories: &[Category::Brand, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: view_all_brands,
        },
        Scenario {
            id: "TC23",
            name: "FilterByBrand_ShouldShowBrandProducts",
            categories: &[Category::Brand, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: filter_by_brand,
        },
        Scenario {
            id: "TC24",
            name: "ViewCategoryProducts_ShouldDisplayCategory",
            categories: &[Category::Category, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: view_category_products,
        },
        Scenario {
            id: "TC25",
            name: "NavigateBetweenCategories_ShouldUpdateProducts",
            categories: &[Category::Category, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: navigate_between_categories,
        },
    ]
}

fn open_products_sidebar(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    pages.home.click_products()?;
    t.wait(2000);
    pages.base.scroll_to(400)?;
    t.wait(1000);
    Ok(())
}

fn view_all_brands(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Open the brand list");
    open_products_sidebar(t)?;
    t.assert_true(
        pages.sidebar.is_brands_header_visible(),
        "Brands section should be visible",
    )?;

    let brands = pages.sidebar.brand_names()?;
    tracing::info!(count = brands.len(), ?brands, "brands listed");
    t.assert_gt(brands.len(), 0, "Should have at least one brand")
}

fn filter_by_brand(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    open_products_sidebar(t)?;
    let brand = pages.sidebar.click_first_brand()?;
    t.step(format!("Filtered by brand {}", brand));
    t.wait(1000);

    let title = pages.sidebar.products_title()?;
    t.assert_contains(&title, "BRAND", "Should display brand products page")?;
    t.assert_gt(
        pages.sidebar.products_count()?,
        0,
        "Should display brand products",
    )
}

fn view_category_products(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.assert_true(
        pages.sidebar.is_category_header_visible(),
        "Category section should be visible",
    )?;

    t.step("Open Women > Dress");
    pages.sidebar.expand_category("Women")?;
    pages.sidebar.click_subcategory("Women", "Dress")?;
    t.wait(1000);

    let title = pages.sidebar.products_title()?;
    t.assert_contains(&title, "WOMEN", "Should display Women category page")?;
    t.assert_contains(&title, "DRESS", "Should display Dress subcategory")?;
    t.assert_gt(
        pages.sidebar.products_count()?,
        0,
        "Should display category products",
    )
}

fn navigate_between_categories(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Open Women > Dress");
    pages.sidebar.expand_category("Women")?;
    pages.sidebar.click_subcategory("Women", "Dress")?;
    t.wait(1000);
    let first_title = pages.sidebar.products_title()?;

    t.step("Switch to Men > Tshirts");
    pages.sidebar.expand_category("Men")?;
    pages.sidebar.click_subcategory("Men", "Tshirts")?;
    t.wait(1000);
    let second_title = pages.sidebar.products_title()?;

    t.assert_contains(&second_title, "MEN", "Should display Men category")?;
    t.assert_contains(&second_title, "TSHIRTS", "Should display Tshirts subcategory")?;
    t.assert_ne(
        second_title.as_str(),
        first_title.as_str(),
        "Category title should change when navigating",
    )?;
    t.assert_gt(
        pages.sidebar.products_count()?,
        0,
        "Should display products in new category",
    )
}
