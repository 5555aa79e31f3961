use crate::error::{BrowserError, ScenarioError};
use crate::harness::scenario::{Category, FixtureKind, Scenario};
use crate::harness::session::TestSession;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "TC32",
            name: "VerifyHeaderLinks_ShouldNavigateCorrectly",
            categories: &[Category::Navigation, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: header_links,
        },
        Scenario {
            id: "TC33",
            name: "VerifyFooterLinks_ShouldBeVisible",
            categories: &[Category::Navigation, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: footer_content,
        },
        Scenario {
            id: "TC34",
            name: "VerifyTestCasesPage_ShouldDisplayTestCases",
            categories: &[Category::Navigation, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: test_cases_page,
        },
        Scenario {
            id: "TC35",
            name: "VerifyScrollFunctionality_ShouldScrollCorrectly",
            categories: &[Category::Navigation, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: scroll_functionality,
        },
    ]
}

fn follow_link(
    t: &TestSession,
    label: &str,
    path: &str,
    click: impl FnOnce() -> Result<(), BrowserError>,
) -> Result<(), ScenarioError> {
    t.step(format!("Follow the {} link", label));
    click()?;
    t.wait(1500);
    t.assert_true(t.url_contains(path)?, &format!("{} link should work", label))
}

fn header_links(t: &TestSession) -> Result<(), ScenarioError> {
    let home = t.pages().home;

    follow_link(t, "Home", "/", || home.click_home())?;
    follow_link(t, "Products", "/products", || home.click_products())?;
    follow_link(t, "Cart", "/view_cart", || home.click_cart())?;
    follow_link(t, "Signup / Login", "/login", || home.click_signup_login())?;
    follow_link(t, "Contact us", "/contact_us", || home.click_contact_us())
}

fn footer_content(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Scroll to the footer");
    pages.home.scroll_to_footer()?;
    t.wait(500);

    t.assert_true(
        pages.subscription.is_header_visible(),
        "Subscription section should be visible in footer",
    )?;
    t.assert_true(
        pages.subscription.is_email_input_visible(),
        "Subscription email input should be visible",
    )?;
    let footer = pages.subscription.footer_text()?;
    t.assert_contains(&footer, "Copyright", "Footer should contain copyright text")?;
    t.assert_true(pages.subscription.is_footer_visible(), "Footer should be visible")?;
    t.assert_gt(
        footer.chars().count(),
        100,
        "Footer should have substantial content",
    )
}

fn test_cases_page(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Open Test Cases");
    pages.home.click_test_cases()?;
    t.wait(2000);

    t.assert_true(
        t.url_contains("/test_cases")?,
        "Should navigate to test cases page",
    )?;
    let heading = pages.home.header_text()?;
    t.assert_contains(&heading, "TEST CASES", "Page should have 'Test Cases' heading")?;
    let body = pages.base.body_text()?;
    t.assert_contains(&body, "Test Case", "Page should contain test cases")
}

fn scroll_functionality(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let initial = pages.base.scroll_offset()?;

    t.step("Scroll down to the footer");
    pages.home.scroll_to_footer()?;
    t.wait(500);
    let scrolled = pages.base.scroll_offset()?;
    t.assert_gt(scrolled, initial, "Page should scroll down")?;
    t.assert_true(
        pages.subscription.is_header_visible(),
        "Subscription section should be visible after scroll",
    )?;

    t.step("Scroll back to the top");
    pages.home.scroll_to_top()?;
    t.wait(500);
    let back = pages.base.scroll_offset()?;
    t.assert_lt(back, scrolled, "Page should scroll back up")?;
    t.assert_true(
        pages.home.is_site_header_visible(),
        "Header should be visible after scroll up",
    )
}
