use crate::error::ScenarioError;
use crate::harness::scenario::{Category, FixtureKind, Scenario};
use crate::harness::session::TestSession;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "TC01",
            name: "ValidLogin_WithCorrectCredentials_ShouldLoginSuccessfully",
            categories: &[Category::Login, Category::Smoke],
            fixture: FixtureKind::Login,
            ignore: None,
            body: valid_login,
        },
        Scenario {
            id: "TC02",
            name: "InvalidLogin_WithWrongPassword_ShouldShowErrorMessage",
            categories: &[Category::Login, Category::Negative],
            fixture: FixtureKind::Login,
            ignore: None,
            body: invalid_login,
        },
        Scenario {
            id: "TC03",
            name: "Logout_WhenLoggedIn_ShouldLogoutSuccessfully",
            categories: &[Category::Login, Category::Smoke],
            fixture: FixtureKind::Login,
            ignore: None,
            body: logout,
        },
    ]
}

fn valid_login(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let account = t.account()?;

    t.step("Open the login page");
    pages.home.click_signup_login()?;
    t.assert_true(pages.login.is_login_form_visible(), "Login form should be visible")?;

    t.step(format!("Log in as {}", account.email));
    pages.login.perform_login(&account.email, &account.password)?;

    t.assert_true(pages.home.is_user_logged_in(), "User should be logged in")?;
    let username = pages.home.logged_in_username()?;
    t.assert_eq(username.as_str(), account.name.as_str(), "Username should match the account name")?;
    t.assert_true(pages.home.is_logout_visible(), "Logout button should be visible")
}

fn invalid_login(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let account = t.account()?;

    t.step("Log in with a wrong password");
    pages.home.click_signup_login()?;
    pages.login.perform_login(&account.email, "WrongPassword123")?;

    t.assert_true(
        pages.login.is_login_error_displayed(),
        "Error message should be displayed",
    )?;
    let error = pages.login.login_error_message()?;
    t.assert_contains(
        &error,
        "Your email or password is incorrect",
        "Error message should indicate incorrect credentials",
    )?;

    t.step("Return home and confirm nobody is logged in");
    pages.home.navigate_to_home()?;
    t.assert_false(pages.home.is_user_logged_in(), "User should NOT be logged in")
}

fn logout(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let account = t.account()?;

    t.step("Log in");
    pages.home.click_signup_login()?;
    pages.login.perform_login(&account.email, &account.password)?;
    t.assert_true(
        pages.home.is_user_logged_in(),
        "User should be logged in before logout",
    )?;

    t.step("Log out");
    pages.home.click_logout()?;
    t.assert_true(
        pages.login.is_login_form_visible(),
        "Should be redirected to login page",
    )?;

    pages.home.navigate_to_home()?;
    t.assert_false(pages.home.is_user_logged_in(), "User should be logged out")
}
