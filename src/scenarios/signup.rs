use crate::error::ScenarioError;
use crate::harness::scenario::{Category, FixtureKind, Scenario};
use crate::harness::session::TestSession;
use crate::pages::signup::RegistrationDetails;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "TC04",
            name: "RegisterNewUser_WithValidData_ShouldRegisterSuccessfully",
            categories: &[Category::Signup, Category::Smoke],
            fixture: FixtureKind::Signup,
            ignore: None,
            body: register_new_user,
        },
        Scenario {
            id: "TC05",
            name: "RegisterWithExistingEmail_ShouldShowErrorMessage",
            categories: &[Category::Signup, Category::Negative],
            fixture: FixtureKind::Signup,
            ignore: None,
            body: register_existing_email,
        },
        Scenario {
            id: "TC06",
            name: "DeleteAccount_WhenLoggedIn_ShouldDeleteSuccessfully",
            categories: &[Category::Signup, Category::Smoke],
            fixture: FixtureKind::Signup,
            ignore: None,
            body: delete_account,
        },
    ]
}

/// Signup, quick registration and continue; leaves the new user logged in.
pub(crate) fn register_and_continue(
    t: &TestSession,
    name: &str,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), ScenarioError> {
    let pages = t.pages();
    pages.home.click_signup_login()?;
    pages.login.perform_signup(name, email)?;
    pages
        .signup
        .quick_registration(password, first_name, last_name, &t.random_mobile())?;
    t.assert_true(
        pages.signup.is_account_created_visible(),
        "Account created message should be visible",
    )?;
    pages.signup.click_continue()?;
    Ok(())
}

fn register_new_user(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let account = t.account()?;

    t.step("Open the signup form");
    pages.home.click_signup_login()?;
    t.assert_true(pages.login.is_signup_form_visible(), "Signup form should be visible")?;

    t.step(format!("Sign up as {} <{}>", account.name, account.email));
    pages.login.perform_signup(&account.name, &account.email)?;
    t.assert_true(
        pages.signup.is_account_info_header_visible(),
        "Account Information page should be visible",
    )?;

    t.step("Complete the registration form");
    let details = RegistrationDetails::quick(&account.password, "Test", "User", &t.random_mobile());
    pages.signup.complete_registration(&details)?;

    t.assert_true(
        pages.signup.is_account_created_visible(),
        "Account created message should be visible",
    )?;
    let message = pages.signup.account_created_message()?;
    t.assert_contains(&message, "ACCOUNT CREATED", "Confirmation should say ACCOUNT CREATED")?;

    t.step("Continue to the home page");
    pages.signup.click_continue()?;
    t.assert_true(
        pages.home.is_user_logged_in(),
        "User should be logged in after registration",
    )?;
    let username = pages.home.logged_in_username()?;
    t.assert_eq(username.as_str(), account.name.as_str(), "Username should match the signup name")
}

fn register_existing_email(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let account = t.account()?;

    t.step("Register the account once");
    register_and_continue(t, &account.name, &account.email, &account.password, "Test", "User")?;
    pages.home.click_logout()?;

    t.step("Sign up again with the same email");
    pages.home.click_signup_login()?;
    let new_name = t.random_name();
    pages.login.perform_signup(&new_name, &account.email)?;

    t.assert_true(
        pages.login.is_email_exists_error_displayed(),
        "Email exists error should be displayed",
    )?;
    t.assert_true(
        pages.login.is_signup_form_visible(),
        "Should remain on signup page",
    )
}

fn delete_account(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let account = t.account()?;

    t.step("Register and stay logged in");
    register_and_continue(t, &account.name, &account.email, &account.password, "Test", "User")?;
    t.assert_true(
        pages.home.is_user_logged_in(),
        "User should be logged in before deletion",
    )?;

    t.step("Delete the account");
    pages.home.click_delete_account()?;
    t.assert_true(
        pages.login.is_account_deleted_visible(),
        "Account deleted message should be visible",
    )?;
    let message = pages.login.account_deleted_message()?;
    t.assert_contains(&message, "ACCOUNT DELETED", "Confirmation should say ACCOUNT DELETED")?;

    pages.signup.click_continue()?;
    t.assert_false(
        pages.home.is_user_logged_in(),
        "User should be logged out after account deletion",
    )
}
