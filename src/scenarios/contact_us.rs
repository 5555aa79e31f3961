use crate::browser::driver::DialogPolicy;
use crate::error::ScenarioError;
use crate::harness::scenario::{Category, FixtureKind, Scenario};
use crate::harness::session::TestSession;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "TC17",
            name: "ContactUs_WithValidData_ShouldSubmitSuccessfully",
            categories: &[Category::ContactUs, Category::Smoke],
            fixture: FixtureKind::Base,
            ignore: None,
            body: submit_valid_form,
        },
        Scenario {
            id: "TC18",
            name: "ContactUs_WithInvalidEmail_ShouldShowValidation",
            categories: &[Category::ContactUs, Category::Negative],
            fixture: FixtureKind::Base,
            ignore: None,
            body: submit_invalid_email,
        },
    ]
}

fn submit_valid_form(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let name = t.random_name();
    let email = t.random_email();

    t.step("Open Contact Us");
    pages.home.click_contact_us()?;
    t.wait(2000);
    let title = pages.contact_us.form_title()?;
    t.assert_contains(&title, "GET IN TOUCH", "Contact Us page title should be visible")?;

    t.step(format!("Submit the form as {}", email));
    pages.contact_us.fill_form(
        &name,
        &email,
        "Test Inquiry - Automation",
        "This is an automated test message. Please ignore.",
    )?;
    t.driver().set_dialog_policy(DialogPolicy::Accept)?;
    pages.contact_us.submit()?;
    t.wait(2000);

    let message = pages.contact_us.success_message()?;
    t.assert_contains(
        &message,
        "Success! Your details have been submitted successfully",
        "Success message should be displayed",
    )
}

fn submit_invalid_email(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();
    let name = t.random_name();

    t.step("Open Contact Us");
    pages.home.click_contact_us()?;
    t.wait(2000);

    t.step("Submit with a malformed email");
    pages
        .contact_us
        .fill_form(&name, "invalid-email-format", "Test Subject", "Test message")?;
    pages.contact_us.submit()?;

    let validation = pages.contact_us.email_validation_message()?;
    tracing::info!(%validation, "email field validation");
    t.assert_true(
        t.url_contains("/contact_us")?,
        "Should remain on contact us page due to validation error",
    )
}
