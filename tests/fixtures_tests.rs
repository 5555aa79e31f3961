use std::collections::HashSet;

use storefront_e2e::pages::Pages;
use storefront_e2e::pages::signup::RegistrationDetails;
use storefront_e2e::support::fixtures::{
    Account, DEFAULT_PASSWORD, random_email, random_mobile, random_name,
};

use crate::common::fake_driver::{FakeDriver, FakeState};
use crate::common::utils::{fast_config, shared};

mod common;

// ============================================================================
// Random data
// ============================================================================

#[test]
fn names_have_expected_shape() {
    let name = random_name();
    let (prefix, digits) = name.split_once('_').unwrap();
    assert_eq!(prefix, "TestUser");
    assert!(digits.chars().all(|c| c.is_ascii_digit()), "{}", name);
}

#[test]
fn emails_use_example_domain() {
    let email = random_email();
    assert!(email.starts_with("testuser_"));
    assert!(email.ends_with("@example.com"));
}

#[test]
fn mobiles_are_ten_digits_starting_with_nine() {
    for _ in 0..50 {
        let mobile = random_mobile();
        assert_eq!(mobile.len(), 10, "{}", mobile);
        assert!(mobile.starts_with('9'));
        assert!(mobile.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn generated_values_are_unique_within_a_run() {
    let names: HashSet<String> = (0..200).map(|_| random_name()).collect();
    let emails: HashSet<String> = (0..200).map(|_| random_email()).collect();
    assert_eq!(names.len(), 200);
    assert_eq!(emails.len(), 200);
}

// ============================================================================
// Account
// ============================================================================

#[test]
fn generated_accounts_differ() {
    let a = Account::generate();
    let b = Account::generate();
    assert_ne!(a.email, b.email);
    assert_ne!(a.name, b.name);
    assert_eq!(a.password, DEFAULT_PASSWORD);
}

#[test]
fn short_name_is_part_after_underscore() {
    let account = Account {
        name: "TestUser_120000001".into(),
        email: "x@example.com".into(),
        password: DEFAULT_PASSWORD.into(),
    };
    assert_eq!(account.short_name(), "120000001");

    let plain = Account {
        name: "Plain".into(),
        ..account
    };
    assert_eq!(plain.short_name(), "Plain");
}

// ============================================================================
// Registration details
// ============================================================================

#[test]
fn quick_details_fill_defaults() {
    let details = RegistrationDetails::quick("pw", "Jane", "Doe", "9123456789");
    assert_eq!(details.title, "Mr");
    assert_eq!(details.country, "India");
    assert_eq!(details.zipcode, "12345");
    assert_eq!(details.first_name, "Jane");
    assert_eq!(details.mobile, "9123456789");
    assert!(details.newsletter && details.offers);
}

#[test]
fn quick_registration_fills_every_field_then_submits() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path());
    let state = shared(FakeState::default());
    state
        .borrow_mut()
        .visible
        .insert("button[data-qa='create-account']".to_string());
    let driver = FakeDriver::new(state.clone());
    let pages = Pages::new(&driver, &config);

    pages
        .signup
        .quick_registration("pw", "Jane", "Doe", "9123456789")
        .unwrap();

    let calls = state.borrow().calls.clone();
    let fills = calls.iter().filter(|c| c.starts_with("fill")).count();
    // password, first/last name, company, address x2, state, city, zip, mobile
    assert_eq!(fills, 10);
    assert!(calls.iter().any(|c| c.contains("id_gender1") && c.ends_with("true")));
    assert!(calls.iter().any(|c| c.starts_with("select_option select[data-qa='country']")));
    assert_eq!(
        calls.last().map(String::as_str),
        Some("click button[data-qa='create-account']")
    );
}
