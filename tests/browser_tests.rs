use std::collections::HashMap;

use serde_json::json;
use storefront_e2e::browser::driver::{
    Cookie, DialogPolicy, LaunchOptions, PageEvent, SelectBy, WaitUntil,
};
use storefront_e2e::browser::locator::Locator;
use storefront_e2e::browser::session::{BrowserRequest, BrowserResponse};
use storefront_e2e::error::BrowserError;

// ============================================================================
// Locator
// ============================================================================

#[test]
fn locator_narrowing_returns_new_values() {
    let rows = Locator::new("tbody tr");
    let third = rows.nth(2);

    assert_eq!(rows.index(), None);
    assert_eq!(third.index(), Some(2));
    assert_eq!(third.selector(), "tbody tr");
    assert_eq!(third.without_index(), rows);
    assert_eq!(rows.first().index(), Some(0));
}

#[test]
fn locator_chains_segments() {
    let link = Locator::new("#accordian")
        .locator(".panel")
        .filter_text("Women")
        .locator("a")
        .first();

    assert_eq!(link.segments().len(), 3);
    assert_eq!(link.selector(), "a");
    assert_eq!(
        link.to_string(),
        "#accordian >> .panel >> has-text=\"Women\" >> a >> nth=0"
    );
}

#[test]
fn locator_serializes_as_segment_list() {
    let value = serde_json::to_value(Locator::new(".product").filter_text("Top").nth(1)).unwrap();
    assert_eq!(value, json!([{ "selector": ".product", "hasText": "Top", "nth": 1 }]));

    let plain = serde_json::to_value(Locator::from("h2")).unwrap();
    assert_eq!(plain, json!([{ "selector": "h2" }]));
}

// ============================================================================
// Wire protocol
// ============================================================================

#[test]
fn navigate_request_wire_format() {
    let request = BrowserRequest::Navigate {
        url: "https://shop.test/".into(),
        wait_until: WaitUntil::DomContentLoaded,
        timeout_ms: None,
    };
    assert_eq!(request.name(), "navigate");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "cmd": "navigate", "url": "https://shop.test/", "waitUntil": "domcontentloaded" })
    );
}

#[test]
fn locator_requests_wire_format() {
    let request = BrowserRequest::WaitForVisible {
        locator: Locator::new("#cart_info_table"),
        timeout_ms: 5000,
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "cmd": "wait_for_visible",
            "locator": [{ "selector": "#cart_info_table" }],
            "timeoutMs": 5000
        })
    );

    let select = BrowserRequest::SelectOption {
        locator: Locator::new("select[data-qa='country']"),
        option: SelectBy::Label("India".into()),
    };
    assert_eq!(
        serde_json::to_value(&select).unwrap()["option"],
        json!({ "label": "India" })
    );
}

#[test]
fn unit_requests_wire_format() {
    assert_eq!(
        serde_json::to_value(BrowserRequest::TakeEvents).unwrap(),
        json!({ "cmd": "take_events" })
    );
    assert_eq!(
        serde_json::to_value(BrowserRequest::DialogPolicy {
            policy: DialogPolicy::Dismiss
        })
        .unwrap(),
        json!({ "cmd": "dialog_policy", "policy": "dismiss" })
    );
    assert_eq!(
        serde_json::to_value(WaitUntil::NetworkIdle).unwrap(),
        json!("networkidle")
    );
}

#[test]
fn response_parsing() {
    let ready: BrowserResponse = serde_json::from_str(r#"{"ok":true,"ready":true}"#).unwrap();
    assert!(ready.ok);
    assert_eq!(ready.ready, Some(true));

    let timeout: BrowserResponse =
        serde_json::from_str(r#"{"ok":false,"error":"Timeout 5000ms exceeded","timeout":true}"#)
            .unwrap();
    assert!(!timeout.ok);
    assert_eq!(timeout.timeout, Some(true));
    assert!(timeout.value.is_none());
}

#[test]
fn launch_options_defaults() {
    let options = LaunchOptions::default();
    assert!(!options.headless);
    assert!(options.maximized);
    assert!(options.accept_downloads);
    assert_eq!(options.default_timeout_ms, 30_000);
}

// ============================================================================
// Page events / cookies
// ============================================================================

#[test]
fn page_events_parse_from_server_json() {
    let events: Vec<PageEvent> = serde_json::from_value(json!([
        { "kind": "request", "method": "GET", "resourceType": "image", "url": "a.png" },
        { "kind": "response", "url": "https://shop.test/", "status": 200,
          "headers": { "x-frame-options": "SAMEORIGIN" } },
        { "kind": "request_failed", "url": "b.js", "resourceType": "script" },
        { "kind": "dialog", "dialogType": "alert", "message": "hi" }
    ]))
    .unwrap();

    assert_eq!(events.len(), 4);
    let mut headers = HashMap::new();
    headers.insert("x-frame-options".to_string(), "SAMEORIGIN".to_string());
    assert_eq!(
        events[1],
        PageEvent::Response {
            url: "https://shop.test/".into(),
            status: 200,
            resource_type: String::new(),
            headers,
        }
    );
    assert!(matches!(&events[2], PageEvent::RequestFailed { failure: None, .. }));
}

#[test]
fn cookies_parse_playwright_shape() {
    let cookie: Cookie = serde_json::from_value(json!({
        "name": "csrftoken",
        "domain": "shop.test",
        "path": "/",
        "secure": true,
        "httpOnly": false,
        "sameSite": "Lax"
    }))
    .unwrap();
    assert!(cookie.secure);
    assert!(!cookie.http_only);
    assert_eq!(cookie.same_site.as_deref(), Some("Lax"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn timeout_errors_are_recognised() {
    let timeout = BrowserError::Timeout {
        command: "click".into(),
        error: "waiting for locator".into(),
    };
    assert!(timeout.is_timeout());
    assert_eq!(
        timeout.to_string(),
        "Browser command 'click' timed out: waiting for locator"
    );

    let protocol = BrowserError::SessionProtocol {
        command: "click".into(),
        error: "detached".into(),
    };
    assert!(!protocol.is_timeout());
}
