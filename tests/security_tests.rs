use std::collections::HashMap;

use storefront_e2e::browser::driver::{Cookie, PageEvent};
use storefront_e2e::support::security::{
    ERROR_DISCLOSURE_KEYWORDS, SQL_ERROR_MARKERS, host_of, is_reflected_unescaped,
    is_session_cookie, keywords_in, last_ok_response, security_header_presence,
    sensitive_url_matches,
};

fn cookie(name: &str) -> Cookie {
    Cookie {
        name: name.into(),
        domain: "shop.test".into(),
        path: "/".into(),
        secure: true,
        http_only: true,
        same_site: Some("Lax".into()),
    }
}

fn ok_response(url: &str, headers: &[(&str, &str)]) -> PageEvent {
    PageEvent::Response {
        url: url.into(),
        status: 200,
        resource_type: "document".into(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

// ============================================================================
// Sensitive URLs
// ============================================================================

#[test]
fn clean_urls_have_no_sensitive_matches() {
    for url in [
        "https://shop.test/",
        "https://shop.test/products",
        "https://shop.test/view_cart",
        "https://shop.test/product_details/1",
    ] {
        assert!(sensitive_url_matches(url).is_empty(), "{} flagged", url);
    }
}

#[test]
fn credentials_in_query_are_flagged() {
    let matches = sensitive_url_matches("https://shop.test/login?email=a&Password=hunter2");
    assert_eq!(matches, vec!["password="]);
}

#[test]
fn long_tokens_are_flagged_but_short_ones_are_not() {
    assert!(!sensitive_url_matches("https://shop.test/?token=abc123").contains(&"token=.*[a-z0-9]{20,}"));
    assert!(
        sensitive_url_matches("https://shop.test/?token=ABCDEFGHIJ0123456789xyz")
            .contains(&"token=.*[a-z0-9]{20,}")
    );
}

// ============================================================================
// Headers / responses
// ============================================================================

#[test]
fn header_presence_is_case_insensitive() {
    let mut headers = HashMap::new();
    headers.insert("X-Frame-Options".to_string(), "SAMEORIGIN".to_string());
    headers.insert("strict-transport-security".to_string(), "max-age=1".to_string());

    let presence = security_header_presence(&headers);
    assert_eq!(presence.len(), 5);
    let present: Vec<&str> = presence
        .iter()
        .filter(|(_, p)| *p)
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(present, vec!["x-frame-options", "strict-transport-security"]);
}

#[test]
fn last_ok_response_prefers_latest_matching_host() {
    let events = vec![
        ok_response("https://shop.test/", &[("server", "old")]),
        ok_response("https://cdn.other/lib.js", &[("server", "cdn")]),
        PageEvent::Response {
            url: "https://shop.test/missing".into(),
            status: 404,
            resource_type: "document".into(),
            headers: HashMap::new(),
        },
        ok_response("https://shop.test/products", &[("server", "new")]),
    ];
    let headers = last_ok_response(&events, "shop.test").unwrap();
    assert_eq!(headers.get("server").map(String::as_str), Some("new"));
    assert!(last_ok_response(&events, "nowhere.test").is_none());
}

#[test]
fn host_of_strips_scheme_port_and_path() {
    assert_eq!(host_of("https://shop.test/products?x=1"), "shop.test");
    assert_eq!(host_of("http://localhost:8080/"), "localhost");
    assert_eq!(host_of("shop.test"), "shop.test");
}

// ============================================================================
// Cookies / content
// ============================================================================

#[test]
fn session_cookies_by_name() {
    assert!(is_session_cookie(&cookie("PHPSESSID")));
    assert!(is_session_cookie(&cookie("auth_token")));
    assert!(is_session_cookie(&cookie("sessionid")));
    assert!(!is_session_cookie(&cookie("csrftoken")));
}

#[test]
fn keywords_found_case_insensitively() {
    let page = "<h1>Server Error</h1><p>MySQL said: syntax error near '</p>";
    assert_eq!(
        keywords_in(page, &SQL_ERROR_MARKERS),
        vec!["sql", "mysql", "syntax error"]
    );
    assert_eq!(
        keywords_in(page, &ERROR_DISCLOSURE_KEYWORDS),
        vec!["sql", "server error", "mysql"]
    );
    assert!(keywords_in("All good", &ERROR_DISCLOSURE_KEYWORDS).is_empty());
}

#[test]
fn reflection_requires_unescaped_payload() {
    let payload = "<script>alert('XSS')</script>";
    assert!(is_reflected_unescaped(&format!("<div>{}</div>", payload), payload));
    assert!(!is_reflected_unescaped(
        "<div>&lt;script&gt;alert('XSS')&lt;/script&gt;</div>",
        payload
    ));
    assert!(!is_reflected_unescaped("<div>nothing</div>", payload));
}
