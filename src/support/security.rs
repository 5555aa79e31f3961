use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::browser::driver::{Cookie, PageEvent};

/// Response headers counted by the header check.
pub const SECURITY_HEADERS: [&str; 5] = [
    "x-frame-options",
    "x-content-type-options",
    "x-xss-protection",
    "strict-transport-security",
    "content-security-policy",
];

pub const XSS_PAYLOADS: [&str; 4] = [
    "<script>alert('XSS')</script>",
    "<img src=x onerror=alert('XSS')>",
    "javascript:alert('XSS')",
    "<svg/onload=alert('XSS')>",
];

pub const SQL_PAYLOADS: [&str; 5] = [
    "' OR '1'='1",
    "admin'--",
    "' OR '1'='1' --",
    "'; DROP TABLE users--",
    "1' UNION SELECT NULL--",
];

/// Words whose presence after a SQL payload hints at a leaked database error.
pub const SQL_ERROR_MARKERS: [&str; 4] = ["sql", "mysql", "syntax error", "database"];

pub const SESSION_COOKIE_MARKERS: [&str; 5] = ["session", "sess", "phpsessid", "jsessionid", "auth"];

/// Words an error page should not contain.
pub const ERROR_DISCLOSURE_KEYWORDS: [&str; 10] = [
    "stack trace",
    "exception",
    "sql",
    "database",
    "server error",
    "php warning",
    "php notice",
    "undefined index",
    "mysql",
    "postgresql",
];

/// Matched against lowercased URLs.
pub const SENSITIVE_URL_PATTERNS: [&str; 9] = [
    r"password=",
    r"pwd=",
    r"pass=",
    r"credit.*card",
    r"ssn=",
    r"social.*security",
    r"api.*key",
    r"secret",
    r"token=.*[a-z0-9]{20,}",
];

static SENSITIVE_URL_REGEXES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SENSITIVE_URL_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok().map(|re| (*p, re)))
        .collect()
});

/// Patterns from `SENSITIVE_URL_PATTERNS` that match `url`.
pub fn sensitive_url_matches(url: &str) -> Vec<&'static str> {
    let url = url.to_lowercase();
    SENSITIVE_URL_REGEXES
        .iter()
        .filter(|(_, re)| re.is_match(&url))
        .map(|(pattern, _)| *pattern)
        .collect()
}

/// Which of `SECURITY_HEADERS` are present, by lowercase name.
pub fn security_header_presence(headers: &HashMap<String, String>) -> Vec<(&'static str, bool)> {
    SECURITY_HEADERS
        .iter()
        .map(|wanted| {
            let present = headers.keys().any(|k| k.eq_ignore_ascii_case(wanted));
            (*wanted, present)
        })
        .collect()
}

/// The last successful response whose URL contains `host`.
pub fn last_ok_response<'e>(
    events: &'e [PageEvent],
    host: &str,
) -> Option<&'e HashMap<String, String>> {
    events.iter().rev().find_map(|event| match event {
        PageEvent::Response {
            url,
            status: 200,
            headers,
            ..
        } if url.contains(host) => Some(headers),
        _ => None,
    })
}

pub fn is_session_cookie(cookie: &Cookie) -> bool {
    let name = cookie.name.to_lowercase();
    SESSION_COOKIE_MARKERS.iter().any(|m| name.contains(m))
}

/// Keywords from `list` that occur in `content`, case-insensitively.
pub fn keywords_in<'k>(content: &str, list: &[&'k str]) -> Vec<&'k str> {
    let content = content.to_lowercase();
    list.iter().copied().filter(|k| content.contains(k)).collect()
}

/// Whether `payload` came back verbatim with no HTML escaping anywhere on
/// the page.
pub fn is_reflected_unescaped(content: &str, payload: &str) -> bool {
    content.contains(payload) && !content.contains("&lt;") && !content.contains("&gt;")
}

/// Host part of a URL, without scheme, port or path.
pub fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let end = rest.find(['/', ':', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}
