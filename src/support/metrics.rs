use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::browser::driver::{Driver, PageEvent};
use crate::error::BrowserError;

pub const MAX_PAGE_LOAD_MS: u128 = 20_000;
pub const MAX_SEARCH_RESPONSE_MS: u128 = 8_000;
pub const MAX_ACTION_RESPONSE_MS: u128 = 30_000;
pub const MAX_LOGIN_RESPONSE_MS: u128 = 10_000;
pub const MAX_REQUEST_COUNT: usize = 300;
pub const MAX_PAGE_SIZE_MB: f64 = 15.0;
pub const MAX_DOM_NODES: u64 = 10_000;
pub const MAX_DOM_DEPTH: u64 = 30;
pub const MAX_JS_HEAP_MB: f64 = 150.0;
pub const MAX_FAILED_REQUESTS: usize = 30;
pub const MAX_RESOURCE_ELEMENTS: u64 = 500;
pub const LARGE_IMAGE_BYTES: u64 = 500 * 1024;

/// `performance.timing` marks relative to navigation start, when available.
pub const NAVIGATION_TIMING_SCRIPT: &str = r#"() => {
    const t = performance.timing;
    if (!t || !t.navigationStart) return null;
    const rel = (v) => (v ? v - t.navigationStart : null);
    return {
        ttfb: rel(t.responseStart),
        domContentLoaded: rel(t.domContentLoadedEventEnd),
        load: rel(t.loadEventEnd),
    };
}"#;

/// Element counts and the deepest ancestor chain in the document.
pub const DOM_STATS_SCRIPT: &str = r#"() => {
    const all = document.getElementsByTagName('*');
    const tag = (name) => document.getElementsByTagName(name).length;
    let maxDepth = 0;
    for (const el of all) {
        let depth = 0;
        let node = el;
        while (node.parentElement) {
            depth++;
            node = node.parentElement;
        }
        if (depth > maxDepth) maxDepth = depth;
    }
    return {
        total: all.length,
        divs: tag('div'),
        images: tag('img'),
        scripts: tag('script'),
        links: tag('a'),
        inputs: tag('input'),
        stylesheets: document.querySelectorAll("link[rel='stylesheet']").length,
        depth: maxDepth,
    };
}"#;

/// Chromium's non-standard `performance.memory`, or null elsewhere.
pub const HEAP_SCRIPT: &str = r#"() => {
    if (!performance.memory) return null;
    return {
        used: performance.memory.usedJSHeapSize || 0,
        total: performance.memory.totalJSHeapSize || 0,
        limit: performance.memory.jsHeapSizeLimit || 0,
    };
}"#;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTiming {
    pub ttfb: Option<f64>,
    pub dom_content_loaded: Option<f64>,
    pub load: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DomStats {
    pub total: u64,
    pub divs: u64,
    pub images: u64,
    pub scripts: u64,
    pub links: u64,
    pub inputs: u64,
    pub stylesheets: u64,
    pub depth: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeapUsage {
    pub used: f64,
    pub total: f64,
    pub limit: f64,
}

impl HeapUsage {
    pub fn used_mb(&self) -> f64 {
        bytes_to_mb(self.used)
    }

    /// Used share of the allocated heap, 0 when nothing is allocated.
    pub fn usage_percent(&self) -> f64 {
        if self.total > 0.0 {
            self.used / self.total * 100.0
        } else {
            0.0
        }
    }
}

pub fn bytes_to_mb(bytes: f64) -> f64 {
    bytes / 1024.0 / 1024.0
}

/// Network activity folded out of a batch of page events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkSummary {
    pub requests: usize,
    pub by_type: BTreeMap<String, usize>,
    /// Sum of `content-length` over responses that declared one.
    pub total_bytes: u64,
    /// "url - reason" per failed request.
    pub failures: Vec<String>,
    /// (url, declared size) per image response; size 0 when undeclared.
    pub images: Vec<(String, u64)>,
    pub dialogs: Vec<String>,
}

impl NetworkSummary {
    pub fn from_events(events: &[PageEvent]) -> Self {
        let mut summary = NetworkSummary::default();
        for event in events {
            match event {
                PageEvent::Request { resource_type, .. } => {
                    summary.requests += 1;
                    *summary.by_type.entry(resource_type.clone()).or_default() += 1;
                }
                PageEvent::Response {
                    url,
                    resource_type,
                    headers,
                    ..
                } => {
                    let size = content_length(headers);
                    summary.total_bytes += size.unwrap_or(0);
                    if resource_type == "image" {
                        summary.images.push((url.clone(), size.unwrap_or(0)));
                    }
                }
                PageEvent::RequestFailed { url, failure, .. } => {
                    let reason = failure.as_deref().unwrap_or("Unknown failure");
                    summary.failures.push(format!("{} - {}", url, reason));
                }
                PageEvent::Dialog { message, .. } => summary.dialogs.push(message.clone()),
            }
        }
        summary
    }

    pub fn count_of(&self, resource_type: &str) -> usize {
        self.by_type.get(resource_type).copied().unwrap_or(0)
    }

    pub fn total_mb(&self) -> f64 {
        bytes_to_mb(self.total_bytes as f64)
    }

    pub fn image_mb(&self) -> f64 {
        bytes_to_mb(self.images.iter().map(|(_, size)| *size).sum::<u64>() as f64)
    }

    pub fn large_images(&self) -> impl Iterator<Item = &(String, u64)> {
        self.images
            .iter()
            .filter(|(_, size)| *size > LARGE_IMAGE_BYTES)
    }
}

/// Run one of the scripts above and decode its result; `None` when the
/// script returned null.
pub fn evaluate_as<T: DeserializeOwned>(
    driver: &dyn Driver,
    script: &str,
) -> Result<Option<T>, BrowserError> {
    let value = driver.evaluate(script)?;
    serde_json::from_value(value).map_err(|e| BrowserError::JsonParse {
        context: "page metrics".into(),
        source: e,
    })
}

fn content_length(headers: &HashMap<String, String>) -> Option<u64> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
}
