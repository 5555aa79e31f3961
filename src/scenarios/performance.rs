use std::time::{Duration, Instant};

use crate::browser::driver::WaitUntil;
use crate::browser::locator::Locator;
use crate::error::ScenarioError;
use crate::harness::scenario::{Category, FixtureKind, Scenario};
use crate::harness::session::TestSession;
use crate::support::fixtures::DEFAULT_PASSWORD;
use crate::support::metrics::{
    self, DomStats, HeapUsage, NavigationTiming, NetworkSummary, MAX_ACTION_RESPONSE_MS,
    MAX_DOM_DEPTH, MAX_DOM_NODES, MAX_FAILED_REQUESTS, MAX_JS_HEAP_MB, MAX_LOGIN_RESPONSE_MS,
    MAX_PAGE_LOAD_MS, MAX_PAGE_SIZE_MB, MAX_REQUEST_COUNT, MAX_RESOURCE_ELEMENTS,
    MAX_SEARCH_RESPONSE_MS,
};

const WAIT_5S: Duration = Duration::from_millis(5_000);

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "TC36",
            name: "HomePage_PageLoadTime_ShouldBeOptimal",
            categories: &[Category::Performance, Category::PageLoad],
            fixture: FixtureKind::Base,
            ignore: None,
            body: home_page_load_time,
        },
        Scenario {
            id: "TC37",
            name: "ProductsPage_ShouldLoadQuickly",
            categories: &[Category::Performance, Category::PageLoad],
            fixture: FixtureKind::Base,
            ignore: None,
            body: products_page_load_time,
        },
        Scenario {
            id: "TC38",
            name: "NetworkRequests_ShouldBeOptimized",
            categories: &[Category::Performance, Category::Network],
            fixture: FixtureKind::Base,
            ignore: None,
            body: network_requests_optimized,
        },
        Scenario {
            id: "TC39",
            name: "NetworkRequests_ShouldHaveMinimalFailures",
            categories: &[Category::Performance, Category::Network],
            fixture: FixtureKind::Base,
            ignore: None,
            body: network_failures,
        },
        Scenario {
            id: "TC40",
            name: "Login_ResponseTime_ShouldBeFast",
            categories: &[Category::Performance, Category::ResponseTime],
            fixture: FixtureKind::Base,
            ignore: Some(
                "Login response time is unstable (10-30+ s) on the demo server; kept for documentation",
            ),
            body: login_response_time,
        },
        Scenario {
            id: "TC41",
            name: "Search_ResponseTime_ShouldBeFast",
            categories: &[Category::Performance, Category::ResponseTime],
            fixture: FixtureKind::Base,
            ignore: None,
            body: search_response_time,
        },
        Scenario {
            id: "TC42",
            name: "AddToCart_ResponseTime_ShouldBeFast",
            categories: &[Category::Performance, Category::ResponseTime],
            fixture: FixtureKind::Base,
            ignore: None,
            body: add_to_cart_response_time,
        },
        Scenario {
            id: "TC43",
            name: "DOMComplexity_ShouldBeOptimal",
            categories: &[Category::Performance, Category::ResourceMetrics],
            fixture: FixtureKind::Base,
            ignore: None,
            body: dom_complexity,
        },
        Scenario {
            id: "TC44",
            name: "MemoryUsage_ShouldBeOptimal",
            categories: &[Category::Performance, Category::ResourceMetrics],
            fixture: FixtureKind::Base,
            ignore: None,
            body: memory_usage,
        },
        Scenario {
            id: "TC45",
            name: "Images_ShouldBeOptimized",
            categories: &[Category::Performance, Category::Optimization],
            fixture: FixtureKind::Base,
            ignore: None,
            body: images_optimized,
        },
    ]
}

/// Drop events buffered by setup, load `path`, wait for network idle and
/// return what the page did meanwhile.
fn record_load(
    t: &TestSession,
    path: &str,
    timeout: Option<Duration>,
) -> Result<NetworkSummary, ScenarioError> {
    let driver = t.driver();
    driver.take_events()?;
    driver.navigate(&t.config().url(path), WaitUntil::Load, timeout)?;
    driver.wait_for_load_state(WaitUntil::NetworkIdle, timeout)?;
    Ok(NetworkSummary::from_events(&driver.take_events()?))
}

fn home_page_load_time(t: &TestSession) -> Result<(), ScenarioError> {
    t.step("Load the home page");
    let start = Instant::now();
    t.driver().navigate(
        &t.config().url(""),
        WaitUntil::Load,
        Some(Duration::from_secs(30)),
    )?;
    let elapsed = start.elapsed().as_millis();
    tracing::info!(elapsed_ms = elapsed, "home page loaded");

    match metrics::evaluate_as::<NavigationTiming>(t.driver(), metrics::NAVIGATION_TIMING_SCRIPT) {
        Ok(Some(timing)) => tracing::info!(
            ttfb = ?timing.ttfb,
            dom_content_loaded = ?timing.dom_content_loaded,
            load = ?timing.load,
            "navigation timing"
        ),
        Ok(None) => tracing::info!("navigation timing unavailable"),
        Err(e) => tracing::warn!(error = %e, "could not read navigation timing"),
    }

    t.assert_lt(
        elapsed,
        MAX_PAGE_LOAD_MS,
        &format!(
            "Page load time {}ms exceeds threshold {}ms",
            elapsed, MAX_PAGE_LOAD_MS
        ),
    )
}

fn products_page_load_time(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    t.step("Load the products page");
    let start = Instant::now();
    t.driver()
        .navigate(&t.config().url("/products"), WaitUntil::Load, None)?;
    pages.products.wait_for_products(WAIT_5S)?;
    let elapsed = start.elapsed().as_millis();

    let count = pages.products.products_count()?;
    tracing::info!(elapsed_ms = elapsed, products = count, "products page loaded");
    t.assert_lt(
        elapsed,
        MAX_PAGE_LOAD_MS,
        &format!("Products page load time {}ms exceeds threshold", elapsed),
    )?;
    t.assert_gt(count, 0, "No products loaded on page")
}

fn network_requests_optimized(t: &TestSession) -> Result<(), ScenarioError> {
    t.step("Record network activity of the home page");
    let summary = record_load(t, "", None)?;
    let total_mb = summary.total_mb();
    tracing::info!(
        requests = summary.requests,
        images = summary.count_of("image"),
        scripts = summary.count_of("script"),
        stylesheets = summary.count_of("stylesheet"),
        total_mb = %format!("{:.2}", total_mb),
        "network summary"
    );

    t.assert_lt(
        summary.requests,
        MAX_REQUEST_COUNT,
        &format!(
            "Too many requests: {} (max: {})",
            summary.requests, MAX_REQUEST_COUNT
        ),
    )?;
    t.assert_lt(
        total_mb,
        MAX_PAGE_SIZE_MB,
        &format!(
            "Page size too large: {:.2}MB (max: {}MB)",
            total_mb, MAX_PAGE_SIZE_MB
        ),
    )
}

fn network_failures(t: &TestSession) -> Result<(), ScenarioError> {
    t.step("Record failed requests of the home page");
    let summary = record_load(t, "", Some(Duration::from_secs(90)))?;
    for failure in summary.failures.iter().take(10) {
        tracing::info!("  failed: {}", failure);
    }
    if summary.failures.len() > 10 {
        tracing::info!("  ... and {} more", summary.failures.len() - 10);
    }

    t.assert_le(
        summary.failures.len(),
        MAX_FAILED_REQUESTS,
        &format!(
            "Too many failed requests: {} (max: {})",
            summary.failures.len(),
            MAX_FAILED_REQUESTS
        ),
    )
}

fn login_response_time(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    pages.login.open()?;
    t.wait(1000);
    pages.login.enter_login_email("test12345@mailinator.com")?;
    pages.login.enter_login_password(DEFAULT_PASSWORD)?;

    t.step("Submit the login form");
    let start = Instant::now();
    pages.login.click_login()?;
    if !pages.login.wait_for_login_outcome(Duration::from_secs(10)) {
        t.driver()
            .wait_for_load_state(WaitUntil::NetworkIdle, Some(Duration::from_secs(10)))?;
    }
    let elapsed = start.elapsed().as_millis();

    let outcome = if pages.home.is_logout_visible() {
        "logged in"
    } else if pages.login.is_login_error_displayed() {
        "credentials rejected"
    } else {
        "no visible outcome"
    };
    tracing::info!(elapsed_ms = elapsed, outcome, "login responded");

    t.assert_lt(
        elapsed,
        MAX_LOGIN_RESPONSE_MS,
        &format!(
            "Login response time {}ms exceeds threshold {}ms",
            elapsed, MAX_LOGIN_RESPONSE_MS
        ),
    )
}

fn search_response_time(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    pages.products.open()?;
    t.wait(1000);

    t.step("Search for 'dress'");
    let start = Instant::now();
    pages.products.submit_search("dress")?;
    pages.products.wait_for_products(WAIT_5S)?;
    let elapsed = start.elapsed().as_millis();

    let results = pages.products.products_count()?;
    tracing::info!(elapsed_ms = elapsed, results, "search responded");
    t.assert_lt(
        elapsed,
        MAX_SEARCH_RESPONSE_MS,
        &format!(
            "Search response time {}ms exceeds threshold {}ms",
            elapsed, MAX_SEARCH_RESPONSE_MS
        ),
    )?;
    t.assert_gt(results, 0, "Search should return at least one result")
}

fn add_to_cart_response_time(t: &TestSession) -> Result<(), ScenarioError> {
    let pages = t.pages();

    pages.products.open()?;
    t.wait(2000);

    t.step("Add the first product and wait for the modal");
    let start = Instant::now();
    pages.products.add_to_cart(0)?;
    pages.products.wait_for_cart_modal(WAIT_5S)?;
    let elapsed = start.elapsed().as_millis();
    tracing::info!(elapsed_ms = elapsed, "cart modal shown");

    t.assert_true(pages.products.is_cart_modal_visible(), "Cart modal should appear")?;
    t.assert_lt(
        elapsed,
        MAX_ACTION_RESPONSE_MS,
        &format!("Add to cart response time {}ms exceeds threshold", elapsed),
    )
}

fn dom_complexity(t: &TestSession) -> Result<(), ScenarioError> {
    t.step("Measure the home page DOM");
    record_load(t, "", Some(Duration::from_secs(60)))?;
    t.wait(3000);

    let stats = metrics::evaluate_as::<DomStats>(t.driver(), metrics::DOM_STATS_SCRIPT)?
        .unwrap_or_default();
    tracing::info!(?stats, "DOM statistics");

    t.assert_lt(
        stats.total,
        MAX_DOM_NODES,
        &format!(
            "DOM has too many elements: {} (max: {})",
            stats.total, MAX_DOM_NODES
        ),
    )?;
    t.assert_lt(
        stats.depth,
        MAX_DOM_DEPTH,
        &format!("DOM depth too deep: {} (max: {})", stats.depth, MAX_DOM_DEPTH),
    )
}

fn memory_usage(t: &TestSession) -> Result<(), ScenarioError> {
    t.step("Measure JS heap usage on the home page");
    record_load(t, "", Some(Duration::from_secs(30)))?;
    t.wait(2000);

    match metrics::evaluate_as::<HeapUsage>(t.driver(), metrics::HEAP_SCRIPT) {
        Ok(Some(heap)) if heap.used > 0.0 => {
            let used_mb = heap.used_mb();
            tracing::info!(
                used_mb = %format!("{:.2}", used_mb),
                usage_percent = %format!("{:.1}", heap.usage_percent()),
                "JS heap"
            );
            return t.assert_lt(
                used_mb,
                MAX_JS_HEAP_MB,
                &format!(
                    "JS Heap usage too high: {:.2}MB (max: {}MB)",
                    used_mb, MAX_JS_HEAP_MB
                ),
            );
        }
        Ok(_) => tracing::info!("performance.memory unavailable, counting resources instead"),
        Err(e) => tracing::warn!(error = %e, "heap measurement failed, counting resources instead"),
    }

    let stats = metrics::evaluate_as::<DomStats>(t.driver(), metrics::DOM_STATS_SCRIPT)?
        .unwrap_or_default();
    let iframes = t.pages().base.count(&Locator::new("iframe"))? as u64;
    let resources = stats.scripts + stats.images + iframes;
    t.assert_lt(
        resources,
        MAX_RESOURCE_ELEMENTS,
        &format!("Too many resources loaded: {}", resources),
    )
}

fn images_optimized(t: &TestSession) -> Result<(), ScenarioError> {
    t.step("Record image responses of the home page");
    let summary = record_load(t, "", None)?;

    let image_mb = summary.image_mb();
    tracing::info!(
        images = summary.images.len(),
        total_mb = %format!("{:.2}", image_mb),
        "image summary"
    );
    for (url, size) in summary.large_images().take(5) {
        tracing::info!("  large image ({} KB): {}", size / 1024, url);
    }
    if image_mb > 3.0 {
        tracing::warn!("images total more than 3 MB");
    }

    t.assert_gt(summary.images.len(), 0, "Page should have images")
}
