use std::sync::Arc;

use clap::Parser;
use storefront_e2e::cli::commands::{describe_scenario, render_report, run_scenarios, select_scenarios};
use storefront_e2e::cli::config::{
    AppConfig, Cli, Commands, RunOverrides, build_session_config, load_config,
    resolve_launcher_paths,
};
use storefront_e2e::harness::runner::TestStatus;
use storefront_e2e::scenarios;
use storefront_e2e::trace::logger::TraceLogger;

use crate::common::fake_driver::FakeLauncher;
use crate::common::utils::fast_session_config;

mod common;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_run_minimal() {
    let cli = Cli::parse_from(["storefront-e2e", "run"]);
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Run {
            category,
            filter,
            format,
            output,
            headless,
            base_url,
            settle_scale,
            ..
        } => {
            assert!(category.is_none());
            assert!(filter.is_none());
            assert!(format.is_none());
            assert!(output.is_none());
            assert!(!headless);
            assert!(base_url.is_none());
            assert!(settle_scale.is_none());
        }
        _ => panic!("Expected Run command"),
    }
}

#[test]
fn cli_parse_run_all_args() {
    let cli = Cli::parse_from([
        "storefront-e2e",
        "-vv",
        "--config",
        "ci.yaml",
        "run",
        "--category",
        "Smoke",
        "--filter",
        "TC0",
        "--format",
        "junit",
        "-o",
        "report.xml",
        "--headless",
        "--base-url",
        "https://staging.shop.test",
        "--settle-scale",
        "0.5",
        "--node",
        "/usr/bin/node",
        "--script",
        "node/browser_server.js",
        "--trace",
        "trace.jsonl",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("ci.yaml"));
    match cli.command {
        Commands::Run {
            category,
            filter,
            format,
            output,
            headless,
            base_url,
            settle_scale,
            node,
            script,
            trace,
        } => {
            assert_eq!(category.as_deref(), Some("Smoke"));
            assert_eq!(filter.as_deref(), Some("TC0"));
            assert_eq!(format.as_deref(), Some("junit"));
            assert_eq!(output.as_deref(), Some("report.xml"));
            assert!(headless);
            assert_eq!(base_url.as_deref(), Some("https://staging.shop.test"));
            assert_eq!(settle_scale, Some(0.5));
            assert_eq!(node.as_deref(), Some("/usr/bin/node"));
            assert_eq!(script.as_deref(), Some("node/browser_server.js"));
            assert_eq!(trace.as_deref(), Some("trace.jsonl"));
        }
        _ => panic!("Expected Run command"),
    }
}

#[test]
fn cli_parse_list() {
    let cli = Cli::parse_from(["storefront-e2e", "list", "--category", "cart"]);
    match cli.command {
        Commands::List { category, filter } => {
            assert_eq!(category.as_deref(), Some("cart"));
            assert!(filter.is_none());
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["storefront-e2e"]).is_err());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn load_config_missing_file_gives_defaults() {
    let config = load_config(Some("/nonexistent/storefront-e2e.yaml"));
    assert_eq!(config.site.base_url, "https://automationexercise.com");
    assert_eq!(config.site.settle_scale, 1.0);
    assert_eq!(config.browser.node, "node");
    assert_eq!(config.browser.script, "node/browser_server.js");
    assert_eq!(config.run.format, "console");
}

#[test]
fn load_config_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront-e2e.yaml");
    std::fs::write(
        &path,
        "site:\n  base_url: https://staging.shop.test\nbrowser:\n  headless: true\nrun:\n  format: html\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.site.base_url, "https://staging.shop.test");
    assert_eq!(config.site.probe_timeout_ms, 5000);
    assert!(config.browser.headless);
    assert_eq!(config.browser.default_timeout_ms, 30_000);
    assert_eq!(config.run.format, "html");
}

#[test]
fn load_config_malformed_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "site: [not, a, map").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.site.base_url, "https://automationexercise.com");
}

#[test]
fn cli_overrides_win_over_config() {
    let mut config = AppConfig::default();
    config.site.base_url = "https://from-config.test".into();
    config.site.settle_scale = 2.0;
    config.browser.slow_mo_ms = 50;

    let overrides = RunOverrides {
        headless: true,
        settle_scale: Some(0.0),
        node: Some("nodejs".into()),
        ..RunOverrides::default()
    };
    let session = build_session_config(&config, &overrides);
    assert!(session.launch.headless);
    assert_eq!(session.launch.slow_mo_ms, 50);
    assert_eq!(session.pages.base_url, "https://from-config.test");
    assert_eq!(session.pages.settle_scale, 0.0);

    let (node, script) = resolve_launcher_paths(&config, &overrides);
    assert_eq!(node, "nodejs");
    assert_eq!(script.to_str(), Some("node/browser_server.js"));
}

#[test]
fn negative_settle_scale_is_clamped() {
    let overrides = RunOverrides {
        settle_scale: Some(-1.0),
        ..RunOverrides::default()
    };
    let session = build_session_config(&AppConfig::default(), &overrides);
    assert_eq!(session.pages.settle_scale, 0.0);
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn select_scenarios_rejects_unknown_category() {
    assert!(select_scenarios(Some("Bogus"), None).is_err());
    assert_eq!(select_scenarios(Some("xss"), None).unwrap().len(), 1);
    assert_eq!(select_scenarios(None, None).unwrap().len(), 55);
}

#[test]
fn describe_scenario_mentions_ignore_reason() {
    let all = scenarios::all();
    let tc40 = all.iter().find(|s| s.id == "TC40").unwrap();
    let line = describe_scenario(tc40);
    assert!(line.starts_with("TC40_"));
    assert!(line.contains("[Performance, ResponseTime]"));
    assert!(line.contains("(ignored: "));

    let tc01 = all.iter().find(|s| s.id == "TC01").unwrap();
    assert!(!describe_scenario(tc01).contains("ignored"));
}

#[test]
fn run_scenarios_builds_timed_report() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = FakeLauncher::failing();
    let selected = select_scenarios(Some("Performance"), Some("ResponseTime")).unwrap();
    assert_eq!(selected.len(), 3);

    let report = run_scenarios(
        &launcher,
        fast_session_config(dir.path()),
        Arc::new(TraceLogger::disabled()),
        &selected,
    );

    assert_eq!(report.suite_name, "storefront-e2e");
    assert_eq!(report.total, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 2);
    assert!(report.duration_ms.is_some());
    assert!(
        report
            .test_results
            .iter()
            .filter(|r| r.status == TestStatus::Failed)
            .all(|r| r.error.as_deref().unwrap().starts_with("Browser launch failed"))
    );
}

#[test]
fn render_report_picks_format() {
    let report = storefront_e2e::report::report_model::TestSuiteReport::from_results(
        "storefront-e2e",
        Vec::new(),
    );
    assert!(render_report(&report, "html").starts_with("<!DOCTYPE html>"));
    assert!(render_report(&report, "junit").starts_with("<?xml"));
    assert!(render_report(&report, "console").starts_with("=== Test Suite"));
    assert!(render_report(&report, "pdf").starts_with("=== Test Suite"));
}
