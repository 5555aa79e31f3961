use std::sync::Arc;
use std::time::Instant;

use crate::browser::driver::Launcher;
use crate::browser::session::PlaywrightLauncher;
use crate::cli::config::{AppConfig, RunOverrides, build_session_config, resolve_launcher_paths};
use crate::harness::runner::SuiteRunner;
use crate::harness::scenario::{self, Category, Scenario};
use crate::harness::session::SessionConfig;
use crate::report::console::format_console_report;
use crate::report::html::generate_html_report;
use crate::report::junit::generate_junit_xml;
use crate::report::report_model::TestSuiteReport;
use crate::scenarios;
use crate::trace::logger::TraceLogger;

pub const SUITE_NAME: &str = "storefront-e2e";

/// Options of the `run` subcommand after parsing.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub category: Option<String>,
    pub filter: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub trace: Option<String>,
    pub overrides: RunOverrides,
}

// ============================================================================
// run subcommand
// ============================================================================

/// Run the selected scenarios and return whether none failed.
pub fn cmd_run(
    args: &RunArgs,
    config: &AppConfig,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let selected = select_scenarios(args.category.as_deref(), args.filter.as_deref())?;

    if selected.is_empty() {
        eprintln!("No scenarios match the given category/filter");
        return Ok(true);
    }

    if verbose > 0 {
        eprintln!("Running {} scenarios...", selected.len());
    }

    let session_config = build_session_config(config, &args.overrides);
    let (node, script) = resolve_launcher_paths(config, &args.overrides);
    let launcher = PlaywrightLauncher::new(node, script);

    let tracer = match args.trace.as_deref().or(config.run.trace.as_deref()) {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let report = run_scenarios(&launcher, session_config, Arc::new(tracer), &selected);
    let all_passed = report.all_passed();

    let format = args.format.as_deref().unwrap_or(&config.run.format);
    let output_content = render_report(&report, format);

    // Write or print
    match args.output.as_deref().or(config.run.output.as_deref()) {
        Some(path) => {
            std::fs::write(path, &output_content)?;
            if verbose > 0 {
                eprintln!("Report written to {}", path);
            }
        }
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

/// Run `scenarios` serially, one fresh browser session each.
pub fn run_scenarios(
    launcher: &dyn Launcher,
    config: SessionConfig,
    tracer: Arc<TraceLogger>,
    scenarios: &[Scenario],
) -> TestSuiteReport {
    let start = Instant::now();
    let runner = SuiteRunner::new(launcher, config, tracer);
    let results = runner.run(scenarios);
    let duration = start.elapsed().as_millis();

    TestSuiteReport::from_results(SUITE_NAME, results).with_duration(duration)
}

/// Render a report as `console`, `html` or `junit`. Unknown formats fall
/// back to console output.
pub fn render_report(report: &TestSuiteReport, format: &str) -> String {
    match format {
        "html" => generate_html_report(report),
        "junit" => generate_junit_xml(report),
        other => {
            if other != "console" {
                tracing::warn!(format = other, "unknown report format, using console");
            }
            format_console_report(report)
        }
    }
}

// ============================================================================
// list subcommand
// ============================================================================

pub fn cmd_list(
    category: Option<&str>,
    filter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let selected = select_scenarios(category, filter)?;
    for line in selected.iter().map(describe_scenario) {
        println!("{}", line);
    }
    println!("{} scenarios", selected.len());
    Ok(())
}

/// "TC40_Login_ResponseTime_ShouldBeFast [Performance, ResponseTime] (ignored: ...)"
pub fn describe_scenario(s: &Scenario) -> String {
    let tags: Vec<&str> = s.categories.iter().map(|c| c.as_str()).collect();
    let mut line = format!("{} [{}]", s.full_name(), tags.join(", "));
    if let Some(reason) = s.ignore {
        line.push_str(&format!(" (ignored: {})", reason));
    }
    line
}

// ============================================================================
// Helpers
// ============================================================================

/// Registered scenarios narrowed by category and name filter.
pub fn select_scenarios(
    category: Option<&str>,
    filter: Option<&str>,
) -> Result<Vec<Scenario>, Box<dyn std::error::Error>> {
    let category = match category {
        Some(name) => Some(
            Category::parse(name).ok_or_else(|| format!("unknown category: {}", name))?,
        ),
        None => None,
    };
    Ok(scenario::select(scenarios::all(), category, filter))
}
