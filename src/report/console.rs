use crate::harness::runner::{TestResult, TestStatus};
use crate::report::report_model::TestSuiteReport;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a suite report for the terminal.
///
/// ```text
/// === Test Suite: storefront ===
///
/// ✓ PASS  TC01_ValidLogin_... [Login, Smoke] (3 steps, 4 assertions, 12.3s)
/// ✗ FAIL  TC02_InvalidLogin_... [Login, Negative] (2 steps, 1 assertions, 8.1s)
///     [FAIL] Step 1: IsTrue: Error message should be displayed
///     [SCREENSHOT] screenshots/FAILED_TC02_..._20240101_120000.png
/// - SKIP  TC40_Login_ResponseTime_ShouldBeFast [Performance, ResponseTime]
///     [REASON] login response time is unstable
///
/// === Results: 1 passed, 1 failed, 1 skipped (3 total) in 20.4s ===
/// ```
pub fn format_console_report(report: &TestSuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Test Suite: {} ===\n\n", report.suite_name));

    for result in &report.test_results {
        match result.status {
            TestStatus::Skipped => {
                out.push_str(&format!(
                    "- SKIP  {}{}\n",
                    result.name,
                    format_categories(result)
                ));
                if let Some(ref reason) = result.error {
                    out.push_str(&format!("    [REASON] {}\n", reason));
                }
                continue;
            }
            TestStatus::Passed | TestStatus::Failed => {}
        }

        let marker = if result.passed() {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };
        out.push_str(&format!(
            "{}  {}{} ({} steps, {} assertions, {:.1}s)\n",
            marker,
            result.name,
            format_categories(result),
            result.steps_run,
            result.assertion_results.len(),
            result.duration_ms as f64 / 1000.0
        ));

        if result.passed() {
            continue;
        }

        for ar in result.assertion_results.iter().filter(|ar| !ar.passed) {
            out.push_str(&format!(
                "    [FAIL] Step {}: {}: {}\n",
                ar.step_index,
                ar.kind.as_str(),
                ar.message
            ));
            if let (Some(expected), Some(actual)) = (&ar.expected, &ar.actual) {
                out.push_str(&format!(
                    "           expected {}, actual {}\n",
                    expected, actual
                ));
            }
        }

        // Browser and setup errors; assertion errors are already listed above
        if let Some(ref error) = result.error {
            if !result.assertion_results.iter().any(|ar| !ar.passed) {
                out.push_str(&format!("    [ERROR] {}\n", error));
            }
        }

        for attachment in &result.attachments {
            out.push_str(&format!(
                "    [SCREENSHOT] {}\n",
                attachment.path.display()
            ));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed",
        report.passed, report.failed
    ));
    if report.skipped > 0 {
        out.push_str(&format!(", {} skipped", report.skipped));
    }
    out.push_str(&format!(" ({} total)", report.total));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {:.1}s", ms as f64 / 1000.0));
    }

    out.push_str(" ===\n");

    out
}

fn format_categories(result: &TestResult) -> String {
    if result.categories.is_empty() {
        String::new()
    } else {
        format!(" [{}]", result.categories.join(", "))
    }
}
