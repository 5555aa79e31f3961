use crate::harness::runner::{TestResult, TestStatus};
use crate::report::report_model::TestSuiteReport;

const CLASSNAME: &str = "storefront-e2e";

// ============================================================================
// JUnit XML reporter: standard CI integration format
// ============================================================================

/// Generate a JUnit XML report for CI systems.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuite name="..." tests="3" failures="1" skipped="1" time="1.234">
///   <testcase name="TC01_..." classname="storefront-e2e.Login" time="4.200" />
///   <testcase name="TC02_..." classname="storefront-e2e.Login" time="3.100">
///     <failure message="1 assertion(s) failed" type="AssertionFailure">Step 1: ...</failure>
///   </testcase>
///   <testcase name="TC40_..." classname="storefront-e2e.Performance" time="0.000">
///     <skipped message="..." />
///   </testcase>
/// </testsuite>
/// ```
pub fn generate_junit_xml(report: &TestSuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let mut cases = String::new();
    for result in &report.test_results {
        let open = format!(
            "  <testcase name=\"{name}\" classname=\"{class}\" time=\"{time:.3}\"",
            name = escape_xml(&result.name),
            class = escape_xml(&classname(result)),
            time = result.duration_ms as f64 / 1000.0,
        );

        match result.status {
            TestStatus::Passed => {
                cases.push_str(&open);
                cases.push_str(" />\n");
            }
            TestStatus::Skipped => {
                let reason = result.error.as_deref().unwrap_or("ignored");
                cases.push_str(&format!(
                    "{open}>\n    <skipped message=\"{reason}\" />\n  </testcase>\n",
                    open = open,
                    reason = escape_xml(reason),
                ));
            }
            TestStatus::Failed => {
                let (message, kind, body) = failure_details(result);
                cases.push_str(&format!(
                    "{open}>\n    <failure message=\"{message}\" type=\"{kind}\">{body}</failure>\n  </testcase>\n",
                    open = open,
                    message = escape_xml(&message),
                    kind = kind,
                    body = escape_xml(&body),
                ));
            }
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\" skipped=\"{skipped}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        skipped = report.skipped,
        time = time_attr,
        cases = cases,
    )
}

/// First category names the class so CI groups scenarios by feature area.
fn classname(result: &TestResult) -> String {
    match result.categories.first() {
        Some(category) => format!("{}.{}", CLASSNAME, category),
        None => CLASSNAME.to_string(),
    }
}

fn failure_details(result: &TestResult) -> (String, &'static str, String) {
    let mut lines: Vec<String> = result
        .assertion_results
        .iter()
        .filter(|ar| !ar.passed)
        .map(|ar| format!("Step {}: {}", ar.step_index, ar.message))
        .collect();
    let failed_assertions = lines.len();

    if let Some(ref error) = result.error {
        lines.push(format!("Error: {}", error));
    }
    for attachment in &result.attachments {
        lines.push(format!("Screenshot: {}", attachment.path.display()));
    }

    if failed_assertions > 0 {
        (
            format!("{} assertion(s) failed", failed_assertions),
            "AssertionFailure",
            lines.join("\n"),
        )
    } else {
        ("execution error".to_string(), "ExecutionError", lines.join("\n"))
    }
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
