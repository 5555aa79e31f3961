use std::fmt::Write as _;

use crate::harness::runner::{TestResult, TestStatus};
use crate::report::report_model::TestSuiteReport;

const PASS_COLOR: &str = "#4CAF50";
const FAIL_COLOR: &str = "#f44336";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #222; }
header { color: #fff; padding: 18px 28px; }
header h1 { margin: 0 0 6px 0; font-size: 22px; }
header p { margin: 0; opacity: 0.9; }
main { max-width: 960px; margin: 16px auto; padding: 0 16px; }
.test-case { background: #fff; border-left: 4px solid #bbb; border-radius: 4px; padding: 12px 18px; margin-bottom: 10px; }
.test-case.pass { border-left-color: #4CAF50; }
.test-case.fail { border-left-color: #f44336; }
.test-case.skip { border-left-color: #FF9800; }
.test-case h3 { margin: 0 0 4px 0; font-size: 15px; }
.tags { font-size: 12px; color: #888; margin: 0 0 6px 0; }
.meta { font-size: 13px; color: #555; margin: 0; }
.error { color: #c62828; font-weight: 600; }
.skip .error { color: #E65100; font-weight: normal; }
.failures { margin: 6px 0 0 0; padding-left: 18px; font-size: 13px; color: #c62828; }
.attachment { font-size: 13px; margin: 4px 0 0 0; }
"#;

/// Storefront run as one standalone HTML page: a coloured outcome banner,
/// then a card per scenario with tags, failed assertions and any failure
/// screenshots linked by path.
pub fn generate_html_report(report: &TestSuiteReport) -> String {
    let (color, headline) = if report.all_passed() {
        (PASS_COLOR, "ALL TESTS PASSED")
    } else {
        (FAIL_COLOR, "SOME TESTS FAILED")
    };

    let duration = report
        .duration_ms
        .map(|ms| format!(" in {:.1}s", ms as f64 / 1000.0))
        .unwrap_or_default();
    let suite = escape_html(&report.suite_name);

    let mut body = String::new();
    for result in &report.test_results {
        render_case(&mut body, result);
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>{suite}: Test Report</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header style=\"background: {color}\">\n<h1>{headline}</h1>\n\
         <p>{suite}: {} passed, {} failed, {} skipped ({} total){duration}</p>\n</header>\n\
         <main>\n{body}</main>\n</body>\n</html>\n",
        report.passed, report.failed, report.skipped, report.total,
    )
}

fn render_case(out: &mut String, result: &TestResult) {
    let (class, marker) = match result.status {
        TestStatus::Passed => ("pass", "\u{2713}"),
        TestStatus::Failed => ("fail", "\u{2717}"),
        TestStatus::Skipped => ("skip", "-"),
    };

    let _ = writeln!(out, "<section class=\"test-case {class}\">");
    let _ = writeln!(out, "<h3>{marker} {}</h3>", escape_html(&result.name));
    let _ = writeln!(
        out,
        "<p class=\"tags\">{}</p>",
        escape_html(&result.categories.join(", "))
    );
    let _ = writeln!(
        out,
        "<p class=\"meta\">{} steps, {} assertions, {:.1}s</p>",
        result.steps_run,
        result.assertion_results.len(),
        result.duration_ms as f64 / 1000.0
    );

    if let Some(error) = &result.error {
        let label = if result.skipped() { "Skipped" } else { "Error" };
        let _ = writeln!(out, "<p class=\"error\">{label}: {}</p>", escape_html(error));
    }

    let mut failed = result.assertion_results.iter().filter(|a| !a.passed).peekable();
    if failed.peek().is_some() {
        out.push_str("<ul class=\"failures\">\n");
        for assertion in failed {
            let _ = writeln!(
                out,
                "<li>Step {}: {}: {}</li>",
                assertion.step_index,
                assertion.kind.as_str(),
                escape_html(&assertion.message)
            );
        }
        out.push_str("</ul>\n");
    }

    for attachment in &result.attachments {
        let path = escape_html(&attachment.path.display().to_string());
        let _ = writeln!(
            out,
            "<p class=\"attachment\"><a href=\"{path}\">{}</a> ({path})</p>",
            escape_html(&attachment.description)
        );
    }

    out.push_str("</section>\n");
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
