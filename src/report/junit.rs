use crate::model::report::Report;
use crate::model::status::{EventType, Status};
use crate::model::test_case::TestCase;

// ============================================================================
// JUnit XML reporter: standard CI integration format
// ============================================================================

/// Generate a JUnit XML report for CI systems (Jenkins, GitHub Actions, GitLab CI).
///
/// One `<testsuite>` per suite:
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuites name="..." tests="3" failures="1" errors="0" skipped="1" time="1.234">
///   <testsuite name="Login" tests="3" failures="1" errors="0" skipped="1" time="0.900">
///     <testcase name="valid user" classname="Login" time="0.120" />
///     <testcase name="locked user" classname="Login" time="0.300">
///       <failure message="Fail" type="Fail">navigate: Fail</failure>
///     </testcase>
///     <testcase name="sso" classname="Login" time="0.000"><skipped /></testcase>
///   </testsuite>
/// </testsuites>
/// ```
///
/// Cases that were never ended are reported as errors.
pub fn generate_junit_xml(report: &Report) -> String {
    let summary = &report.summary;
    let open_cases = report.never_ended_count();

    let mut suites = String::new();
    for suite in &report.suites {
        let never_ended = suite.test_cases.iter().filter(|tc| tc.status.is_none()).count();
        suites.push_str(&format!(
            "  <testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\" errors=\"{errors}\" skipped=\"{skipped}\" time=\"{time}\">\n",
            name = escape_xml(&suite.name),
            tests = suite.test_cases.len(),
            failures = suite.count(Status::Fail),
            errors = suite.count(Status::Error) + never_ended,
            skipped = suite.count(Status::Skip),
            time = seconds(suite.duration_ms),
        ));
        for case in &suite.test_cases {
            suites.push_str(&render_case(&suite.name, case));
        }
        suites.push_str("  </testsuite>\n");
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuites name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\" errors=\"{errors}\" skipped=\"{skipped}\" time=\"{time}\">\n{suites}</testsuites>\n",
        name = report.id,
        tests = summary.total_test_cases,
        failures = summary.fail,
        errors = summary.error + open_cases,
        skipped = summary.skip,
        time = seconds(summary.total_execution_time_ms),
        suites = suites,
    )
}

fn render_case(classname: &str, case: &TestCase) -> String {
    let open = format!(
        "    <testcase name=\"{name}\" classname=\"{classname}\" time=\"{time}\"",
        name = escape_xml(&case.name),
        classname = escape_xml(classname),
        time = seconds(case.duration_ms.unwrap_or(0)),
    );

    match case.status {
        Some(Status::Pass) => format!("{} />\n", open),
        Some(Status::Skip) => format!("{}>\n      <skipped />\n    </testcase>\n", open),
        Some(status @ (Status::Fail | Status::Error)) => {
            let tag = if status == Status::Fail { "failure" } else { "error" };
            format!(
                "{open}>\n      <{tag} message=\"{message}\" type=\"{status}\">{body}</{tag}>\n    </testcase>\n",
                open = open,
                tag = tag,
                message = escape_xml(&failure_message(case, status)),
                status = status,
                body = escape_xml(&failure_body(case)),
            )
        }
        None => format!(
            "{}>\n      <error message=\"test case was never ended\" type=\"Open\" />\n    </testcase>\n",
            open
        ),
    }
}

/// Count of failing steps, or the case status when no step failed.
fn failure_message(case: &TestCase, status: Status) -> String {
    let failed_steps = case.steps.iter().filter(|s| s.status.is_failure()).count();
    if failed_steps > 0 {
        format!("{} step(s) failed", failed_steps)
    } else {
        format!("test case ended with {}", status)
    }
}

fn failure_body(case: &TestCase) -> String {
    let mut lines: Vec<String> = case
        .steps
        .iter()
        .filter(|s| s.status.is_failure())
        .map(|s| format!("{}: {}", s.description, s.status))
        .collect();
    lines.extend(
        case.events
            .iter()
            .filter(|e| e.event_type == EventType::Error)
            .map(|e| format!("[Error] {}", e.message)),
    );
    lines.join("\n")
}

fn seconds(ms: u64) -> String {
    format!("{:.3}", ms as f64 / 1000.0)
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
