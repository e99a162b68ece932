use crate::model::report::Report;
use crate::model::status::{EventType, Status};
use crate::report::format_duration;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a report for terminal output.
///
/// Produces output like:
/// ```text
/// === Suite: Checkout [Fail] (2 cases, 1s) ===
/// ✓ PASS   pay by card (340ms)
/// ✗ FAIL   pay by voucher (860ms)
///     [FAIL] Step 2: apply voucher
///     [Error] voucher service unavailable
///
/// === Results: 1 passed, 1 failed, 0 skipped, 0 errors (2 total) in 1s ===
/// ```
pub fn format_console_report(report: &Report) -> String {
    let mut out = String::new();

    for suite in &report.suites {
        out.push_str(&format!(
            "=== Suite: {} [{}] ({} cases, {}) ===\n",
            suite.name,
            suite.status,
            suite.test_cases.len(),
            format_duration(suite.duration_ms)
        ));

        for case in &suite.test_cases {
            let marker = match case.status {
                Some(Status::Pass) => "\u{2713} PASS ",
                Some(Status::Fail) => "\u{2717} FAIL ",
                Some(Status::Skip) => "- SKIP ",
                Some(Status::Error) => "! ERROR",
                None => "? OPEN ",
            };
            let duration = case
                .duration_ms
                .map(format_duration)
                .unwrap_or_else(|| "not ended".to_string());
            out.push_str(&format!("{}  {} ({})\n", marker, case.name, duration));

            if case.status.is_some_and(|s| s.is_failure()) {
                for (index, step) in case.steps.iter().enumerate() {
                    if step.status.is_failure() {
                        out.push_str(&format!(
                            "    [{}] Step {}: {}\n",
                            step.status.as_str().to_uppercase(),
                            index + 1,
                            step.description
                        ));
                    }
                }
                for event in &case.events {
                    if event.event_type == EventType::Error {
                        out.push_str(&format!("    [Error] {}\n", event.message));
                    }
                }
            }
        }
        out.push('\n');
    }

    let summary = &report.summary;
    out.push_str(&format!(
        "=== Results: {} passed, {} failed, {} skipped, {} errors ({} total) in {}",
        summary.pass,
        summary.fail,
        summary.skip,
        summary.error,
        summary.total_test_cases,
        format_duration(summary.total_execution_time_ms)
    ));
    let open = report.never_ended_count();
    if open > 0 {
        out.push_str(&format!(", {} never ended", open));
    }
    out.push_str(" ===\n");

    out
}
