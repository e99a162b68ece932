use crate::model::report::Report;
use crate::model::status::{EventType, Status, SuiteStatus};
use crate::model::test_case::TestCase;
use crate::report::error::ReportError;
use crate::report::format_duration;

// ============================================================================
// HTML reporter: self-contained HTML report
// ============================================================================

/// Generate a self-contained HTML report.
///
/// The page is readable without scripts: summary cards and one collapsible
/// `<details>` block per suite and per case are rendered here. The full
/// report JSON is also embedded as `window.REPORT_DATA` so the inline script
/// (status filter, free-text search) and any other tooling can work off the
/// raw data.
///
/// Features:
/// - Green/red header based on overall pass/fail
/// - Pass/fail/skip/error counts, run window and total execution time
/// - Each suite with its derived status and duration
/// - Each case with steps, logs and events
/// - Inline CSS and JS (no external dependencies)
pub fn generate_html_report(report: &Report) -> Result<String, ReportError> {
    let summary = &report.summary;
    let header_color = if report.has_failures() {
        "#f44336"
    } else {
        "#4CAF50"
    };
    let status_text = if report.has_failures() {
        "SOME TESTS FAILED"
    } else {
        "ALL TESTS PASSED"
    };

    let mut suites = String::new();
    for suite in &report.suites {
        suites.push_str(&format!(
            r#"<details class="suite {class}" open>
<summary><span class="badge {class}">{status}</span> {name} <span class="meta">{cases} cases · {duration}</span></summary>
"#,
            class = suite_class(suite.status),
            status = suite.status,
            name = escape_html(&suite.name),
            cases = suite.test_cases.len(),
            duration = format_duration(suite.duration_ms),
        ));
        for case in &suite.test_cases {
            suites.push_str(&render_case(case));
        }
        suites.push_str("</details>\n");
    }
    if report.suites.is_empty() {
        suites.push_str("<p class=\"empty\">No suites were recorded.</p>\n");
    }

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Test Automation Report - {run_id}</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }}
.header {{ background: {header_color}; color: white; padding: 20px 30px; }}
.header h1 {{ margin: 0 0 8px 0; font-size: 24px; }}
.header p {{ margin: 0; font-size: 16px; opacity: 0.9; }}
.content {{ max-width: 1000px; margin: 20px auto; padding: 0 20px; }}
.cards {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(140px, 1fr)); gap: 12px; margin-bottom: 20px; }}
.card {{ background: white; border-radius: 6px; padding: 12px 16px; }}
.card b {{ display: block; font-size: 22px; }}
.filters {{ display: flex; gap: 8px; margin-bottom: 16px; }}
.filters input, .filters select {{ padding: 6px 10px; border: 1px solid #ccc; border-radius: 4px; }}
.suite {{ background: white; border-radius: 6px; padding: 12px 20px; margin-bottom: 12px; border-left: 4px solid #ccc; }}
.suite > summary {{ cursor: pointer; font-weight: bold; font-size: 16px; }}
.test-case {{ margin: 10px 0 0 12px; padding: 8px 12px; border-left: 3px solid #ccc; }}
.test-case > summary {{ cursor: pointer; }}
.pass {{ border-left-color: #4CAF50; }}
.fail {{ border-left-color: #f44336; }}
.skip {{ border-left-color: #FFC107; }}
.error {{ border-left-color: #9C27B0; }}
.open, .none {{ border-left-color: #9E9E9E; }}
.badge {{ font-size: 12px; padding: 2px 8px; border-radius: 10px; color: white; background: #9E9E9E; }}
.badge.pass {{ background: #4CAF50; }}
.badge.fail {{ background: #f44336; }}
.badge.skip {{ background: #FFC107; }}
.badge.error {{ background: #9C27B0; }}
.meta {{ color: #666; font-weight: normal; font-size: 13px; }}
.test-case p {{ margin: 4px 0; color: #444; font-size: 14px; }}
.steps li.fail, .steps li.error {{ color: #c62828; }}
.events .ev-Error {{ color: #c62828; }}
.events .ev-Warning {{ color: #b28704; }}
pre.logs {{ background: #f0f0f0; padding: 8px; font-size: 12px; max-height: 200px; overflow: auto; white-space: pre-wrap; }}
.empty {{ color: #666; text-align: center; }}
</style>
</head>
<body>
<div class="header">
<h1>{status_text}</h1>
<p>{passed} passed, {failed} failed, {skipped} skipped, {errors} errors ({total} total) in {duration}</p>
</div>
<div class="content">
<div class="cards">
<div class="card">Suites<b>{total_suites}</b></div>
<div class="card">Test cases<b>{total}</b></div>
<div class="card">Environment<b>{environment}</b></div>
<div class="card">Platform<b>{platform}</b></div>
<div class="card">Start<b class="ts" data-ts="{start}">{start}</b></div>
<div class="card">End<b class="ts" data-ts="{end}">{end}</b></div>
</div>
<div class="filters">
<input id="search" type="text" placeholder="Search test cases...">
<select id="status">
<option value="All">All statuses</option>
<option>Pass</option><option>Fail</option><option>Skip</option><option>Error</option>
</select>
</div>
{suites}
</div>
<script>
window.REPORT_DATA = {data};
(function () {{
  document.querySelectorAll('.ts').forEach(function (el) {{
    el.textContent = new Date(Number(el.dataset.ts)).toLocaleString();
  }});
  var search = document.getElementById('search');
  var status = document.getElementById('status');
  function apply() {{
    var term = search.value.toLowerCase();
    var wanted = status.value;
    document.querySelectorAll('.suite').forEach(function (suite) {{
      var shown = 0;
      suite.querySelectorAll('.test-case').forEach(function (tc) {{
        var ok = (wanted === 'All' || tc.dataset.status === wanted) &&
          tc.textContent.toLowerCase().indexOf(term) !== -1;
        tc.style.display = ok ? '' : 'none';
        if (ok) shown++;
      }});
      suite.style.display = shown > 0 || (!term && wanted === 'All') ? '' : 'none';
    }});
  }}
  search.addEventListener('input', apply);
  status.addEventListener('change', apply);
}})();
</script>
</body>
</html>"##,
        run_id = report.id,
        header_color = header_color,
        status_text = status_text,
        passed = summary.pass,
        failed = summary.fail,
        skipped = summary.skip,
        errors = summary.error,
        total = summary.total_test_cases,
        total_suites = summary.total_suites,
        duration = format_duration(summary.total_execution_time_ms),
        environment = escape_html(&summary.environment),
        platform = escape_html(&summary.platform),
        start = summary.start_time,
        end = summary.end_time,
        suites = suites,
        data = embed_json(report)?,
    ))
}

fn render_case(case: &TestCase) -> String {
    let status = case.status.map(|s| s.as_str()).unwrap_or("Open");
    let mut out = format!(
        r#"<details class="test-case {class}" data-status="{status}">
<summary><span class="badge {class}">{status}</span> {name} <span class="meta">{duration}</span></summary>
<p><strong>Description:</strong> {description}</p>
<p><strong>Environment:</strong> {environment} · <strong>Platform:</strong> {platform}</p>
"#,
        class = case_class(case.status),
        status = status,
        name = escape_html(&case.name),
        duration = case.duration_ms.map(format_duration).unwrap_or_else(|| "running".to_string()),
        description = escape_html(&case.description),
        environment = escape_html(&case.environment),
        platform = escape_html(&case.platform),
    );

    if !case.steps.is_empty() {
        out.push_str("<ol class=\"steps\">\n");
        for step in &case.steps {
            out.push_str(&format!(
                "<li class=\"{}\"><b>{}:</b> {} ({})</li>\n",
                case_class(Some(step.status)),
                step.status,
                escape_html(&step.description),
                format_duration(step.duration_ms)
            ));
        }
        out.push_str("</ol>\n");
    }

    if !case.logs.is_empty() {
        let logs: Vec<String> = case.logs.iter().map(|l| escape_html(l)).collect();
        out.push_str(&format!("<pre class=\"logs\">{}</pre>\n", logs.join("\n")));
    }

    if !case.events.is_empty() {
        out.push_str("<ul class=\"events\">\n");
        for event in &case.events {
            out.push_str(&format!(
                "<li class=\"ev-{kind}\"><span class=\"ts\" data-ts=\"{ts}\">{ts}</span> [{kind}] {message}</li>\n",
                kind = event_class(event.event_type),
                ts = event.timestamp,
                message = escape_html(&event.message),
            ));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</details>\n");
    out
}

fn suite_class(status: SuiteStatus) -> &'static str {
    match status {
        SuiteStatus::Pass => "pass",
        SuiteStatus::Fail => "fail",
        SuiteStatus::NoTests => "none",
    }
}

fn case_class(status: Option<Status>) -> &'static str {
    match status {
        Some(Status::Pass) => "pass",
        Some(Status::Fail) => "fail",
        Some(Status::Skip) => "skip",
        Some(Status::Error) => "error",
        None => "open",
    }
}

fn event_class(event_type: EventType) -> &'static str {
    event_type.as_str()
}

/// Report JSON made safe to sit inside a `<script>` element.
fn embed_json(report: &Report) -> Result<String, ReportError> {
    let json = serde_json::to_string(report).map_err(ReportError::Serialize)?;
    Ok(json.replace('<', "\\u003c"))
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
