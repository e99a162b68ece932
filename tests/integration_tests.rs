//! End-to-end runs through the public aggregator API, from init to the
//! written artifact.

use test_report::aggregator::{Aggregator, DiagnosticKind, LifecycleState, ReportConfig};
use test_report::model::{Report, Status, SuiteStatus};
use test_report::report::{ReportFormat, read_report, write_report};

mod common;
use crate::common::utils::{ManualClock, aggregator_at};

// ============================================================================
// Group A: Reference scenario
// ============================================================================

#[test]
fn single_suite_single_case_scenario() {
    let aggregator = Aggregator::new();
    aggregator.init(ReportConfig::default());

    let a = aggregator.start_suite("S1").unwrap();
    let x = aggregator
        .start_test_case(a, "T1", "d", "QA", "Chrome")
        .unwrap()
        .expect("suite is open");
    aggregator.add_step(x, "navigate", "Pass".parse().unwrap(), 120).unwrap();
    aggregator.end_test_case(x, "Pass".parse().unwrap()).unwrap();
    aggregator.end_suite(a).unwrap();

    let report = aggregator.finalize().unwrap();

    assert_eq!(report.summary.total_suites, 1);
    assert_eq!(report.summary.total_test_cases, 1);
    assert_eq!(report.summary.pass, 1);
    assert_eq!(report.suites[0].id, a);
    assert_eq!(report.suites[0].status, SuiteStatus::Pass);

    let case = &report.suites[0].test_cases[0];
    assert_eq!(case.id, x);
    assert_eq!(case.steps.len(), 1);
    assert_eq!(case.steps[0].description, "navigate");
    assert_eq!(case.steps[0].duration_ms, 120);
    assert_eq!(report.summary.environment, "Unknown");
    assert_eq!(report.summary.platform, "Unknown");
}

// ============================================================================
// Group B: Summary
// ============================================================================

#[test]
fn summary_uses_run_window_for_execution_time() {
    let (clock, aggregator) = aggregator_at(10_000);
    let suite = aggregator.start_suite("S").unwrap();
    clock.advance(1_000);
    let case = aggregator.start_test_case(suite, "a", "", "QA", "Linux").unwrap().unwrap();
    clock.advance(2_000);
    aggregator.end_test_case(case, Status::Pass).unwrap();
    aggregator.end_suite(suite).unwrap();
    clock.advance(5_000);

    let summary = aggregator.finalize().unwrap().summary;
    assert_eq!(summary.total_execution_time_ms, 8_000);
    assert_eq!(summary.start_time, 11_000);
    assert_eq!(summary.end_time, 13_000);
    assert_eq!(summary.environment, "QA");
    assert_eq!(summary.platform, "Linux");
}

#[test]
fn empty_run_summary_uses_run_bounds() {
    let (clock, aggregator) = aggregator_at(2_000);
    clock.advance(300);
    let summary = aggregator.finalize().unwrap().summary;
    assert_eq!(summary.total_suites, 0);
    assert_eq!(summary.start_time, 2_000);
    assert_eq!(summary.end_time, 2_300);
    assert_eq!(summary.total_execution_time_ms, 300);
}

#[test]
fn status_counts_add_up_across_suites() {
    let (_clock, aggregator) = aggregator_at(0);
    let outcomes = [
        vec![Status::Pass, Status::Pass, Status::Skip],
        vec![Status::Fail, Status::Error],
        vec![],
    ];
    for (i, statuses) in outcomes.iter().enumerate() {
        let suite = aggregator.start_suite(&format!("suite {}", i)).unwrap();
        for (j, status) in statuses.iter().enumerate() {
            let case = aggregator
                .start_test_case(suite, &format!("case {}", j), "", "QA", "Linux")
                .unwrap()
                .unwrap();
            aggregator.end_test_case(case, *status).unwrap();
        }
        aggregator.end_suite(suite).unwrap();
    }

    let report = aggregator.finalize().unwrap();
    let s = &report.summary;
    assert_eq!((s.pass, s.fail, s.skip, s.error), (2, 1, 1, 1));
    assert_eq!(s.pass + s.fail + s.skip + s.error, s.total_test_cases);
    assert_eq!(s.total_suites, 3);

    let statuses: Vec<_> = report.suites.iter().map(|s| s.status).collect();
    assert_eq!(statuses, [SuiteStatus::Pass, SuiteStatus::Fail, SuiteStatus::NoTests]);
}

#[test]
fn entities_left_open_are_included_but_not_tallied() {
    let (clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("never ended").unwrap();
    let done = aggregator.start_test_case(suite, "done", "", "QA", "Linux").unwrap().unwrap();
    aggregator.start_test_case(suite, "hanging", "", "QA", "Linux").unwrap().unwrap();
    clock.advance(50);
    aggregator.end_test_case(done, Status::Pass).unwrap();

    let report = aggregator.finalize().unwrap();
    assert_eq!(report.summary.total_test_cases, 2);
    assert_eq!(report.summary.pass, 1);
    assert_eq!(report.summary.tallied(), 1);

    let hanging = &report.suites[0].test_cases[1];
    assert_eq!(hanging.status, None);
    assert_eq!(hanging.end_time, None);
    assert_eq!(report.suites[0].status, SuiteStatus::Pass);
}

// ============================================================================
// Group C: Artifacts
// ============================================================================

#[test]
fn flush_writes_html_and_finalizes() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("reports");
    let aggregator = Aggregator::with_clock(ManualClock::new(0));
    aggregator.init(
        ReportConfig::default()
            .with_output_dir(&out)
            .with_report_file_name("run.html"),
    );
    let suite = aggregator.start_suite("S").unwrap();
    aggregator.end_suite(suite).unwrap();

    let flushed = aggregator.flush().unwrap();

    let path = flushed.artifact.expect("artifact written");
    assert_eq!(path, out.join("run.html"));
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains(&flushed.report.id.to_string()));
    assert_eq!(aggregator.state(), LifecycleState::Finalized);
}

#[test]
fn flush_write_failure_is_recorded_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file in the way").unwrap();

    let aggregator = Aggregator::with_clock(ManualClock::new(0));
    aggregator.init(ReportConfig::default().with_output_dir(&blocker));
    aggregator.start_suite("S").unwrap();

    let flushed = aggregator.flush().unwrap();
    assert!(flushed.artifact.is_none());
    assert_eq!(flushed.report.summary.total_suites, 1);

    let diagnostics = aggregator.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::ArtifactWriteFailed);
    assert_eq!(aggregator.state(), LifecycleState::Finalized);
}

#[test]
fn saved_json_reads_back_identically() {
    let (_clock, aggregator) = aggregator_at(100);
    let suite = aggregator.start_suite("S").unwrap();
    let case = aggregator.start_test_case(suite, "a", "b", "QA", "Linux").unwrap().unwrap();
    aggregator.add_step(case, "one", Status::Pass, 1).unwrap();
    aggregator.add_step(case, "two", Status::Fail, 2).unwrap();
    aggregator.add_log(case, "first").unwrap();
    aggregator.add_log(case, "second").unwrap();
    aggregator.end_test_case(case, Status::Fail).unwrap();
    aggregator.end_suite(suite).unwrap();
    let report = aggregator.finalize().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    write_report(&report, ReportFormat::Json, &path).unwrap();
    let back: Report = read_report(&path).unwrap();

    assert_eq!(back, report);
    let steps: Vec<_> = back.suites[0].test_cases[0]
        .steps
        .iter()
        .map(|s| s.description.as_str())
        .collect();
    assert_eq!(steps, ["one", "two"]);
}
