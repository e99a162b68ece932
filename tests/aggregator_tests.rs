use test_report::aggregator::{
    Aggregator, AggregatorError, DiagnosticKind, LifecycleState, ReportConfig,
};
use test_report::model::{EventType, Status, SuiteId, SuiteStatus, TestCaseId};

mod common;
use crate::common::utils::aggregator_at;

// ============================================================================
// 1. Lifecycle
// ============================================================================

#[test]
fn new_aggregator_is_uninitialized() {
    let aggregator = Aggregator::new();
    assert_eq!(aggregator.state(), LifecycleState::Uninitialized);
    assert!(!aggregator.is_initialized());
}

#[test]
fn use_before_init_is_a_hard_error() {
    let aggregator = Aggregator::new();
    let err = aggregator.start_suite("S1").unwrap_err();
    assert_eq!(err, AggregatorError::Uninitialized);
    assert!(!err.is_recoverable());
    assert_eq!(aggregator.finalize().unwrap_err(), AggregatorError::Uninitialized);
    assert_eq!(
        aggregator.add_log(TestCaseId::new(), "hello").unwrap_err(),
        AggregatorError::Uninitialized
    );
}

#[test]
fn second_init_keeps_existing_run() {
    let (clock, aggregator) = aggregator_at(1_000);
    let suite = aggregator.start_suite("S1").unwrap();

    clock.advance(500);
    let started = aggregator.init(ReportConfig::default().with_environment("Prod"));

    assert!(!started);
    assert_eq!(aggregator.run_started_at().unwrap(), 1_000);
    assert_eq!(aggregator.config().unwrap().environment, "QA");
    assert_eq!(aggregator.open_suite_count().unwrap(), 1);
    aggregator.end_suite(suite).unwrap();
}

#[test]
fn finalize_resets_and_allows_a_fresh_run() {
    let (_clock, aggregator) = aggregator_at(1_000);
    aggregator.start_suite("first run").unwrap();
    aggregator.finalize().unwrap();

    assert_eq!(aggregator.state(), LifecycleState::Finalized);
    assert_eq!(aggregator.start_suite("late").unwrap_err(), AggregatorError::Uninitialized);

    assert!(aggregator.init(ReportConfig::default()));
    assert_eq!(aggregator.state(), LifecycleState::Active);
    assert!(aggregator.suites().unwrap().is_empty());
}

#[test]
fn finalize_twice_fails_the_second_time() {
    let (_clock, aggregator) = aggregator_at(0);
    aggregator.finalize().unwrap();
    assert_eq!(aggregator.finalize().unwrap_err(), AggregatorError::Uninitialized);
}

// ============================================================================
// 2. Suite status derivation
// ============================================================================

#[test]
fn failing_case_fails_the_suite() {
    let (_clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("S").unwrap();
    let a = aggregator.start_test_case(suite, "a", "", "QA", "Linux").unwrap().unwrap();
    let b = aggregator.start_test_case(suite, "b", "", "QA", "Linux").unwrap().unwrap();
    aggregator.end_test_case(a, Status::Pass).unwrap();
    aggregator.end_test_case(b, Status::Fail).unwrap();
    aggregator.end_suite(suite).unwrap();

    let suites = aggregator.suites().unwrap();
    assert_eq!(suites[0].status, SuiteStatus::Fail);
}

#[test]
fn all_passing_cases_pass_the_suite() {
    let (_clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("S").unwrap();
    for name in ["a", "b", "c"] {
        let case = aggregator.start_test_case(suite, name, "", "QA", "Linux").unwrap().unwrap();
        aggregator.end_test_case(case, Status::Pass).unwrap();
    }
    aggregator.end_suite(suite).unwrap();
    assert_eq!(aggregator.suites().unwrap()[0].status, SuiteStatus::Pass);
}

#[test]
fn error_case_fails_suite_but_is_counted_as_error() {
    let (_clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("S").unwrap();
    let case = aggregator.start_test_case(suite, "boom", "", "QA", "Linux").unwrap().unwrap();
    aggregator.end_test_case(case, Status::Error).unwrap();
    aggregator.end_suite(suite).unwrap();

    let report = aggregator.finalize().unwrap();
    assert_eq!(report.suites[0].status, SuiteStatus::Fail);
    assert_eq!(report.summary.error, 1);
    assert_eq!(report.summary.fail, 0);
}

#[test]
fn empty_suite_has_no_tests_and_zero_duration() {
    let (clock, aggregator) = aggregator_at(1_000);
    let suite = aggregator.start_suite("empty").unwrap();
    clock.advance(750);
    aggregator.end_suite(suite).unwrap();

    let suites = aggregator.suites().unwrap();
    assert_eq!(suites[0].status, SuiteStatus::NoTests);
    assert_eq!(suites[0].duration_ms, 0);
}

#[test]
fn suite_timing_spans_its_cases() {
    let (clock, aggregator) = aggregator_at(1_000);
    let suite = aggregator.start_suite("S").unwrap();
    clock.advance(100);
    let case = aggregator.start_test_case(suite, "a", "", "QA", "Linux").unwrap().unwrap();
    clock.advance(400);
    aggregator.end_test_case(case, Status::Pass).unwrap();
    clock.advance(50);
    aggregator.end_suite(suite).unwrap();

    let suite = &aggregator.suites().unwrap()[0];
    assert_eq!(suite.start_time, 1_100);
    assert_eq!(suite.end_time, 1_550);
    assert_eq!(suite.duration_ms, 450);
    assert_eq!(suite.test_cases[0].duration_ms, Some(400));
}

#[test]
fn suite_status_is_recomputed_while_open() {
    let (_clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("S").unwrap();
    assert_eq!(aggregator.suites().unwrap()[0].status, SuiteStatus::NoTests);

    let case = aggregator.start_test_case(suite, "a", "", "QA", "Linux").unwrap().unwrap();
    assert_eq!(aggregator.suites().unwrap()[0].status, SuiteStatus::Pass);

    aggregator.end_test_case(case, Status::Fail).unwrap();
    assert_eq!(aggregator.suites().unwrap()[0].status, SuiteStatus::Fail);
}

// ============================================================================
// 3. Recoverable misuse
// ============================================================================

#[test]
fn start_case_in_unknown_suite_returns_none() {
    let (_clock, aggregator) = aggregator_at(0);
    aggregator.start_suite("real").unwrap();

    let case = aggregator
        .start_test_case(SuiteId::new(), "orphan", "", "QA", "Linux")
        .unwrap();

    assert!(case.is_none());
    let suites = aggregator.suites().unwrap();
    assert_eq!(suites.len(), 1);
    assert!(suites[0].test_cases.is_empty());

    let diagnostics = aggregator.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::SuiteNotFound);
    assert_eq!(diagnostics[0].operation, "start_test_case");
}

#[test]
fn start_case_in_ended_suite_returns_none() {
    let (_clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("S").unwrap();
    aggregator.end_suite(suite).unwrap();

    assert!(aggregator.start_test_case(suite, "late", "", "QA", "Linux").unwrap().is_none());
    assert!(aggregator.suites().unwrap()[0].test_cases.is_empty());
}

#[test]
fn ending_a_suite_twice_is_reported_not_fatal() {
    let (_clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("S").unwrap();
    aggregator.end_suite(suite).unwrap();

    let err = aggregator.end_suite(suite).unwrap_err();
    assert_eq!(err, AggregatorError::SuiteNotFound { suite_id: suite });
    assert!(err.is_recoverable());
    assert_eq!(aggregator.state(), LifecycleState::Active);
}

#[test]
fn appends_to_unknown_case_do_not_touch_any_suite() {
    let (_clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("S").unwrap();
    let real = aggregator.start_test_case(suite, "real", "", "QA", "Linux").unwrap().unwrap();
    let ghost = TestCaseId::new();

    assert!(aggregator.add_step(ghost, "step", Status::Pass, 1).unwrap_err().is_recoverable());
    assert!(aggregator.add_log(ghost, "log").unwrap_err().is_recoverable());
    assert!(aggregator.add_event(ghost, EventType::Info, "event").unwrap_err().is_recoverable());
    assert!(aggregator.end_test_case(ghost, Status::Pass).unwrap_err().is_recoverable());

    let suites = aggregator.suites().unwrap();
    assert_eq!(suites[0].test_cases.len(), 1);
    assert_eq!(suites[0].test_cases[0].id, real);
    assert!(suites[0].test_cases[0].steps.is_empty());
    assert_eq!(aggregator.diagnostics().len(), 4);
    assert!(
        aggregator
            .diagnostics()
            .iter()
            .all(|d| d.kind == DiagnosticKind::TestCaseNotFound)
    );
}

#[test]
fn appends_to_ended_case_are_rejected() {
    let (_clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("S").unwrap();
    let case = aggregator.start_test_case(suite, "a", "", "QA", "Linux").unwrap().unwrap();
    aggregator.add_step(case, "before", Status::Pass, 5).unwrap();
    aggregator.end_test_case(case, Status::Pass).unwrap();

    let err = aggregator.add_step(case, "after", Status::Fail, 5).unwrap_err();
    assert_eq!(err, AggregatorError::TestCaseNotFound { case_id: case });
    assert!(aggregator.add_log(case, "after").is_err());
    assert!(aggregator.end_test_case(case, Status::Fail).is_err());

    let recorded = &aggregator.suites().unwrap()[0].test_cases[0];
    assert_eq!(recorded.steps.len(), 1);
    assert_eq!(recorded.status, Some(Status::Pass));
}

#[test]
fn new_run_clears_old_diagnostics() {
    let (_clock, aggregator) = aggregator_at(0);
    let _ = aggregator.end_suite(SuiteId::new());
    assert_eq!(aggregator.diagnostics().len(), 1);

    aggregator.finalize().unwrap();
    aggregator.init(ReportConfig::default());
    assert!(aggregator.diagnostics().is_empty());
}

// ============================================================================
// 4. Recording
// ============================================================================

#[test]
fn steps_logs_and_events_keep_arrival_order() {
    let (clock, aggregator) = aggregator_at(5_000);
    let suite = aggregator.start_suite("S").unwrap();
    let case = aggregator.start_test_case(suite, "a", "desc", "QA", "Chrome").unwrap().unwrap();

    for i in 0..5 {
        aggregator.add_step(case, &format!("step {}", i), Status::Pass, i * 10).unwrap();
        aggregator.add_log(case, &format!("log {}", i)).unwrap();
    }
    clock.advance(10);
    aggregator.add_event(case, EventType::Warning, "slow").unwrap();
    clock.advance(10);
    aggregator.add_event(case, EventType::Error, "broken").unwrap();

    let open = aggregator.open_test_case(case).unwrap().unwrap();
    let steps: Vec<&str> = open.steps.iter().map(|s| s.description.as_str()).collect();
    assert_eq!(steps, ["step 0", "step 1", "step 2", "step 3", "step 4"]);
    assert_eq!(open.logs, ["log 0", "log 1", "log 2", "log 3", "log 4"]);
    assert_eq!(open.events[0].timestamp, 5_010);
    assert_eq!(open.events[0].event_type, EventType::Warning);
    assert_eq!(open.events[1].timestamp, 5_020);
    assert_eq!(open.description, "desc");
    assert_eq!(open.platform, "Chrome");
}

#[test]
fn open_test_case_is_none_once_ended() {
    let (_clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("S").unwrap();
    let case = aggregator.start_test_case(suite, "a", "", "QA", "Linux").unwrap().unwrap();
    assert_eq!(aggregator.open_test_case_count().unwrap(), 1);

    aggregator.end_test_case(case, Status::Skip).unwrap();
    assert!(aggregator.open_test_case(case).unwrap().is_none());
    assert_eq!(aggregator.open_test_case_count().unwrap(), 0);
}

#[test]
fn cases_may_outlive_their_suite() {
    let (clock, aggregator) = aggregator_at(0);
    let suite = aggregator.start_suite("S").unwrap();
    let case = aggregator.start_test_case(suite, "slow", "", "QA", "Linux").unwrap().unwrap();
    clock.advance(100);
    aggregator.end_suite(suite).unwrap();
    clock.advance(100);
    aggregator.add_log(case, "still going").unwrap();
    aggregator.end_test_case(case, Status::Fail).unwrap();

    let suite = &aggregator.suites().unwrap()[0];
    assert_eq!(suite.status, SuiteStatus::Fail);
    assert_eq!(suite.end_time, 200);
    assert_eq!(suite.test_cases[0].logs, ["still going"]);
}
