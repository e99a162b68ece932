#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use test_report::aggregator::{Aggregator, Clock, ReportConfig};
use test_report::model::{
    Event, EventType, Report, RunId, Status, Step, Suite, SuiteId, SuiteStatus, Summary, TestCase,
};

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: u64) -> Arc<Self> {
        Arc::new(Self {
            now: AtomicU64::new(start),
        })
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Initialized aggregator driven by a manual clock starting at `start`.
pub fn aggregator_at(start: u64) -> (Arc<ManualClock>, Aggregator) {
    let clock = ManualClock::new(start);
    let aggregator = Aggregator::with_clock(clock.clone());
    aggregator.init(
        ReportConfig::default()
            .with_environment("QA")
            .with_platform("Linux"),
    );
    (clock, aggregator)
}

pub fn ended_case(name: &str, status: Status, start: u64, end: u64) -> TestCase {
    let mut case = TestCase::new(name, format!("checks {}", name), "QA", "Chrome", start);
    case.steps.push(Step::new("navigate", Status::Pass, 120));
    case.end(status, end);
    case
}

pub fn suite_of(name: &str, status: SuiteStatus, cases: Vec<TestCase>) -> Suite {
    Suite {
        id: SuiteId::new(),
        name: name.to_string(),
        status,
        duration_ms: 900,
        start_time: 1_000,
        end_time: 1_900,
        test_cases: cases,
    }
}

/// Hand-built report with one passing and one failing suite.
pub fn sample_report() -> Report {
    let mut failing = ended_case("Checkout <guest>", Status::Fail, 1_300, 1_800);
    failing.steps.push(Step::new("apply voucher", Status::Fail, 300));
    failing.logs.push("INFO: voucher form shown".to_string());
    failing
        .events
        .push(Event::new(1_700, EventType::Error, "voucher service unavailable"));

    let suites = vec![
        suite_of(
            "Login",
            SuiteStatus::Pass,
            vec![
                ended_case("valid user", Status::Pass, 1_000, 1_120),
                ended_case("remember me", Status::Skip, 1_130, 1_130),
            ],
        ),
        suite_of(
            "Checkout",
            SuiteStatus::Fail,
            vec![failing, ended_case("pay by card", Status::Error, 1_200, 1_900)],
        ),
    ];

    Report {
        id: RunId::new(),
        suites,
        summary: Summary {
            total_suites: 2,
            total_test_cases: 4,
            pass: 1,
            fail: 1,
            skip: 1,
            error: 1,
            total_execution_time_ms: 2_500,
            start_time: 1_000,
            end_time: 1_900,
            environment: "QA".to_string(),
            platform: "Linux".to_string(),
        },
    }
}

pub fn all_passing_report() -> Report {
    let mut report = sample_report();
    report.suites.truncate(1);
    report.suites[0].test_cases.truncate(1);
    report.summary.total_suites = 1;
    report.summary.total_test_cases = 1;
    report.summary.fail = 0;
    report.summary.skip = 0;
    report.summary.error = 0;
    report
}
