use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info, warn};

use crate::aggregator::clock::{Clock, SystemClock};
use crate::aggregator::config::ReportConfig;
use crate::aggregator::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::aggregator::error::{AggregatorError, AggregatorResult};
use crate::aggregator::registry::Run;
use crate::model::ids::{SuiteId, TestCaseId};
use crate::model::report::Report;
use crate::model::status::{EventType, Status};
use crate::model::suite::Suite;
use crate::model::test_case::TestCase;
use crate::report::writer::write_html_report;

/// Where the aggregator is in its run lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Active,
    Finalized,
}

enum Lifecycle {
    Uninitialized,
    Active(Arc<Run>),
    Finalized,
}

/// Result of [`Aggregator::flush`]: the report, plus the artifact path when
/// writing it succeeded.
#[derive(Debug, Clone)]
pub struct Flushed {
    pub report: Report,
    pub artifact: Option<PathBuf>,
}

// ============================================================================
// Aggregator
// ============================================================================

/// Concurrency-safe collector of suites, test cases, steps, logs and events.
///
/// One instance is created by the test driver and shared (usually behind an
/// `Arc`) with every worker. It must be [`init`](Self::init)ed before use;
/// [`finalize`](Self::finalize) produces the [`Report`] and clears all state
/// so that a later `init` starts a clean run.
///
/// ```
/// use test_report::aggregator::{Aggregator, ReportConfig};
/// use test_report::model::Status;
///
/// let aggregator = Aggregator::new();
/// aggregator.init(ReportConfig::default());
///
/// let suite = aggregator.start_suite("Checkout").unwrap();
/// let case = aggregator
///     .start_test_case(suite, "pay by card", "happy path", "QA", "Chrome")
///     .unwrap()
///     .unwrap();
/// aggregator.add_step(case, "submit payment", Status::Pass, 120).unwrap();
/// aggregator.end_test_case(case, Status::Pass).unwrap();
/// aggregator.end_suite(suite).unwrap();
///
/// let report = aggregator.finalize().unwrap();
/// assert_eq!(report.summary.pass, 1);
/// ```
pub struct Aggregator {
    clock: Arc<dyn Clock>,
    lifecycle: RwLock<Lifecycle>,
    diagnostics: Diagnostics,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            lifecycle: RwLock::new(Lifecycle::Uninitialized),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Begin a run. Returns `true` if a new run was started.
    ///
    /// Calling this while a run is already active is a no-op that returns
    /// `false`: the existing run, its data and its start time are kept and
    /// `config` is ignored. This makes it safe to call from several setup
    /// hooks that cannot tell which of them runs first.
    pub fn init(&self, config: ReportConfig) -> bool {
        let mut lifecycle = self.lifecycle.write();
        if let Lifecycle::Active(run) = &*lifecycle {
            info!(report = %run.config().report_path().display(), "aggregator already initialized");
            return false;
        }
        self.diagnostics.clear();
        let run = Run::new(config, Arc::clone(&self.clock));
        info!(
            report = %run.config().report_path().display(),
            environment = %run.config().environment,
            platform = %run.config().platform,
            "aggregator initialized"
        );
        *lifecycle = Lifecycle::Active(Arc::new(run));
        true
    }

    pub fn state(&self) -> LifecycleState {
        match &*self.lifecycle.read() {
            Lifecycle::Uninitialized => LifecycleState::Uninitialized,
            Lifecycle::Active(_) => LifecycleState::Active,
            Lifecycle::Finalized => LifecycleState::Finalized,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state() == LifecycleState::Active
    }

    /// Configuration of the active run.
    pub fn config(&self) -> AggregatorResult<ReportConfig> {
        Ok(self.run()?.config().clone())
    }

    /// Millisecond timestamp at which the active run was initialized.
    pub fn run_started_at(&self) -> AggregatorResult<u64> {
        Ok(self.run()?.started_at())
    }

    pub fn start_suite(&self, name: &str) -> AggregatorResult<SuiteId> {
        Ok(self.run()?.start_suite(name))
    }

    /// Close a suite and derive its final status from its cases.
    pub fn end_suite(&self, suite_id: SuiteId) -> AggregatorResult<()> {
        let result = self.run()?.end_suite(suite_id);
        self.observe("end_suite", result)
    }

    /// Open a test case inside an open suite.
    ///
    /// Returns `Ok(None)` when the suite is unknown or already ended, so the
    /// driver can skip the case without aborting the run.
    pub fn start_test_case(
        &self,
        suite_id: SuiteId,
        name: &str,
        description: &str,
        environment: &str,
        platform: &str,
    ) -> AggregatorResult<Option<TestCaseId>> {
        let result = self
            .run()?
            .start_test_case(suite_id, name, description, environment, platform);
        match self.observe("start_test_case", result) {
            Ok(case_id) => Ok(Some(case_id)),
            Err(AggregatorError::SuiteNotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn end_test_case(&self, case_id: TestCaseId, status: Status) -> AggregatorResult<()> {
        let result = self.run()?.end_test_case(case_id, status);
        self.observe("end_test_case", result)
    }

    pub fn add_step(
        &self,
        case_id: TestCaseId,
        description: &str,
        status: Status,
        duration_ms: u64,
    ) -> AggregatorResult<()> {
        let result = self.run()?.add_step(case_id, description, status, duration_ms);
        self.observe("add_step", result)
    }

    pub fn add_log(&self, case_id: TestCaseId, message: &str) -> AggregatorResult<()> {
        let result = self.run()?.add_log(case_id, message);
        self.observe("add_log", result)
    }

    pub fn add_event(
        &self,
        case_id: TestCaseId,
        event_type: EventType,
        message: &str,
    ) -> AggregatorResult<()> {
        let result = self.run()?.add_event(case_id, event_type, message);
        self.observe("add_event", result)
    }

    /// Copy of a test case that is still open, e.g. to decide its final
    /// status from the steps recorded so far.
    pub fn open_test_case(&self, case_id: TestCaseId) -> AggregatorResult<Option<TestCase>> {
        Ok(self.run()?.open_test_case(case_id))
    }

    pub fn open_suite_count(&self) -> AggregatorResult<usize> {
        Ok(self.run()?.open_suite_count())
    }

    pub fn open_test_case_count(&self) -> AggregatorResult<usize> {
        Ok(self.run()?.open_test_case_count())
    }

    /// Point-in-time copy of every suite recorded in the active run.
    pub fn suites(&self) -> AggregatorResult<Vec<Suite>> {
        Ok(self.run()?.suites())
    }

    /// Produce the report for the active run and reset to
    /// [`LifecycleState::Finalized`].
    pub fn finalize(&self) -> AggregatorResult<Report> {
        let run = self.take_run()?;
        let report = run.finalize();
        info!(
            run_id = %report.id,
            suites = report.summary.total_suites,
            cases = report.summary.total_test_cases,
            pass = report.summary.pass,
            fail = report.summary.fail,
            skip = report.summary.skip,
            error = report.summary.error,
            "run finalized"
        );
        Ok(report)
    }

    /// Finalize and write the HTML artifact to the configured path.
    ///
    /// A failed write is logged and recorded as a diagnostic; the report is
    /// returned either way.
    pub fn flush(&self) -> AggregatorResult<Flushed> {
        let run = self.take_run()?;
        let report = run.finalize();
        let path = run.config().report_path();

        let artifact = match write_html_report(&report, &path) {
            Ok(written) => {
                info!(path = %written.display(), run_id = %report.id, "report written");
                Some(written)
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to write report");
                self.diagnostics.record(Diagnostic {
                    timestamp_ms: self.clock.now_ms(),
                    kind: DiagnosticKind::ArtifactWriteFailed,
                    operation: "flush",
                    message: err.to_string(),
                });
                None
            }
        };
        Ok(Flushed { report, artifact })
    }

    /// Recoverable conditions recorded since the current run was initialized.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.snapshot()
    }

    fn run(&self) -> AggregatorResult<Arc<Run>> {
        match &*self.lifecycle.read() {
            Lifecycle::Active(run) => Ok(Arc::clone(run)),
            _ => Err(AggregatorError::Uninitialized),
        }
    }

    fn take_run(&self) -> AggregatorResult<Arc<Run>> {
        let mut lifecycle = self.lifecycle.write();
        match std::mem::replace(&mut *lifecycle, Lifecycle::Finalized) {
            Lifecycle::Active(run) => Ok(run),
            previous => {
                *lifecycle = previous;
                Err(AggregatorError::Uninitialized)
            }
        }
    }

    fn observe<T>(&self, operation: &'static str, result: AggregatorResult<T>) -> AggregatorResult<T> {
        if let Err(err) = &result {
            if err.is_recoverable() {
                warn!(operation, error = %err, "ignoring call against unknown or closed entity");
                self.diagnostics.record(Diagnostic {
                    timestamp_ms: self.clock.now_ms(),
                    kind: match err {
                        AggregatorError::SuiteNotFound { .. } => DiagnosticKind::SuiteNotFound,
                        _ => DiagnosticKind::TestCaseNotFound,
                    },
                    operation,
                    message: err.to_string(),
                });
            }
        }
        result
    }
}
