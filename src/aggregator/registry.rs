use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::aggregator::clock::Clock;
use crate::aggregator::config::ReportConfig;
use crate::aggregator::error::{AggregatorError, AggregatorResult};
use crate::model::ids::{SuiteId, TestCaseId};
use crate::model::report::Report;
use crate::model::status::{EventType, Status};
use crate::model::step::{Event, Step};
use crate::model::suite::{CaseTiming, Suite, SuiteState, derive_suite_state};
use crate::model::test_case::TestCase;
use crate::report::assembler::assemble;
use crate::report::reducer::{RunWindow, summarize};

// Lock order: suite record -> suite slot -> case registry -> test case.
// No path takes an earlier lock while holding a later one.

type CaseHandle = Arc<Mutex<TestCase>>;
type SuiteHandle = Arc<Mutex<SuiteSlot>>;

/// Mutable in-flight form of a suite. Cases are shared with the open-case
/// index so appends lock only the one case they target.
struct SuiteSlot {
    id: SuiteId,
    name: String,
    opened_at: u64,
    closed_at: Option<u64>,
    cases: Vec<CaseHandle>,
    state: SuiteState,
}

impl SuiteSlot {
    fn new(id: SuiteId, name: String, opened_at: u64) -> Self {
        Self {
            id,
            name,
            opened_at,
            closed_at: None,
            cases: Vec::new(),
            state: derive_suite_state(opened_at, None, []),
        }
    }

    fn recompute(&mut self) {
        let timings: Vec<CaseTiming> = self
            .cases
            .iter()
            .map(|case| CaseTiming::from(&*case.lock()))
            .collect();
        self.state = derive_suite_state(self.opened_at, self.closed_at, timings);
    }

    fn snapshot(&self) -> Suite {
        Suite {
            id: self.id,
            name: self.name.clone(),
            status: self.state.status,
            duration_ms: self.state.duration_ms,
            start_time: self.state.start_time,
            end_time: self.state.end_time,
            test_cases: self.cases.iter().map(|case| case.lock().clone()).collect(),
        }
    }
}

struct OpenCase {
    case: CaseHandle,
    suite: SuiteHandle,
}

#[derive(Default)]
struct SuiteRecord {
    /// Every suite started in this run, in start order
    order: Vec<SuiteHandle>,
    issued: HashSet<SuiteId>,
}

#[derive(Default)]
struct CaseRegistry {
    open: HashMap<TestCaseId, OpenCase>,
    issued: HashSet<TestCaseId>,
}

// ============================================================================
// Run
// ============================================================================

/// State of one initialized run: the permanent suite record plus the
/// open-suite and open-case indexes.
pub(crate) struct Run {
    config: ReportConfig,
    clock: Arc<dyn Clock>,
    started_at: u64,
    record: Mutex<SuiteRecord>,
    open_suites: Mutex<HashMap<SuiteId, SuiteHandle>>,
    cases: Mutex<CaseRegistry>,
}

impl Run {
    pub(crate) fn new(config: ReportConfig, clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now_ms();
        Self {
            config,
            clock,
            started_at,
            record: Mutex::new(SuiteRecord::default()),
            open_suites: Mutex::new(HashMap::new()),
            cases: Mutex::new(CaseRegistry::default()),
        }
    }

    pub(crate) fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub(crate) fn started_at(&self) -> u64 {
        self.started_at
    }

    pub(crate) fn start_suite(&self, name: &str) -> SuiteId {
        let now = self.clock.now_ms();
        let id = {
            let mut record = self.record.lock();
            let mut id = SuiteId::new();
            while !record.issued.insert(id) {
                id = SuiteId::new();
            }
            let slot = Arc::new(Mutex::new(SuiteSlot::new(id, name.to_string(), now)));
            record.order.push(Arc::clone(&slot));
            self.open_suites.lock().insert(id, slot);
            id
        };
        info!(suite = %name, suite_id = %id, "started suite");
        id
    }

    pub(crate) fn end_suite(&self, suite_id: SuiteId) -> AggregatorResult<()> {
        let slot = self
            .open_suites
            .lock()
            .remove(&suite_id)
            .ok_or(AggregatorError::SuiteNotFound { suite_id })?;

        let now = self.clock.now_ms();
        let mut slot = slot.lock();
        slot.closed_at = Some(now.max(slot.opened_at));
        slot.recompute();
        info!(
            suite = %slot.name,
            status = %slot.state.status,
            cases = slot.cases.len(),
            duration_ms = slot.state.duration_ms,
            "ended suite"
        );
        Ok(())
    }

    pub(crate) fn start_test_case(
        &self,
        suite_id: SuiteId,
        name: &str,
        description: &str,
        environment: &str,
        platform: &str,
    ) -> AggregatorResult<TestCaseId> {
        let suite = self
            .open_suites
            .lock()
            .get(&suite_id)
            .cloned()
            .ok_or(AggregatorError::SuiteNotFound { suite_id })?;

        let now = self.clock.now_ms();
        let mut slot = suite.lock();
        // end_suite may have closed it between the lookup and the lock
        if slot.closed_at.is_some() {
            return Err(AggregatorError::SuiteNotFound { suite_id });
        }

        let mut case = TestCase::new(name, description, environment, platform, now);
        let case_id = {
            let mut registry = self.cases.lock();
            while !registry.issued.insert(case.id) {
                case.id = TestCaseId::new();
            }
            let case_id = case.id;
            let handle = Arc::new(Mutex::new(case));
            registry.open.insert(
                case_id,
                OpenCase {
                    case: Arc::clone(&handle),
                    suite: Arc::clone(&suite),
                },
            );
            slot.cases.push(handle);
            case_id
        };
        slot.recompute();

        info!(suite = %slot.name, case = %name, case_id = %case_id, "started test case");
        Ok(case_id)
    }

    pub(crate) fn end_test_case(&self, case_id: TestCaseId, status: Status) -> AggregatorResult<()> {
        let open = self
            .cases
            .lock()
            .open
            .remove(&case_id)
            .ok_or(AggregatorError::TestCaseNotFound { case_id })?;

        let now = self.clock.now_ms();
        let name = {
            let mut case = open.case.lock();
            if !case.end(status, now) {
                return Err(AggregatorError::TestCaseNotFound { case_id });
            }
            case.name.clone()
        };
        open.suite.lock().recompute();
        info!(case = %name, case_id = %case_id, %status, "ended test case");
        Ok(())
    }

    pub(crate) fn add_step(
        &self,
        case_id: TestCaseId,
        description: &str,
        status: Status,
        duration_ms: u64,
    ) -> AggregatorResult<()> {
        self.with_open_case(case_id, |case| {
            case.steps.push(Step::new(description, status, duration_ms));
        })?;
        debug!(case_id = %case_id, step = %description, %status, "added step");
        Ok(())
    }

    pub(crate) fn add_log(&self, case_id: TestCaseId, message: &str) -> AggregatorResult<()> {
        self.with_open_case(case_id, |case| case.logs.push(message.to_string()))?;
        debug!(case_id = %case_id, "added log");
        Ok(())
    }

    pub(crate) fn add_event(
        &self,
        case_id: TestCaseId,
        event_type: EventType,
        message: &str,
    ) -> AggregatorResult<()> {
        let now = self.clock.now_ms();
        self.with_open_case(case_id, |case| {
            case.events.push(Event::new(now, event_type, message));
        })?;
        debug!(case_id = %case_id, %event_type, "added event");
        Ok(())
    }

    /// Clone of a case that is still open.
    pub(crate) fn open_test_case(&self, case_id: TestCaseId) -> Option<TestCase> {
        let handle = self.open_case_handle(case_id)?;
        let case = handle.lock();
        case.is_open().then(|| case.clone())
    }

    pub(crate) fn open_suite_count(&self) -> usize {
        self.open_suites.lock().len()
    }

    pub(crate) fn open_test_case_count(&self) -> usize {
        self.cases.lock().open.len()
    }

    /// Point-in-time copy of the permanent record.
    pub(crate) fn suites(&self) -> Vec<Suite> {
        self.record
            .lock()
            .order
            .iter()
            .map(|slot| slot.lock().snapshot())
            .collect()
    }

    /// Reduce everything recorded so far into a report. Open suites and
    /// cases are included as they stand.
    pub(crate) fn finalize(&self) -> Report {
        let finished_at = self.clock.now_ms().max(self.started_at);
        let suites = self.suites();
        let window = RunWindow {
            started_at: self.started_at,
            finished_at,
        };
        let summary = summarize(&suites, window, &self.config.environment, &self.config.platform);
        assemble(suites, summary)
    }

    fn open_case_handle(&self, case_id: TestCaseId) -> Option<CaseHandle> {
        self.cases
            .lock()
            .open
            .get(&case_id)
            .map(|open| Arc::clone(&open.case))
    }

    /// Run `f` under the case's own lock, provided the case is still open.
    fn with_open_case<F>(&self, case_id: TestCaseId, f: F) -> AggregatorResult<()>
    where
        F: FnOnce(&mut TestCase),
    {
        let handle = self
            .open_case_handle(case_id)
            .ok_or(AggregatorError::TestCaseNotFound { case_id })?;
        let mut case = handle.lock();
        // end_test_case may have closed it after the lookup
        if !case.is_open() {
            return Err(AggregatorError::TestCaseNotFound { case_id });
        }
        f(&mut *case);
        Ok(())
    }
}
