use serde::{Deserialize, Serialize};

use crate::model::ids::SuiteId;
use crate::model::status::{Status, SuiteStatus};
use crate::model::test_case::TestCase;

// ============================================================================
// Suite snapshot
// ============================================================================

/// A named group of test cases. Status and timing are derived from the
/// cases by [`derive_suite_state`]; they are never set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    pub id: SuiteId,

    pub name: String,

    pub status: SuiteStatus,

    #[serde(rename = "duration")]
    pub duration_ms: u64,

    pub start_time: u64,

    pub end_time: u64,

    pub test_cases: Vec<TestCase>,
}

impl Suite {
    pub fn count(&self, status: Status) -> usize {
        self.test_cases
            .iter()
            .filter(|tc| tc.status == Some(status))
            .count()
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// The slice of a test case that suite derivation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseTiming {
    pub status: Option<Status>,
    pub start_time: u64,
    pub end_time: Option<u64>,
}

impl From<&TestCase> for CaseTiming {
    fn from(tc: &TestCase) -> Self {
        Self {
            status: tc.status,
            start_time: tc.start_time,
            end_time: tc.end_time,
        }
    }
}

/// Derived suite fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteState {
    pub status: SuiteStatus,
    pub start_time: u64,
    pub end_time: u64,
    pub duration_ms: u64,
}

/// Recompute a suite's status and timing from its cases.
///
/// - No cases: `No Tests`, duration 0, bounds are the suite's own open/close
///   times.
/// - Otherwise `Fail` if any case is Fail or Error, else `Pass`. The start is
///   the earliest case start; the end is the latest of every known case end
///   and the suite's close time.
pub fn derive_suite_state<I>(opened_at: u64, closed_at: Option<u64>, cases: I) -> SuiteState
where
    I: IntoIterator<Item = CaseTiming>,
{
    let mut start: Option<u64> = None;
    let mut end: Option<u64> = closed_at;
    let mut failed = false;

    for case in cases {
        start = Some(start.map_or(case.start_time, |s| s.min(case.start_time)));
        if let Some(case_end) = case.end_time {
            end = Some(end.map_or(case_end, |e| e.max(case_end)));
        }
        failed |= case.status.is_some_and(|s| s.is_failure());
    }

    match start {
        None => {
            let end_time = closed_at.unwrap_or(opened_at).max(opened_at);
            SuiteState {
                status: SuiteStatus::NoTests,
                start_time: opened_at,
                end_time,
                duration_ms: 0,
            }
        }
        Some(start_time) => {
            let end_time = end.unwrap_or(start_time).max(start_time);
            SuiteState {
                status: if failed { SuiteStatus::Fail } else { SuiteStatus::Pass },
                start_time,
                end_time,
                duration_ms: end_time - start_time,
            }
        }
    }
}
