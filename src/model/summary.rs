use serde::{Deserialize, Serialize};

/// Aggregate statistics over a whole run. Computed once per finalize and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_suites: usize,

    pub total_test_cases: usize,

    pub pass: usize,

    pub fail: usize,

    pub skip: usize,

    pub error: usize,

    /// Wall-clock run duration (init to finalize), in milliseconds
    #[serde(rename = "totalExecutionTime")]
    pub total_execution_time_ms: u64,

    pub start_time: u64,

    pub end_time: u64,

    pub environment: String,

    pub platform: String,
}

impl Summary {
    /// Cases that ended with a status. Open cases are counted in
    /// `total_test_cases` but not here.
    pub fn tallied(&self) -> usize {
        self.pass + self.fail + self.skip + self.error
    }

    pub fn has_failures(&self) -> bool {
        self.fail > 0 || self.error > 0
    }
}
