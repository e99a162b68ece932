use serde::{Deserialize, Serialize};

use crate::model::ids::RunId;
use crate::model::suite::Suite;
use crate::model::summary::Summary;

/// The terminal artifact of a run: every suite plus the summary, under a
/// fresh run id. This is the only structure handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: RunId,

    pub suites: Vec<Suite>,

    pub summary: Summary,
}

impl Report {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Cases that were never ended, counted from the suites themselves.
    pub fn never_ended_count(&self) -> usize {
        self.suites
            .iter()
            .flat_map(|s| &s.test_cases)
            .filter(|tc| tc.status.is_none())
            .count()
    }

    /// Whether any case failed or errored.
    pub fn has_failures(&self) -> bool {
        self.summary.has_failures()
    }
}
