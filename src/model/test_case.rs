use serde::{Deserialize, Serialize};

use crate::model::ids::TestCaseId;
use crate::model::status::Status;
use crate::model::step::{Event, Step};

/// Execution record of a single test.
///
/// `status`, `end_time` and `duration_ms` stay `None` until the case is
/// ended. A case that is never ended serializes them as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: TestCaseId,

    pub name: String,

    pub description: String,

    pub status: Option<Status>,

    #[serde(rename = "duration")]
    pub duration_ms: Option<u64>,

    pub start_time: u64,

    pub end_time: Option<u64>,

    pub environment: String,

    pub platform: String,

    #[serde(default)]
    pub steps: Vec<Step>,

    #[serde(default)]
    pub logs: Vec<String>,

    #[serde(default)]
    pub events: Vec<Event>,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        environment: impl Into<String>,
        platform: impl Into<String>,
        start_time: u64,
    ) -> Self {
        Self {
            id: TestCaseId::new(),
            name: name.into(),
            description: description.into(),
            status: None,
            duration_ms: None,
            start_time,
            end_time: None,
            environment: environment.into(),
            platform: platform.into(),
            steps: Vec::new(),
            logs: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Close the case. Returns `false` (and changes nothing) if it was
    /// already closed.
    pub fn end(&mut self, status: Status, now: u64) -> bool {
        if !self.is_open() {
            return false;
        }
        let end_time = now.max(self.start_time);
        self.end_time = Some(end_time);
        self.duration_ms = Some(end_time - self.start_time);
        self.status = Some(status);
        true
    }
}
