use serde::{Deserialize, Serialize};

use crate::model::ids::entry_id;
use crate::model::status::{EventType, Status};

/// A discrete action within a test case. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,

    pub description: String,

    pub status: Status,

    /// Reported by the driver, in milliseconds
    #[serde(rename = "duration")]
    pub duration_ms: u64,
}

impl Step {
    pub fn new(description: impl Into<String>, status: Status, duration_ms: u64) -> Self {
        Self {
            id: entry_id(),
            description: description.into(),
            status,
            duration_ms,
        }
    }
}

/// A timestamped, typed annotation on a test case, distinct from plain logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,

    /// Milliseconds since the UNIX epoch
    pub timestamp: u64,

    #[serde(rename = "type")]
    pub event_type: EventType,

    pub message: String,
}

impl Event {
    pub fn new(timestamp: u64, event_type: EventType, message: impl Into<String>) -> Self {
        Self {
            id: entry_id(),
            timestamp,
            event_type,
            message: message.into(),
        }
    }
}
