use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of a test case or a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Pass,
    Fail,
    Skip,
    Error,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Pass, Status::Fail, Status::Skip, Status::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "Pass",
            Status::Fail => "Fail",
            Status::Skip => "Skip",
            Status::Error => "Error",
        }
    }

    /// Fail and Error both count against a suite.
    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Fail | Status::Error)
    }
}

/// Aggregate outcome of a suite, derived from its cases.
///
/// Error is folded into Fail at this level; the per-case distinction is kept
/// on the cases themselves and in the summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuiteStatus {
    Pass,
    Fail,
    #[serde(rename = "No Tests")]
    NoTests,
}

impl SuiteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuiteStatus::Pass => "Pass",
            SuiteStatus::Fail => "Fail",
            SuiteStatus::NoTests => "No Tests",
        }
    }
}

/// Kind of a timestamped annotation attached to a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Info,
    Warning,
    Error,
    Debug,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Info => "Info",
            EventType::Warning => "Warning",
            EventType::Error => "Error",
            EventType::Debug => "Debug",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" | "passed" => Ok(Status::Pass),
            "fail" | "failed" => Ok(Status::Fail),
            "skip" | "skipped" => Ok(Status::Skip),
            "error" => Ok(Status::Error),
            _ => Err(ParseStatusError {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for EventType {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(EventType::Info),
            "warning" | "warn" => Ok(EventType::Warning),
            "error" => Ok(EventType::Error),
            "debug" => Ok(EventType::Debug),
            _ => Err(ParseStatusError {
                kind: "event type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SuiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
