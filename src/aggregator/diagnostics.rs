use parking_lot::Mutex;
use serde::Serialize;

/// What kind of recoverable condition was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    SuiteNotFound,
    TestCaseNotFound,
    ArtifactWriteFailed,
}

/// A recoverable condition recorded for operator visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub timestamp_ms: u64,
    pub kind: DiagnosticKind,
    pub operation: &'static str,
    pub message: String,
}

/// Append-only collector shared by all callers of one aggregator.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn record(&self, diagnostic: Diagnostic) {
        self.entries.lock().push(diagnostic);
    }

    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
