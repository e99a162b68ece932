use std::path::PathBuf;

/// Failures of the rendering and artifact-writing layer. None of these
/// affect the aggregator; the report is already complete in memory.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse report JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("unknown report format '{0}' (expected html, junit, console or json)")]
    UnknownFormat(String),
}
