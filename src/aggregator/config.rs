use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_DIR: &str = "./test-automation-report";
pub const DEFAULT_REPORT_FILE_NAME: &str = "report.html";
pub const UNKNOWN: &str = "Unknown";

/// Per-run settings handed to [`Aggregator::init`](crate::aggregator::Aggregator::init).
///
/// `environment` and `platform` label the summary; the path fields are only
/// read when the report artifact is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_report_file_name")]
    pub report_file_name: String,

    #[serde(default = "default_unknown")]
    pub environment: String,

    #[serde(default = "default_unknown")]
    pub platform: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            report_file_name: default_report_file_name(),
            environment: default_unknown(),
            platform: default_unknown(),
        }
    }
}

impl ReportConfig {
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_report_file_name(mut self, name: impl Into<String>) -> Self {
        self.report_file_name = name.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Full path of the HTML artifact.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file_name)
    }
}

fn default_output_dir() -> PathBuf { PathBuf::from(DEFAULT_OUTPUT_DIR) }
fn default_report_file_name() -> String { DEFAULT_REPORT_FILE_NAME.to_string() }
fn default_unknown() -> String { UNKNOWN.to_string() }
