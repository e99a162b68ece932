use std::path::Path;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::aggregator::config::ReportConfig;

pub const DEFAULT_CONFIG_FILE: &str = "test-report.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "test-report",
    version,
    about = "Collect concurrent test results and render self-contained reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: test-report.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drive the aggregator from worker threads with simulated results
    Demo {
        /// Number of suites to simulate
        #[arg(long)]
        suites: Option<usize>,

        /// Test cases per suite
        #[arg(long)]
        cases: Option<usize>,

        /// Worker threads reporting concurrently
        #[arg(long)]
        workers: Option<usize>,

        /// Seed for reproducible outcomes
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Re-render a report saved as JSON
    Render {
        /// Report JSON file
        #[arg(long)]
        input: String,

        /// Output format: html, junit, console, json
        #[arg(long, default_value = "html")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Report settings that override the config file.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ReportArgs {
    /// Directory the HTML report is written to
    #[arg(long)]
    pub output_dir: Option<String>,

    /// File name of the HTML report
    #[arg(long)]
    pub report_file_name: Option<String>,

    /// Environment label for the summary
    #[arg(long)]
    pub environment: Option<String>,

    /// Platform label for the summary
    #[arg(long)]
    pub platform: Option<String>,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `test-report.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_three")]
    pub suites: usize,

    #[serde(default = "default_five")]
    pub cases: usize,

    #[serde(default = "default_four")]
    pub workers: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            suites: 3,
            cases: 5,
            workers: 4,
        }
    }
}

// Serde default helpers
fn default_three() -> usize { 3 }
fn default_four() -> usize { 4 }
fn default_five() -> usize { 5 }

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Read and parse a config file. `Ok(None)` when the file does not exist.
pub fn try_load_config(path: &str) -> Result<Option<AppConfig>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Some(AppConfig::default()));
    }
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
}

/// Load config from a YAML file. Returns defaults if the file is missing or
/// malformed; a malformed file is logged.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match try_load_config(config_path) {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            warn!(error = %err, "ignoring config file, using defaults");
            AppConfig::default()
        }
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Resolve the report config: CLI flag > config file > default.
pub fn build_report_config(file: &ReportConfig, args: &ReportArgs) -> ReportConfig {
    let mut config = file.clone();
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(name) = &args.report_file_name {
        config = config.with_report_file_name(name.as_str());
    }
    if let Some(environment) = &args.environment {
        config = config.with_environment(environment.as_str());
    }
    if let Some(platform) = &args.platform {
        config = config.with_platform(platform.as_str());
    }
    config
}

/// Resolve demo sizing: CLI flag > config file > default. Zero workers is
/// bumped to one.
pub fn build_demo_config(
    file: &DemoConfig,
    suites: Option<usize>,
    cases: Option<usize>,
    workers: Option<usize>,
) -> DemoConfig {
    DemoConfig {
        suites: suites.unwrap_or(file.suites),
        cases: cases.unwrap_or(file.cases),
        workers: workers.unwrap_or(file.workers).max(1),
    }
}
