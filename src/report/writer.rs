use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::model::report::Report;
use crate::report::console::format_console_report;
use crate::report::error::ReportError;
use crate::report::html::generate_html_report;
use crate::report::junit::generate_junit_xml;

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Junit,
    Console,
    Json,
}

impl ReportFormat {
    /// File extension used when no explicit output name is given.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Junit => "xml",
            ReportFormat::Console => "txt",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "junit" | "xml" => Ok(ReportFormat::Junit),
            "console" | "text" => Ok(ReportFormat::Console),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Html => "html",
            ReportFormat::Junit => "junit",
            ReportFormat::Console => "console",
            ReportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

pub fn render(report: &Report, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Html => generate_html_report(report),
        ReportFormat::Junit => Ok(generate_junit_xml(report)),
        ReportFormat::Console => Ok(format_console_report(report)),
        ReportFormat::Json => report.to_json_pretty().map_err(ReportError::Serialize),
    }
}

/// Render `report` and write it to `path`, creating parent directories.
pub fn write_report(report: &Report, format: ReportFormat, path: &Path) -> Result<PathBuf, ReportError> {
    let content = render(report, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

pub fn write_html_report(report: &Report, path: &Path) -> Result<PathBuf, ReportError> {
    write_report(report, ReportFormat::Html, path)
}

/// Load a report previously saved as JSON.
pub fn read_report(path: &Path) -> Result<Report, ReportError> {
    let json = fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Report::from_json(&json).map_err(ReportError::Parse)
}
