pub mod assembler;
pub mod console;
pub mod error;
pub mod html;
pub mod junit;
pub mod reducer;
pub mod writer;

pub use error::ReportError;
pub use writer::{ReportFormat, read_report, render, write_html_report, write_report};

/// Human-friendly duration: `850ms`, `12s`, `3m 5s`, `1h 2m`.
pub fn format_duration(ms: u64) -> String {
    if ms < 1_000 {
        return format!("{}ms", ms);
    }
    let seconds = ms / 1_000;
    let (hours, minutes, secs) = (seconds / 3_600, (seconds / 60) % 60, seconds % 60);

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}
