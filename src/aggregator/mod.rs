pub mod aggregator;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod error;
mod registry;

pub use aggregator::{Aggregator, Flushed, LifecycleState};
pub use clock::{Clock, SystemClock};
pub use config::ReportConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{AggregatorError, AggregatorResult};
