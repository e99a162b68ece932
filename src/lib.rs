//! Concurrent test-result aggregation.
//!
//! A test driver reports suites, cases, steps, logs and events to an
//! [`Aggregator`](aggregator::Aggregator) from any number of threads. On
//! finalize the recorded tree is reduced into a [`Summary`](model::Summary)
//! and packaged as a serializable [`Report`](model::Report), which the
//! [`report`] module renders as self-contained HTML, JUnit XML or plain text.

pub mod aggregator;
pub mod cli;
pub mod model;
pub mod report;
pub mod telemetry;
