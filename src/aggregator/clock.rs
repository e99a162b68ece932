use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock timestamps, in milliseconds since the UNIX epoch.
///
/// The aggregator takes every timestamp from an injected clock so tests can
/// pin timing without sleeping.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
