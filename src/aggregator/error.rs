use crate::model::ids::{SuiteId, TestCaseId};

/// Errors surfaced by the aggregator.
///
/// Only [`AggregatorError::Uninitialized`] is a programmer error. The
/// not-found variants are recoverable: they are returned to the caller and
/// recorded as diagnostics, and the run carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregatorError {
    #[error("aggregator is not initialized; call init() before recording results")]
    Uninitialized,

    #[error("suite {suite_id} is not open")]
    SuiteNotFound { suite_id: SuiteId },

    #[error("test case {case_id} is not open")]
    TestCaseNotFound { case_id: TestCaseId },
}

impl AggregatorError {
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AggregatorError::Uninitialized)
    }
}

pub type AggregatorResult<T> = Result<T, AggregatorError>;
