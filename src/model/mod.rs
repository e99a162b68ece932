pub mod ids;
pub mod report;
pub mod status;
pub mod step;
pub mod suite;
pub mod summary;
pub mod test_case;

pub use ids::{RunId, SuiteId, TestCaseId};
pub use report::Report;
pub use status::{EventType, ParseStatusError, Status, SuiteStatus};
pub use step::{Event, Step};
pub use suite::{CaseTiming, Suite, SuiteState, derive_suite_state};
pub use summary::Summary;
pub use test_case::TestCase;
