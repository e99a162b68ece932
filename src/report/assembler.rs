use crate::model::ids::RunId;
use crate::model::report::Report;
use crate::model::suite::Suite;
use crate::model::summary::Summary;

/// Package suites and their summary under a fresh run id.
pub fn assemble(suites: Vec<Suite>, summary: Summary) -> Report {
    Report {
        id: RunId::new(),
        suites,
        summary,
    }
}
