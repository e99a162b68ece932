use crate::model::status::Status;
use crate::model::suite::Suite;
use crate::model::summary::Summary;

/// Wall-clock bounds of the run itself: init time and finalize time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunWindow {
    pub started_at: u64,
    pub finished_at: u64,
}

impl RunWindow {
    pub fn duration_ms(&self) -> u64 {
        self.finished_at.saturating_sub(self.started_at)
    }
}

/// Fold every case of every suite into run-wide counts and timing bounds.
///
/// Cases without a status (never ended) count toward `total_test_cases` but
/// toward none of the per-status tallies. Start/end are the earliest case
/// start and the latest known case end; when there is nothing to measure
/// they fall back to the run window. `total_execution_time_ms` is always the
/// run window's length.
pub fn summarize(suites: &[Suite], window: RunWindow, environment: &str, platform: &str) -> Summary {
    let mut total_test_cases = 0;
    let (mut pass, mut fail, mut skip, mut error) = (0, 0, 0, 0);
    let mut start: Option<u64> = None;
    let mut end: Option<u64> = None;

    for case in suites.iter().flat_map(|s| &s.test_cases) {
        total_test_cases += 1;
        match case.status {
            Some(Status::Pass) => pass += 1,
            Some(Status::Fail) => fail += 1,
            Some(Status::Skip) => skip += 1,
            Some(Status::Error) => error += 1,
            None => {}
        }
        start = Some(start.map_or(case.start_time, |s| s.min(case.start_time)));
        if let Some(case_end) = case.end_time {
            end = Some(end.map_or(case_end, |e| e.max(case_end)));
        }
    }

    Summary {
        total_suites: suites.len(),
        total_test_cases,
        pass,
        fail,
        skip,
        error,
        total_execution_time_ms: window.duration_ms(),
        start_time: start.unwrap_or(window.started_at),
        end_time: end.unwrap_or(window.finished_at),
        environment: environment.to_string(),
        platform: platform.to_string(),
    }
}
