use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::aggregator::{Aggregator, ReportConfig};
use crate::cli::config::DemoConfig;
use crate::model::ids::{SuiteId, TestCaseId};
use crate::model::status::{EventType, Status};
use crate::report::console::format_console_report;
use crate::report::{ReportFormat, read_report, render, write_report};

// ============================================================================
// demo subcommand
// ============================================================================

const CASE_NAMES: [&str; 9] = [
    "User Login Functionality",
    "Product Search Results",
    "Add to Cart Flow",
    "Checkout Process Completion",
    "Order History Verification",
    "Profile Update Details",
    "Payment Gateway Integration",
    "Dashboard Data Display",
    "Forgot Password Flow",
];

const STEP_DESCRIPTIONS: [&str; 9] = [
    "Navigate to URL",
    "Enter credentials",
    "Click login button",
    "Verify element visibility",
    "Submit form data",
    "Wait for AJAX call to complete",
    "Select item from dropdown",
    "Validate API response",
    "Capture screenshot",
];

const ENVIRONMENTS: [&str; 4] = ["QA", "Staging", "Production", "Development"];
const PLATFORMS: [&str; 4] = ["Web - Chrome", "Web - Firefox", "Mobile - Android", "API - REST"];
const LOG_LEVELS: [&str; 4] = ["INFO", "DEBUG", "WARN", "ERROR"];

/// Simulate a test run: suites are opened up front, then `workers` threads
/// pull (suite, case) jobs and report steps, logs and events concurrently.
/// Writes the HTML report, plus a `.json` copy next to it for `render`, and
/// returns whether every case passed.
pub fn cmd_demo(
    demo: &DemoConfig,
    report_config: ReportConfig,
    seed: Option<u64>,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let seed = seed.unwrap_or_else(rand::random);
    let json_path = report_config.report_path().with_extension(ReportFormat::Json.extension());
    let aggregator = Aggregator::new();
    aggregator.init(report_config);

    info!(
        suites = demo.suites,
        cases = demo.cases,
        workers = demo.workers,
        seed,
        "starting demo run"
    );

    let suite_ids: Vec<SuiteId> = (1..=demo.suites)
        .map(|i| aggregator.start_suite(&format!("Feature Suite {}", i)))
        .collect::<Result<_, _>>()?;

    let jobs: Vec<(usize, usize)> = (0..suite_ids.len())
        .flat_map(|s| (0..demo.cases).map(move |c| (s, c)))
        .collect();
    let next = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for _ in 0..demo.workers {
            scope.spawn(|| {
                loop {
                    let job = next.fetch_add(1, Ordering::Relaxed);
                    let Some(&(suite, case)) = jobs.get(job) else { break };
                    let mut rng = StdRng::seed_from_u64(seed ^ ((job as u64) << 8));
                    if let Err(err) = simulate_case(&aggregator, suite_ids[suite], case + 1, &mut rng) {
                        warn!(error = %err, "simulated case aborted");
                    }
                }
            });
        }
    });

    for suite_id in suite_ids {
        aggregator.end_suite(suite_id)?;
    }

    let flushed = aggregator.flush()?;
    if verbose > 0 || flushed.artifact.is_none() {
        print!("{}", format_console_report(&flushed.report));
    }
    match &flushed.artifact {
        Some(path) => println!("Report written to {}", path.display()),
        None => eprintln!("Report could not be written; see log output"),
    }
    match write_report(&flushed.report, ReportFormat::Json, &json_path) {
        Ok(path) => println!("Report data written to {}", path.display()),
        Err(err) => warn!(error = %err, "failed to save report JSON"),
    }

    Ok(!flushed.report.has_failures())
}

/// Report one simulated test case. Mirrors what a framework listener does:
/// start, record steps/logs/events, decide the outcome, end.
pub fn simulate_case(
    aggregator: &Aggregator,
    suite_id: SuiteId,
    ordinal: usize,
    rng: &mut StdRng,
) -> Result<Option<TestCaseId>, crate::aggregator::AggregatorError> {
    let name = CASE_NAMES[rng.gen_range(0..CASE_NAMES.len())];
    let Some(case_id) = aggregator.start_test_case(
        suite_id,
        &format!("{} - Test #{}", name, ordinal),
        &format!("Verifies the {}", CASE_NAMES[ordinal % CASE_NAMES.len()].to_lowercase()),
        ENVIRONMENTS[rng.gen_range(0..ENVIRONMENTS.len())],
        PLATFORMS[rng.gen_range(0..PLATFORMS.len())],
    )?
    else {
        return Ok(None);
    };

    for index in 0..rng.gen_range(3..=7) {
        let status = if rng.gen_bool(0.15) {
            [Status::Fail, Status::Skip, Status::Error][rng.gen_range(0..3)]
        } else {
            Status::Pass
        };
        let description = STEP_DESCRIPTIONS[rng.gen_range(0..STEP_DESCRIPTIONS.len())];
        aggregator.add_step(case_id, description, status, rng.gen_range(50..1_050))?;
        aggregator.add_log(
            case_id,
            &format!(
                "{}: Step {} executed - {}",
                LOG_LEVELS[rng.gen_range(0..LOG_LEVELS.len())],
                index + 1,
                description
            ),
        )?;
    }

    if rng.gen_bool(0.10) {
        aggregator.add_event(case_id, EventType::Warning, "Application warning: Data might be inconsistent.")?;
    }
    if rng.gen_bool(0.05) {
        aggregator.add_event(case_id, EventType::Error, "Critical error during API call: Connection refused.")?;
    }

    let step_failed = aggregator
        .open_test_case(case_id)?
        .is_some_and(|tc| tc.steps.iter().any(|s| s.status.is_failure()));
    let status = if step_failed {
        Status::Fail
    } else {
        match rng.gen_range(0..100) {
            0..85 => Status::Pass,
            85..90 => Status::Skip,
            90..95 => Status::Fail,
            _ => Status::Error,
        }
    };
    aggregator.end_test_case(case_id, status)?;
    Ok(Some(case_id))
}

// ============================================================================
// render subcommand
// ============================================================================

/// Re-render a saved report and return whether it is free of failures.
pub fn cmd_render(
    input: &str,
    format: &str,
    output: Option<&str>,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let format: ReportFormat = format.parse()?;
    let report = read_report(std::path::Path::new(input))?;

    if verbose > 0 {
        eprintln!(
            "Rendering run {} ({} suites) as {}",
            report.id, report.summary.total_suites, format
        );
    }

    match output {
        Some(path) => {
            let written = write_report(&report, format, std::path::Path::new(path))?;
            eprintln!("Report written to {}", written.display());
        }
        None => print!("{}", render(&report, format)?),
    }

    Ok(!report.has_failures())
}
