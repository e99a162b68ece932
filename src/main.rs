use clap::Parser;
use test_report::cli::commands::{cmd_demo, cmd_render};
use test_report::cli::config::{Cli, Commands, build_demo_config, build_report_config, load_config};
use test_report::telemetry;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose)?;
    let config = load_config(cli.config.as_deref());

    let all_passed = match cli.command {
        Commands::Demo {
            suites,
            cases,
            workers,
            seed,
            report,
        } => {
            let demo = build_demo_config(&config.demo, suites, cases, workers);
            let report_config = build_report_config(&config.report, &report);
            cmd_demo(&demo, report_config, seed, cli.verbose)?
        }
        Commands::Render {
            input,
            format,
            output,
        } => cmd_render(&input, &format, output.as_deref(), cli.verbose)?,
    };

    if !all_passed {
        std::process::exit(1);
    }

    Ok(())
}
