//! Command-line entry point for the tscat bundler

use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::{ArgAction, Parser};
use log::LevelFilter;

use tscat::{
    config::Config,
    orchestrator::{self, BundleOutcome},
};

#[derive(Debug, Parser)]
#[command(
    name = "tscat",
    version,
    about = "Bundles a tree of .ts files into one main bundle (exporting alias objects) and one \
             test bundle (importing them), replacing the original test framework"
)]
struct Cli {
    /// Root directory containing .ts source files
    input_directory: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.input_directory.is_dir() {
        log::error!(
            "Input directory not found: {}",
            cli.input_directory.display()
        );
        return ExitCode::FAILURE;
    }

    let config = match Config::load_for_root(&cli.input_directory) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    match orchestrator::bundle(&cli.input_directory, &config) {
        Ok(BundleOutcome::NoSourceFiles) => {
            println!("No .ts files found. Exiting.");
            ExitCode::SUCCESS
        }
        Ok(BundleOutcome::Bundled(report)) => {
            println!(
                "\nProcess complete in {:.2} seconds.",
                start.elapsed().as_secs_f64()
            );
            println!("Output files generated in: '{}'", config.output_dir.display());
            if let Some(path) = &report.main_output {
                println!(
                    "  - Main bundle: {}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                );
            }
            if let Some(path) = &report.test_output {
                println!(
                    "  - Test bundle: {}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                );
            }
            println!(
                "\nNOTE: Compile output .ts files (e.g., `tsc`) before running the test bundle."
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
