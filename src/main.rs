use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use covcheck::{CoverageChecker, ExitCode, HttpUploader, NoopUploader, Uploader, WorkDir};

#[derive(Parser)]
#[command(name = "covcheck")]
#[command(about = "Package coverage gate for CI pipelines")]
#[command(version)]
struct Cli {
    /// Path to the test runner's coverage report
    #[arg(long)]
    report: PathBuf,

    /// Path to the per-package minimum coverage table
    #[arg(long)]
    requirement: PathBuf,

    /// Storage endpoint the computed coverage is uploaded to
    /// (upload is skipped when not set)
    #[arg(long)]
    upload_url: Option<String>,

    /// CI job name recorded in the uploaded payload
    #[arg(long, default_value = "local")]
    job: String,

    /// CI build identifier recorded in the uploaded payload
    #[arg(long, default_value = "0")]
    build_id: String,
}

fn main() {
    std::process::exit(run().into());
}

fn run() -> ExitCode {
    let cli = Cli::parse();

    let workdir = match WorkDir::create() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return ExitCode::SetupFailure;
        }
    };

    let uploader: Box<dyn Uploader> = match cli.upload_url {
        Some(ref url) => Box::new(HttpUploader::new(url)),
        None => Box::new(NoopUploader),
    };

    let mut checker = CoverageChecker::new(&cli.report, &cli.requirement, &cli.job, &cli.build_id);
    checker.run(&workdir, uploader.as_ref())
}
