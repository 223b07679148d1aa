use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Args;
use filemeta_analyzer::{FileAnalyzer, run_batch};
use log::{debug, error};

use crate::printer::{OutputFormat, PrintOutcome, ResultPrinter, make_printer};

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Path(s) to the file(s) to analyze
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Number of files to analyze concurrently
    #[arg(long, short = 'j', default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,
}

pub fn run(args: AnalyzeArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn execute(args: AnalyzeArgs) -> Result<ExitCode> {
    let analyzer = FileAnalyzer::from_env();

    debug!("analyzing {} path(s)", args.files.len());
    let records = run_batch(&analyzer, &args.files, usize::from(args.jobs));

    let mut printer = make_printer(args.format);
    let outcome = printer
        .print_records(&records)
        .context("failed to write results to stdout")?;

    Ok(match outcome {
        PrintOutcome::Written => ExitCode::SUCCESS,
        PrintOutcome::FellBack => ExitCode::from(1),
    })
}
