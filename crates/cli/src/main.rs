use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::AnalyzeArgs;
use filemeta_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "filemeta",
    version,
    about = "File metadata and hash analyzer (JSON output)"
)]
pub struct Cli {
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    commands::analyze::run(cli.analyze)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
