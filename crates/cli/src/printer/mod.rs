use std::io::{self, Write};

use clap::ValueEnum;
use log::error;
use serde::Serialize;

/// Line written in place of the results when they cannot be encoded.
pub const SERIALIZATION_FALLBACK: &str = r#"[{"error":"Failed to serialize results to JSON"}]"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One compact JSON array on a single line.
    #[default]
    Json,
}

/// How a print run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOutcome {
    Written,
    /// Encoding failed and the fallback line was written instead.
    FellBack,
}

/// Writes the collected records for the calling process.
pub trait ResultPrinter {
    fn print_records<T: Serialize>(&mut self, records: &[T]) -> io::Result<PrintOutcome>;
}

pub struct JsonPrinter<W: Write> {
    out: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl JsonPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ResultPrinter for JsonPrinter<W> {
    fn print_records<T: Serialize>(&mut self, records: &[T]) -> io::Result<PrintOutcome> {
        // Encode everything before touching the output so a failure never
        // leaves half an array behind.
        let (line, outcome) = match serde_json::to_string(records) {
            Ok(line) => (line, PrintOutcome::Written),
            Err(e) => {
                error!("error serializing results to JSON: {e}");
                (SERIALIZATION_FALLBACK.to_owned(), PrintOutcome::FellBack)
            }
        };

        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(outcome)
    }
}

pub fn make_printer(format: OutputFormat) -> JsonPrinter<io::Stdout> {
    match format {
        OutputFormat::Json => JsonPrinter::stdout(),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
