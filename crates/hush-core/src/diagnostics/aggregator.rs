//! Prints diagnostics without ever treating them as fatal.

use std::borrow::Cow;
use std::io::{self, Write};

use owo_colors::OwoColorize;

use super::format::{FormatOptions, format_diagnostic};
use super::record::DiagnosticRecord;

/// Zero, one, or many diagnostics, borrowed where possible.
#[derive(Debug, Clone)]
pub struct Diagnostics<'d>(Cow<'d, [DiagnosticRecord]>);

impl<'d> Diagnostics<'d> {
    pub fn as_slice(&self) -> &[DiagnosticRecord] {
        &self.0
    }
}

impl<'d> From<&'d DiagnosticRecord> for Diagnostics<'d> {
    fn from(diagnostic: &'d DiagnosticRecord) -> Self {
        Self(Cow::Borrowed(std::slice::from_ref(diagnostic)))
    }
}

impl<'d> From<Option<&'d DiagnosticRecord>> for Diagnostics<'d> {
    fn from(diagnostic: Option<&'d DiagnosticRecord>) -> Self {
        match diagnostic {
            Some(diagnostic) => diagnostic.into(),
            None => Self(Cow::Borrowed(&[])),
        }
    }
}

impl<'d> From<&'d [DiagnosticRecord]> for Diagnostics<'d> {
    fn from(diagnostics: &'d [DiagnosticRecord]) -> Self {
        Self(Cow::Borrowed(diagnostics))
    }
}

impl<'d> From<&'d Vec<DiagnosticRecord>> for Diagnostics<'d> {
    fn from(diagnostics: &'d Vec<DiagnosticRecord>) -> Self {
        Self(Cow::Borrowed(diagnostics.as_slice()))
    }
}

impl From<DiagnosticRecord> for Diagnostics<'static> {
    fn from(diagnostic: DiagnosticRecord) -> Self {
        Self(Cow::Owned(vec![diagnostic]))
    }
}

impl From<Vec<DiagnosticRecord>> for Diagnostics<'static> {
    fn from(diagnostics: Vec<DiagnosticRecord>) -> Self {
        Self(Cow::Owned(diagnostics))
    }
}

/// Writes diagnostics and the suppression summary to a sink.
///
/// Nothing here can fail the compilation: write errors are logged and dropped.
#[derive(Debug)]
pub struct DiagnosticAggregator<W: Write> {
    out: W,
    format: FormatOptions,
}

impl DiagnosticAggregator<io::Stdout> {
    pub fn stdout(format: FormatOptions) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> DiagnosticAggregator<W> {
    pub fn new(out: W, format: FormatOptions) -> Self {
        Self { out, format }
    }

    pub fn format_options(&self) -> &FormatOptions {
        &self.format
    }

    /// Print each diagnostic on its own line. Returns how many were printed.
    pub fn summarize<'d>(&mut self, diagnostics: impl Into<Diagnostics<'d>>) -> usize {
        let diagnostics = diagnostics.into();
        for diagnostic in diagnostics.as_slice() {
            let line = format_diagnostic(diagnostic, &self.format);
            self.write_line(&line);
        }
        diagnostics.as_slice().len()
    }

    /// Report how many diagnostics were suppressed, then declare success.
    pub fn report_suppression(&mut self, count: usize) {
        if count > 0 {
            self.warning(&format!("Suppressed errors: {count}"));
        } else {
            self.info("No errors found.");
        }
        self.info("Compilation completed successfully.");
    }

    pub fn info(&mut self, message: &str) {
        let label = if self.format.color {
            "info".blue().bold().to_string()
        } else {
            "info".to_string()
        };
        self.write_line(&format!("{label} {message}"));
    }

    pub fn warning(&mut self, message: &str) {
        let label = if self.format.color {
            "warning".yellow().bold().to_string()
        } else {
            "warning".to_string()
        };
        self.write_line(&format!("{label} {message}"));
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        let result = writeln!(self.out, "{line}").and_then(|()| self.out.flush());
        if let Err(err) = result {
            tracing::warn!("Failed to write diagnostic output: {}", err);
        }
    }
}
