//! Diagnostic records, rendering and the non-fatal aggregator.

mod aggregator;
mod format;
mod record;

pub use aggregator::{DiagnosticAggregator, Diagnostics};
pub use format::{FormatOptions, format_diagnostic};
pub use record::{DiagnosticCategory, DiagnosticRecord, Position, codes};
