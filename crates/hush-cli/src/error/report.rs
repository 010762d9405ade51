//! Miette diagnostic conversion for CLI errors.

use miette::Report;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        // Core errors carry their own diagnostic codes and help text
        CliError::Core(e) => Report::new(e),
        CliError::CompilerNotFound { name, hint } => {
            miette::miette!(code = "hush::compiler_not_found", help = hint, "Cannot find compiler '{}'", name)
        }
        _ => miette::miette!("{}", err),
    }
}
