//! Human-readable rendering of diagnostics.
//!
//! Output mirrors the usual compiler layout:
//!
//! ```text
//! src/index.ts:3:5 - error H2000: Identifier `a` has already been declared
//! ```

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;

use super::record::{DiagnosticCategory, DiagnosticRecord};

/// How diagnostics are rendered
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    pub color: bool,
    /// Directory file names are shown relative to
    pub current_dir: Option<PathBuf>,
}

impl FormatOptions {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            current_dir: std::env::current_dir().ok(),
        }
    }

    pub fn plain() -> Self {
        Self::default()
    }

    fn display_path(&self, file: &Path) -> String {
        let shown = self
            .current_dir
            .as_deref()
            .and_then(|cwd| file.strip_prefix(cwd).ok())
            .unwrap_or(file);
        shown.display().to_string()
    }
}

/// Render one diagnostic without a trailing newline.
pub fn format_diagnostic(diagnostic: &DiagnosticRecord, options: &FormatOptions) -> String {
    let mut out = String::new();

    if let Some(file) = &diagnostic.file {
        let mut location = options.display_path(file);
        if let Some(position) = diagnostic.position {
            location = format!("{location}:{}:{}", position.line, position.column);
        }
        if options.color {
            out.push_str(&location.cyan().to_string());
        } else {
            out.push_str(&location);
        }
        out.push_str(" - ");
    }

    let category = diagnostic.category.as_str();
    let code = format!("H{}", diagnostic.code);
    if options.color {
        let category = match diagnostic.category {
            DiagnosticCategory::Error => category.red().bold().to_string(),
            DiagnosticCategory::Warning => category.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion | DiagnosticCategory::Message => {
                category.blue().bold().to_string()
            }
        };
        out.push_str(&format!("{category} {}: ", code.dimmed()));
    } else {
        out.push_str(&format!("{category} {code}: "));
    }

    out.push_str(&diagnostic.message);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::codes;

    #[test]
    fn test_plain_with_location() {
        let options = FormatOptions {
            color: false,
            current_dir: Some(PathBuf::from("/repo")),
        };
        let diagnostic = DiagnosticRecord::error(codes::SEMANTIC, "Identifier `a` has already been declared")
            .with_file("/repo/src/index.ts")
            .with_position(3, 5);
        assert_eq!(
            format_diagnostic(&diagnostic, &options),
            "src/index.ts:3:5 - error H2000: Identifier `a` has already been declared"
        );
    }

    #[test]
    fn test_plain_without_file() {
        let diagnostic = DiagnosticRecord::message(codes::WATCH_STARTING, "Starting compilation in watch mode...");
        assert_eq!(
            format_diagnostic(&diagnostic, &FormatOptions::plain()),
            "message H6031: Starting compilation in watch mode..."
        );
    }

    #[test]
    fn test_file_outside_cwd_stays_absolute() {
        let options = FormatOptions {
            color: false,
            current_dir: Some(PathBuf::from("/repo")),
        };
        let diagnostic = DiagnosticRecord::warning(1, "w").with_file("/elsewhere/a.ts");
        assert_eq!(
            format_diagnostic(&diagnostic, &options),
            "/elsewhere/a.ts - warning H1: w"
        );
    }
}
