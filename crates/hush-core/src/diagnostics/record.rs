use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Diagnostic codes produced by the oxc frontend and the watch driver.
pub mod codes {
    /// Source could not be parsed
    pub const SYNTAX: u32 = 1000;
    /// Parsed source violates a semantic rule (redeclaration, bad `await`, ...)
    pub const SEMANTIC: u32 = 2000;
    /// Declaration emit needs an explicit type annotation
    pub const DECLARATION: u32 = 9007;
    /// Project configuration file could not be read or parsed
    pub const CONFIG: u32 = 5083;
    /// An input file could not be read
    pub const FILE_NOT_FOUND: u32 = 6053;
    /// Output file could not be written
    pub const EMIT: u32 = 5033;
    /// A module specifier could not be rewritten
    pub const REWRITE: u32 = 6059;
    /// The project configuration matched no input files
    pub const NO_INPUTS: u32 = 18003;
    /// Watch status: initial compilation started
    pub const WATCH_STARTING: u32 = 6031;
    /// Watch status: a change was detected and a new compilation started
    pub const WATCH_FILE_CHANGE: u32 = 6032;
    /// Watch status: compilation finished, watching for changes
    pub const WATCH_DONE: u32 = 6194;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Error,
    Warning,
    Suggestion,
    Message,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based line and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Convert a byte offset in `source_text` to a line and column.
    pub fn from_offset(source_text: &str, offset: u32) -> Self {
        let offset = (offset as usize).min(source_text.len());
        let before = source_text.get(..offset).unwrap_or(source_text);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        let column = before[line_start..].chars().count() + 1;
        Self {
            line: u32::try_from(line).unwrap_or(u32::MAX),
            column: u32::try_from(column).unwrap_or(u32::MAX),
        }
    }
}

/// One diagnostic as reported by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl DiagnosticRecord {
    pub fn new(category: DiagnosticCategory, code: u32, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
            file: None,
            position: None,
        }
    }

    pub fn error(code: u32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Error, code, message)
    }

    pub fn warning(code: u32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Warning, code, message)
    }

    pub fn message(code: u32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Message, code, message)
    }

    pub fn with_file(mut self, file: impl AsRef<Path>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.position = Some(Position { line, column });
        self
    }

    /// Locate the diagnostic at a byte offset of `source_text`.
    pub fn at_offset(mut self, source_text: &str, offset: u32) -> Self {
        self.position = Some(Position::from_offset(source_text, offset));
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}
