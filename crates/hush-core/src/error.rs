//! Error types for rewriting and compiling

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while configuring or driving a compilation
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// An alias key is not a valid regular expression
    #[error("Invalid alias pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(hush::config::invalid_alias),
        help("Alias keys are regular expressions, e.g. \"^@app/(.*)$\"")
    )]
    InvalidAlias { pattern: String, reason: String },

    /// A rewrite option has an unusable value
    #[error("Invalid rewrite option '{option}': {reason}")]
    #[diagnostic(code(hush::config::invalid_option))]
    InvalidOption { option: String, reason: String },

    /// Reading a project file failed
    #[error("Failed to read '{}': {source}", path.display())]
    #[diagnostic(code(hush::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an InvalidAlias error
    pub fn invalid_alias(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAlias {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidOption error
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A single specifier could not be rewritten
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// A relative specifier resolved to a location that does not contain `base_url`
    #[error(
        "'{specifier}' resolves to '{}', which is outside the base directory '{}'",
        resolved.display(),
        base_url.display()
    )]
    #[diagnostic(
        code(hush::rewrite::outside_base_url),
        help("Move the imported file under the base directory or give it an alias")
    )]
    OutsideBaseUrl {
        specifier: String,
        resolved: PathBuf,
        base_url: PathBuf,
    },
}

/// A rewrite failure located in a source unit
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("Cannot rewrite module specifier in '{}': {source}", file.display())]
#[diagnostic(code(hush::rewrite::failed))]
pub struct TransformError {
    pub file: PathBuf,
    /// Byte offset of the offending string literal
    pub offset: u32,
    #[source]
    pub source: RewriteError,
}

/// Result type for hush operations
pub type Result<T> = std::result::Result<T, Error>;
