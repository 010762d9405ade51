//! Error handling for the hush CLI.
//!
//! Compiler diagnostics are never errors here: they are printed and counted by
//! the aggregator. The types below cover what stops the process instead: bad
//! configuration, an unknown compiler, unreadable files and watcher failures.
//!
//! # Example
//!
//! ```rust,no_run
//! use hush_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_project(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Pass the project file with --project <path>")
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

mod report;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (invalid values, unreadable hush.toml, ...)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The requested compiler frontend does not exist
    #[error("Cannot find compiler '{name}'\n\nHint: {hint}")]
    CompilerNotFound { name: String, hint: String },

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Errors from hush-core
    #[error(transparent)]
    Core(#[from] hush_core::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// hush.toml or HUSH_* variables could not be merged into a config
    #[error("Failed to load configuration: {0}\n\nHint: Check hush.toml and HUSH_* environment variables")]
    Load(#[from] Box<figment::Error>),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                CliError::Core(hush_core::Error::Io { source, .. })
                    if source.kind() == std::io::ErrorKind::NotFound =>
                {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_not_found_message() {
        let err = CliError::CompilerNotFound {
            name: "tsc".to_string(),
            hint: "Available compilers: oxc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Cannot find compiler 'tsc'"));
        assert!(msg.contains("Hint: Available compilers: oxc"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "rewrite.project".to_string(),
            value: "\"\"".to_string(),
            hint: "Use a non-empty prefix such as \"@lib\"".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'rewrite.project'"));
        assert!(msg.contains("Hint: Use a non-empty prefix"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let config_err = ConfigError::InvalidValue {
            field: "rewrite.base_url".to_string(),
            value: "\"\"".to_string(),
            hint: "Remove the key".to_string(),
        };
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/tsconfig.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_path_for_core_io() {
        let result: std::result::Result<(), hush_core::Error> = Err(hush_core::Error::io(
            "/test/tsconfig.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        ));

        let err = result.with_path("/test/tsconfig.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), CliError> =
            Err(CliError::Custom("bad".to_string()));

        let err = result.with_hint("Try --help").unwrap_err();
        assert!(err.to_string().contains("Hint: Try --help"));
    }
}
