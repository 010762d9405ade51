//! Hush CLI - compile TypeScript projects without failing on type errors.
//!
//! This crate wraps `hush-core` in a command-line tool. It resolves the
//! configuration, prints the banner, then either compiles once or keeps
//! compiling on file changes.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`config`] - `hush.toml` / `HUSH_*` / CLI merging with figment
//! - [`commands`] - one-shot build and watch mode
//! - [`watcher`] - notify-based file watcher
//! - [`error`] - CLI error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - banner and status lines on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use clap::Parser;
//! use hush_cli::{cli::Cli, config::HushConfig, error::Result};
//!
//! fn main() -> Result<()> {
//!     let cli = Cli::parse();
//!     let config = HushConfig::load(&cli)?;
//!     hush_cli::commands::build_execute(config, false)
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;
pub mod watcher;

pub use error::{CliError, ConfigError, Result, ResultExt};
