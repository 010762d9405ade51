//! Command-line interface definition for hush.
//!
//! hush has a single command: compile the project once, or keep compiling it
//! with `--watch`. Every flag is optional and falls back to `hush.toml`,
//! `HUSH_*` environment variables and finally the built-in defaults.

mod tests;

use clap::Parser;
use std::path::PathBuf;

/// Hush - compile TypeScript, rewrite imports, never fail on type errors
#[derive(Parser, Debug)]
#[command(
    name = "hush",
    version,
    about = "Compile TypeScript while suppressing type errors",
    long_about = "Hush compiles a TypeScript project with the oxc frontend.\n\
                  Every diagnostic is printed and counted but never fails the build,\n\
                  and module specifiers can be rewritten through aliases or a base URL."
)]
pub struct Cli {
    /// Path to tsconfig.json
    ///
    /// Defaults to `tsconfig.json` in the current directory.
    #[arg(short, long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Compiler frontend to use
    ///
    /// Only `oxc` is available. Any other name is reported and the process
    /// exits with status 1.
    #[arg(short, long, value_name = "NAME")]
    pub compiler: Option<String>,

    /// Watch input files and recompile on change
    #[arg(short, long)]
    pub watch: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all log output except errors
    ///
    /// Diagnostics and the suppression summary are still printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Stray positional arguments, reported as a warning
    #[arg(hide = true, value_name = "ARGS")]
    pub unknown: Vec<String>,
}

impl Cli {
    /// Warning text for stray positional arguments, if any were given.
    pub fn unknown_warning(&self) -> Option<String> {
        if self.unknown.is_empty() {
            return None;
        }
        Some(format!(
            "Unknown CLI options received: {}",
            self.unknown.join(", ")
        ))
    }
}
