//! Command implementations for the hush CLI.
//!
//! - [`build`] - compile once and print the suppression summary
//! - [`watch`] - recompile on every file change until Ctrl+C
//!
//! Both start from a validated [`HushConfig`](crate::config::HushConfig), print
//! the banner and load the project before compiling.

pub mod build;
pub mod watch;

pub use build::execute as build_execute;
pub use watch::execute as watch_execute;

use crate::config::HushConfig;
use crate::error::{Result, ResultExt};
use crate::ui;
use hush_core::{ProjectConfig, RewritePass, emit_blocked_warning};

/// Print the banner, load the project and build its rewrite pass, warning
/// when `noEmitOnError` will still block output.
///
/// A missing project file is a [`crate::error::CliError::FileNotFound`].
pub(crate) fn prepare(config: &HushConfig) -> Result<(ProjectConfig, RewritePass)> {
    let compiler = config.compiler()?;
    ui::print_banner(compiler, &config.project);

    let project = ProjectConfig::load(&config.project)
        .with_path(&config.project)
        .with_hint("Pass the project file with --project <path>")?;
    let pass = config.rewrite_pass(&project)?;
    if let Some(warning) = emit_blocked_warning(&project.options) {
        ui::warning(warning);
    }

    tracing::debug!(
        files = project.file_names.len(),
        passthrough = pass.context().is_passthrough(),
        "project loaded"
    );
    Ok((project, pass))
}
