//! Hush CLI entry point.
//!
//! Parses arguments, initializes logging and colors, resolves configuration
//! and dispatches to one-shot or watch compilation.

use clap::Parser;
use hush_cli::{cli, commands, config::HushConfig, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    let color = ui::init_colors(args.no_color);

    if let Some(warning) = args.unknown_warning() {
        ui::warning(&warning);
    }

    let result = match HushConfig::load(&args) {
        Ok(config) if config.watch => commands::watch_execute(config, color).await,
        Ok(config) => commands::build_execute(config, color),
        Err(err) => Err(err),
    };

    // Convert CLI errors to miette diagnostics for error reporting
    result.map_err(error::cli_error_to_miette)
}
