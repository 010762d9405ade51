//! Startup banner and runtime information.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::config::Compiler;

/// Lines printed before the first compilation.
pub fn banner_lines(compiler: Compiler, project: &Path) -> Vec<String> {
    vec![
        format!("hush v{}", env!("CARGO_PKG_VERSION")),
        format!("Using {compiler} frontend"),
        format!("compiler: {compiler}"),
        format!("project: {}", project.display()),
    ]
}

/// Print the banner to stderr.
pub fn print_banner(compiler: Compiler, project: &Path) {
    let mut lines = banner_lines(compiler, project).into_iter();
    if let Some(title) = lines.next() {
        eprintln!("{}", title.if_supports_color(Stream::Stderr, |t| t.bold()));
    }
    for line in lines {
        super::info(&line);
    }
}
