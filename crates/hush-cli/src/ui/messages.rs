//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Stream, Style};

fn symbol(symbol: &'static &'static str, style: Style) -> impl std::fmt::Display {
    symbol.if_supports_color(Stream::Stderr, move |s| s.style(style))
}

/// Print a success message to stderr.
///
/// # Examples
///
/// ```no_run
/// use hush_cli::ui::success;
///
/// success("Compilation finished");
/// ```
pub fn success(message: &str) {
    eprintln!("{} {}", symbol(&"✓", Style::new().green().bold()), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", symbol(&"ℹ", Style::new().blue().bold()), message);
}

/// Print a warning message to stderr.
///
/// # Examples
///
/// ```no_run
/// use hush_cli::ui::warning;
///
/// warning("Unknown CLI options received: src");
/// ```
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        symbol(&"⚠", Style::new().yellow().bold()),
        message.if_supports_color(Stream::Stderr, |m| m.yellow())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        // These should not panic
        success("Success message");
        info("Info message");
        warning("Warning message");
    }
}
