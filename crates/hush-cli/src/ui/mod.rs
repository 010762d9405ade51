//! Terminal UI utilities.
//!
//! Status lines (banner, warnings, watcher notices) go to stderr. Compiler
//! diagnostics and the suppression summary are printed by
//! [`hush_core::DiagnosticAggregator`] on stdout instead.
//!
//! # Examples
//!
//! ```no_run
//! use hush_cli::ui;
//!
//! ui::init_colors(false);
//! ui::warning("Unknown CLI options received: src");
//! ui::success("Stopped watching");
//! ```

mod banner;
mod messages;

pub use banner::{banner_lines, print_banner};
pub use messages::{info, success, warning};

use crate::logger::should_use_colors;

/// Decide once whether to colorize output and apply it globally.
///
/// `--no-color` always wins; otherwise `NO_COLOR`, `FORCE_COLOR` and the
/// terminal decide. Returns the decision so diagnostics can be formatted the
/// same way.
pub fn init_colors(no_color: bool) -> bool {
    let enabled = !no_color && should_use_colors();
    owo_colors::set_override(enabled);
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
    enabled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_flag_disables_colors() {
        assert!(!init_colors(true));
        owo_colors::unset_override();
    }
}
