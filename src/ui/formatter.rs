//! Formatting functions for terminal output.
//!
//! The `format_*` functions are pure and return the text; the `display_*`
//! functions print it with `console` styling.

use crate::domain::{Increment, Version};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// `v1.2.3 -> v1.3.0 (minor)`, or `v0.0.0 (initial)` without a previous release
pub fn format_version_change(previous: Option<&Version>, next: &Version, increment: Increment) -> String {
    match previous {
        Some(previous) => format!("v{} -> v{} ({})", previous, next, increment),
        None => format!("v{} (initial)", next),
    }
}

/// Display the version a run produced.
pub fn display_version_change(previous: Option<&Version>, next: &Version, increment: Increment) {
    eprintln!(
        "\n{} {}",
        style("Next version:").bold(),
        style(format_version_change(previous, next, increment)).green()
    );
}
