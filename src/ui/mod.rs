//! User interface module.
//!
//! All status output goes to stderr; stdout is reserved for command results.

pub mod formatter;

pub use formatter::{display_error, display_status, display_success, display_version_change, format_version_change};
