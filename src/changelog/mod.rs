//! Changelog rendering and in-place document updates
//!
//! Documents are handled as line sequences. A rendered section is prepended to
//! whatever the existing document keeps after the section for the same version
//! has been filtered out, so regenerating a version replaces it.

pub mod composer;
pub mod merge;

pub use composer::ChangelogComposer;
pub use merge::{merge_into_document, LineFilter};

/// Document lines as read from or written to the changelog file
pub type Markdown = Vec<String>;

/// Top-level heading of every changelog document
pub const DOCUMENT_HEADER: &str = "# Changelog";

/// Heading used when a section is rendered without a version
pub const CHANGELOG_MARKER: &str = "## Changelog";

/// Horizontal rule that may follow the document header
pub const SEPARATOR: &str = "---";

/// Any version heading starts with this
pub const VERSION_HEADING_PREFIX: &str = "## [";

/// Join lines with newlines, without a trailing newline
pub fn to_text(lines: &[String]) -> String {
    lines.join("\n")
}

/// File contents for a document, every line newline-terminated
pub fn to_file(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        let lines = vec!["a".to_string(), "".to_string(), "b".to_string()];
        assert_eq!(to_text(&lines), "a\n\nb");
        assert_eq!(to_text(&[]), "");
        assert_eq!(to_file(&lines), "a\n\nb\n");
    }
}
