use super::{DOCUMENT_HEADER, SEPARATOR, VERSION_HEADING_PREFIX};
use crate::domain::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterState {
    Normal,
    InMatchingSection,
}

/// Forward-only filter that drops the document header and every section for
/// one version from an existing changelog.
///
/// The version heading is matched on `## [v<major>.<minor>.<patch>` so a
/// release replaces the sections of its own prereleases. A match requires the
/// prefix to be followed by `]`, `-`, `+` or the end of the line, keeping
/// `1.1.0` from matching `1.1.01`.
#[derive(Debug, Clone)]
pub struct LineFilter {
    heading: String,
    state: FilterState,
    skip_separator: bool,
    skip_blank: bool,
}

impl LineFilter {
    pub fn new(version: &Version) -> Self {
        LineFilter {
            heading: format!("{}v{}", VERSION_HEADING_PREFIX, version.release()),
            state: FilterState::Normal,
            skip_separator: false,
            skip_blank: false,
        }
    }

    /// Evaluate one line, returning whether it is kept.
    ///
    /// The separator and blank flags only apply to the line right after the
    /// one that set them.
    pub fn keep(&mut self, line: &str) -> bool {
        let skip_separator = std::mem::take(&mut self.skip_separator);
        let skip_blank = std::mem::take(&mut self.skip_blank);

        if line.starts_with(DOCUMENT_HEADER) {
            self.skip_separator = true;
            self.skip_blank = true;
            return false;
        }

        if self.matches_version(line) {
            self.state = FilterState::InMatchingSection;
            return false;
        }

        if self.state == FilterState::InMatchingSection && line.starts_with(VERSION_HEADING_PREFIX) {
            self.state = FilterState::Normal;
        }

        if skip_separator && line.trim_end() == SEPARATOR {
            self.skip_blank = true;
            return false;
        }

        if skip_blank && line.trim().is_empty() {
            return false;
        }

        self.state == FilterState::Normal
    }

    fn matches_version(&self, line: &str) -> bool {
        match line.strip_prefix(self.heading.as_str()) {
            Some(rest) => matches!(rest.chars().next(), None | Some(']') | Some('-') | Some('+')),
            None => false,
        }
    }
}

/// Prepend `new_lines` to the lines of `existing` that survive a
/// [`LineFilter`] for `version`.
///
/// Text between the document header and the first version section ends up
/// below `new_lines` and is then dropped as part of that section on the next
/// merge for the same release. Callers keeping such text split it off first,
/// as [`ChangelogComposer::compose_document`](super::ChangelogComposer::compose_document) does.
pub fn merge_into_document(existing: &[String], new_lines: Vec<String>, version: &Version) -> Vec<String> {
    let mut filter = LineFilter::new(version);
    let mut merged = new_lines;
    merged.extend(existing.iter().filter(|line| filter.keep(line)).cloned());
    merged
}
