use super::{merge_into_document, Markdown, CHANGELOG_MARKER, DOCUMENT_HEADER, VERSION_HEADING_PREFIX};
use crate::analyzer::{CategorizedCommits, ClassifiedCommit};
use crate::domain::{RepositoryMetadata, Version};
use chrono::{NaiveDate, Utc};

/// Renders changelog sections and full documents for one repository
///
/// The date stamped on version headings is fixed when the composer is built,
/// so every section produced by one composer carries the same day.
#[derive(Debug, Clone)]
pub struct ChangelogComposer {
    repository: RepositoryMetadata,
    date: NaiveDate,
}

impl ChangelogComposer {
    /// Create a composer stamping headings with today's UTC date
    pub fn new(repository: RepositoryMetadata) -> Self {
        ChangelogComposer {
            repository,
            date: Utc::now().date_naive(),
        }
    }

    /// Override the heading date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn repository(&self) -> &RepositoryMetadata {
        &self.repository
    }

    /// Render the section for `version`.
    ///
    /// Categories appear in changelog order and empty ones are omitted. With
    /// `include_heading` off the section starts with a plain `## Changelog`
    /// marker instead of a version heading.
    pub fn render_section(
        &self,
        previous: Option<&Version>,
        version: &Version,
        commits: &CategorizedCommits,
        include_heading: bool,
    ) -> Markdown {
        let mut lines = vec![self.heading(previous, version, include_heading)];

        for (category, entries) in commits.sections() {
            lines.push(format!("### {}", category.title()));
            lines.push(String::new());
            for entry in entries {
                lines.extend(self.format_commit(entry));
            }
            lines.push(String::new());
        }

        lines
    }

    /// Version heading line
    pub fn heading(&self, previous: Option<&Version>, version: &Version, include_heading: bool) -> String {
        let date = self.date.format("%Y-%m-%d");
        match (include_heading, previous) {
            (false, _) => CHANGELOG_MARKER.to_string(),
            (true, Some(previous)) => format!(
                "## [v{}]({}) ({})",
                version,
                self.repository.compare_url(previous, version),
                date
            ),
            (true, None) => format!("## [v{}] Initial Version ({})", version, date),
        }
    }

    /// Bullet for one commit, followed by its body as quoted lines
    pub fn format_commit(&self, entry: &ClassifiedCommit) -> Markdown {
        let commit = &entry.commit;
        let mut lines = vec![format!(
            "- ([`{}`]({})) {}",
            commit.short_id(),
            self.repository.commit_url(&commit.id),
            entry.classification.description
        )];
        lines.extend(
            entry
                .classification
                .body_lines
                .iter()
                .map(|line| format!("  > {}", line)),
        );
        lines
    }

    /// Full changelog document with `section` as the newest entry.
    ///
    /// Any section already present for the same release is replaced; other
    /// history is kept in its original order. Text between the header and
    /// the first version section stays above the new section.
    pub fn compose_document(&self, existing: Option<&[String]>, section: &[String], version: &Version) -> Markdown {
        let mut lines = vec![DOCUMENT_HEADER.to_string(), String::new()];
        let Some(existing) = existing else {
            lines.extend(section.iter().cloned());
            return lines;
        };

        let mut remainder = merge_into_document(existing, Vec::new(), version);
        let intro = remainder
            .iter()
            .position(|line| line.starts_with(VERSION_HEADING_PREFIX))
            .unwrap_or(remainder.len());
        lines.extend(remainder.drain(..intro));
        lines.extend(section.iter().cloned());
        lines.extend(remainder);
        lines
    }
}
