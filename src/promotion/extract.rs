use crate::domain::{Commit, ParsedCommit};
use crate::error::Result;
use crate::git::CommitSource;
use tracing::debug;

/// The newest conventional commit on a branch, with its parsed fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCommit {
    pub commit: Commit,
    pub parsed: ParsedCommit,
}

impl ExtractedCommit {
    /// Key/value pairs reported for the commit; absent fields are `None`
    pub fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        let parsed = &self.parsed;
        vec![
            ("type", Some(parsed.r#type.clone())),
            ("description", Some(parsed.description.clone())),
            ("scope", parsed.scope.clone()),
            ("exclamation", Some(parsed.exclamation.to_string())),
            ("body", parsed.body.clone()),
            ("footers", parsed.joined_footers()),
        ]
    }
}

/// Walk `branch` newest first and parse the first conventional commit.
///
/// Returns `None` when no commit on the branch follows the grammar.
pub fn latest_conventional_commit(source: &dyn CommitSource, branch: &str) -> Result<Option<ExtractedCommit>> {
    for commit in source.list_commits_since(branch, None)? {
        match ParsedCommit::parse(&commit.message) {
            Some(parsed) => return Ok(Some(ExtractedCommit { commit, parsed })),
            None => debug!(id = %commit.short_id(), "skipping non-conventional commit"),
        }
    }
    Ok(None)
}
