//! Draft pull requests for working branches
//!
//! A working branch (a feature branch heading into development) gets a draft
//! pull request whose body carries a `## Changelog` section. Text above the
//! marker belongs to the author and survives every update.

use crate::analyzer::CategorizedCommits;
use crate::changelog::{to_text, ChangelogComposer, Markdown, CHANGELOG_MARKER};
use crate::domain::Version;
use crate::error::{GitPromoteError, Result};
use crate::git::{CommitSource, PullRequest, PullRequestWriter};
use tracing::info;

/// Titles longer than this are cut and suffixed with `...`
pub const TITLE_LIMIT: usize = 70;

const NOTES: &str = "You can add your personal notes here (above the 'Changelog' section). To ensure your notes \
and the automated changelog updates are maintained correctly, keep the 'Changelog' marker in place. If the \
'Changelog' marker is removed, the automated updates to the changelog will not occur. Personal notes above the \
'Changelog' will be retained during updates, while content below it will be updated with each new commit.";

const FOOTER: &str = "This Changelog was composed by git-promote";

/// Title taken from a commit message subject
pub fn compose_title(message: &str) -> String {
    let subject = message.trim().lines().next().unwrap_or_default();
    match subject.char_indices().nth(TITLE_LIMIT) {
        Some((cut, _)) => format!("{}...", &subject[..cut]),
        None => subject.to_string(),
    }
}

/// Body for a pull request that does not exist yet
pub fn new_body(changelog: &[String]) -> Markdown {
    let mut body: Markdown = [
        "### :robot: I have created a pull request *beep* *boop*",
        "",
        "### Notes",
        "",
        NOTES,
        "",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect();
    body.extend(changelog.iter().cloned());
    body.extend(["#".to_string(), String::new(), FOOTER.to_string()]);
    body
}

/// Replace everything from the `## Changelog` marker on with `changelog`.
///
/// A body without the marker is returned unchanged.
pub fn update_body(existing: &str, changelog: &[String]) -> Markdown {
    let Some((notes, _)) = existing.split_once(CHANGELOG_MARKER) else {
        return existing.split('\n').map(str::to_string).collect();
    };

    let notes = notes.strip_suffix('\n').unwrap_or(notes);
    let mut body: Markdown = notes.split('\n').map(str::to_string).collect();
    body.extend(changelog.iter().cloned());
    body
}

/// Keeps the draft pull request of a working branch in sync with its commits
pub struct PullRequestHandler<'a> {
    commits: &'a dyn CommitSource,
    pull_requests: &'a dyn PullRequestWriter,
    composer: ChangelogComposer,
}

impl<'a> PullRequestHandler<'a> {
    pub fn new(
        commits: &'a dyn CommitSource,
        pull_requests: &'a dyn PullRequestWriter,
        composer: ChangelogComposer,
    ) -> Self {
        PullRequestHandler {
            commits,
            pull_requests,
            composer,
        }
    }

    /// Create or refresh the draft pull request from `head` into `base`.
    ///
    /// An existing pull request keeps its title.
    pub fn run(&self, head: &str, base: &str) -> Result<PullRequest> {
        let commits = self.commits.list_commits_between(base, head)?;
        let title = commits
            .first()
            .map(|c| compose_title(&c.message))
            .unwrap_or_else(|| head.to_string());

        let categorized = CategorizedCommits::aggregate(commits);
        let changelog = self
            .composer
            .render_section(None, &Version::zero(), &categorized, false);

        match self.pull_requests.find_pull_request(head, base) {
            Ok(existing) => {
                info!(number = existing.number, head, base, "updating pull request changelog");
                let body = update_body(&existing.body, &changelog);
                self.pull_requests
                    .edit_pull_request(existing.number, &existing.title, &to_text(&body))
            }
            Err(GitPromoteError::PullRequestNotFound { .. }) => {
                info!(head, base, "opening draft pull request");
                let body = new_body(&changelog);
                self.pull_requests
                    .create_pull_request(head, base, &title, &to_text(&body), true)
            }
            Err(e) => Err(e),
        }
    }
}
