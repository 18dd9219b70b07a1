//! Collaborator boundary for repository access
//!
//! The promotion workflow only talks to the outside world through the traits
//! in this module. Each concern has its own trait so a backend can implement
//! the parts it supports and tests can swap any of them out.
//!
//! # Implementations
//!
//! - [repository::Git2Repository]: commits, tags and branch writes on a local
//!   repository using the `git2` crate
//! - [pulls::PullRequestLedger]: pull requests recorded in a TOML file
//! - [store::FsDocumentStore]: changelog documents on the filesystem
//! - [mock::MockRepository]: in-memory implementation of every trait for tests
//!
//! ```rust
//! # use git_promote::git::CommitSource;
//! # fn example<S: CommitSource>(source: &S) -> git_promote::Result<()> {
//! let commits = source.list_commits_between("main", "develop")?;
//! for commit in commits {
//!     println!("{} {}", commit.short_id(), commit.subject());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod pulls;
pub mod repository;
pub mod store;

pub use mock::MockRepository;
pub use pulls::PullRequestLedger;
pub use repository::Git2Repository;
pub use store::FsDocumentStore;

use crate::changelog::Markdown;
use crate::domain::{Commit, TagRef};
use crate::error::{GitPromoteError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One file written as part of a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path relative to the repository root
    pub path: String,
    pub content: String,
}

impl FileChange {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        FileChange {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// An open pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub draft: bool,
}

/// Read access to commit history
pub trait CommitSource: Send + Sync {
    /// Identifier of the commit at the tip of `branch`
    ///
    /// Fails with `BranchNotFound` when the branch does not exist.
    fn branch_head(&self, branch: &str) -> Result<String>;

    /// Commits reachable from `branch`, newest first.
    ///
    /// With `since` set, commits reachable from that commit are excluded.
    fn list_commits_since(&self, branch: &str, since: Option<&str>) -> Result<Vec<Commit>>;

    /// Commits on `head` that are not on `base`, newest first
    fn list_commits_between(&self, base: &str, head: &str) -> Result<Vec<Commit>>;
}

/// Read access to repository tags
pub trait TagSource: Send + Sync {
    /// Every tag with the commit it points at. Names are returned unparsed.
    fn list_release_tags(&self) -> Result<Vec<TagRef>>;
}

/// Write access to branches
pub trait BranchWriter: Send + Sync {
    /// Create `name` at `at_commit`, or reset it there if it already exists
    fn ensure_branch(&self, name: &str, at_commit: &str) -> Result<()>;

    /// Commit `files` on top of `branch` as a single commit, returning its id
    fn write_files(&self, branch: &str, files: &[FileChange], message: &str) -> Result<String>;
}

/// Pull request management
pub trait PullRequestWriter: Send + Sync {
    /// The single open pull request from `head` into `base`.
    ///
    /// Fails with `PullRequestNotFound` when there is none and
    /// `MultiplePullRequestsFound` when the match is ambiguous.
    fn find_pull_request(&self, head: &str, base: &str) -> Result<PullRequest>;

    fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
        draft: bool,
    ) -> Result<PullRequest>;

    fn edit_pull_request(&self, number: u64, title: &str, body: &str) -> Result<PullRequest>;

    /// Edit the open pull request from `head` into `base`, creating one when
    /// none exists
    fn upsert_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
        draft: bool,
    ) -> Result<PullRequest> {
        match self.find_pull_request(head, base) {
            Ok(existing) => {
                info!(number = existing.number, head, base, "updating pull request");
                self.edit_pull_request(existing.number, title, body)
            }
            Err(GitPromoteError::PullRequestNotFound { .. }) => {
                info!(head, base, "creating pull request");
                self.create_pull_request(head, base, title, body, draft)
            }
            Err(e) => Err(e),
        }
    }
}

/// Storage for line-oriented documents such as the changelog
pub trait DocumentStore: Send + Sync {
    /// Lines of the document, or `None` when it does not exist
    fn read_document(&self, path: &str) -> Result<Option<Markdown>>;

    /// Replace the document with `lines`, each terminated by a newline
    fn write_document(&self, path: &str, lines: &[String]) -> Result<()>;

    /// Raw file contents
    fn read_file(&self, path: &str) -> Result<String>;
}
