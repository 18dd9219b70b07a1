use crate::changelog::{to_file, Markdown};
use crate::domain::{Commit, TagRef};
use crate::error::{GitPromoteError, Result};
use crate::git::{
    BranchWriter, CommitSource, DocumentStore, FileChange, PullRequest, PullRequestWriter, TagSource,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// A commit recorded by [`BranchWriter::write_files`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub branch: String,
    pub files: Vec<FileChange>,
    pub message: String,
}

#[derive(Debug, Default)]
struct MockState {
    branches: HashMap<String, Vec<Commit>>,
    tags: Vec<TagRef>,
    documents: HashMap<String, Markdown>,
    files: HashMap<String, String>,
    pull_requests: Vec<PullRequest>,
    commits_written: Vec<RecordedCommit>,
    failing: HashSet<String>,
}

/// In-memory repository implementing every collaborator trait
///
/// Branch histories are stored oldest first. Writes are recorded so tests can
/// assert on what a workflow would have changed.
#[derive(Debug, Default)]
pub struct MockRepository {
    state: Mutex<MockState>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository::default()
    }

    /// Append a commit to a branch, creating the branch if needed
    pub fn add_commit(&self, branch: &str, commit: Commit) {
        self.state().branches.entry(branch.to_string()).or_default().push(commit);
    }

    /// Create `branch` with the same history as `from`
    pub fn fork_branch(&self, from: &str, branch: &str) {
        let mut state = self.state();
        let history = state.branches.get(from).cloned().unwrap_or_default();
        state.branches.insert(branch.to_string(), history);
    }

    /// Add a tag pointing at a commit
    pub fn add_tag(&self, name: &str, commit_id: &str) {
        self.state().tags.push(TagRef::new(name, commit_id));
    }

    /// Seed a stored document
    pub fn set_document(&self, path: &str, lines: Vec<String>) {
        self.state().documents.insert(path.to_string(), lines);
    }

    /// Seed a plain file
    pub fn set_file(&self, path: &str, content: &str) {
        self.state().files.insert(path.to_string(), content.to_string());
    }

    /// Seed an open pull request
    pub fn add_pull_request(&self, pr: PullRequest) {
        self.state().pull_requests.push(pr);
    }

    /// Make every call to `operation` fail with a remote error
    pub fn fail_on(&self, operation: &str) {
        self.state().failing.insert(operation.to_string());
    }

    pub fn document(&self, path: &str) -> Option<Markdown> {
        self.state().documents.get(path).cloned()
    }

    pub fn pull_requests(&self) -> Vec<PullRequest> {
        self.state().pull_requests.clone()
    }

    pub fn commits_written(&self) -> Vec<RecordedCommit> {
        self.state().commits_written.clone()
    }

    /// Ids on `branch`, oldest first
    pub fn history(&self, branch: &str) -> Vec<String> {
        self.state()
            .branches
            .get(branch)
            .map(|commits| commits.iter().map(|c| c.id.clone()).collect())
            .unwrap_or_default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A test that panicked while holding the lock already failed.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(&self, operation: &str) -> Result<MutexGuard<'_, MockState>> {
        let state = self.state();
        if state.failing.contains(operation) {
            return Err(GitPromoteError::remote(format!("{} failed", operation)));
        }
        Ok(state)
    }
}

fn history<'a>(state: &'a MockState, branch: &str) -> Result<&'a Vec<Commit>> {
    state
        .branches
        .get(branch)
        .ok_or_else(|| GitPromoteError::branch_not_found(branch))
}

fn newest_first(commits: impl DoubleEndedIterator<Item = Commit>) -> Vec<Commit> {
    commits.rev().collect()
}

impl CommitSource for MockRepository {
    fn branch_head(&self, branch: &str) -> Result<String> {
        let state = self.check("branch_head")?;
        history(&state, branch)?
            .last()
            .map(|c| c.id.clone())
            .ok_or_else(|| GitPromoteError::branch_not_found(format!("{} (empty)", branch)))
    }

    fn list_commits_since(&self, branch: &str, since: Option<&str>) -> Result<Vec<Commit>> {
        let state = self.check("list_commits_since")?;
        let commits = history(&state, branch)?;
        let start = since
            .and_then(|id| commits.iter().position(|c| c.id == id))
            .map(|index| index + 1)
            .unwrap_or(0);
        Ok(newest_first(commits[start..].iter().cloned()))
    }

    fn list_commits_between(&self, base: &str, head: &str) -> Result<Vec<Commit>> {
        let state = self.check("list_commits_between")?;
        let on_base: HashSet<&str> = history(&state, base)?.iter().map(|c| c.id.as_str()).collect();
        let commits = history(&state, head)?
            .iter()
            .filter(|c| !on_base.contains(c.id.as_str()))
            .cloned();
        Ok(newest_first(commits))
    }
}

impl TagSource for MockRepository {
    fn list_release_tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.check("list_release_tags")?.tags.clone())
    }
}

impl BranchWriter for MockRepository {
    fn ensure_branch(&self, name: &str, at_commit: &str) -> Result<()> {
        let mut state = self.check("ensure_branch")?;
        let history = state
            .branches
            .values()
            .find_map(|commits| {
                commits
                    .iter()
                    .position(|c| c.id == at_commit)
                    .map(|index| commits[..=index].to_vec())
            })
            .ok_or_else(|| GitPromoteError::remote(format!("Unknown commit {}", at_commit)))?;
        state.branches.insert(name.to_string(), history);
        Ok(())
    }

    fn write_files(&self, branch: &str, files: &[FileChange], message: &str) -> Result<String> {
        let mut state = self.check("write_files")?;
        let count = state.commits_written.len();
        let parent = history(&state, branch)?
            .last()
            .map(|c| c.timestamp)
            .unwrap_or_default();

        let id = format!("{:040x}", count + 1);
        state
            .branches
            .entry(branch.to_string())
            .or_default()
            .push(Commit::new(id.clone(), message, parent));
        state.commits_written.push(RecordedCommit {
            branch: branch.to_string(),
            files: files.to_vec(),
            message: message.to_string(),
        });
        Ok(id)
    }
}

impl PullRequestWriter for MockRepository {
    fn find_pull_request(&self, head: &str, base: &str) -> Result<PullRequest> {
        let state = self.check("find_pull_request")?;
        let found: Vec<&PullRequest> = state
            .pull_requests
            .iter()
            .filter(|pr| pr.head == head && pr.base == base)
            .collect();
        match found.as_slice() {
            [pr] => Ok((*pr).clone()),
            [] => Err(GitPromoteError::PullRequestNotFound {
                head: head.to_string(),
                base: base.to_string(),
            }),
            _ => Err(GitPromoteError::MultiplePullRequestsFound {
                head: head.to_string(),
                base: base.to_string(),
            }),
        }
    }

    fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
        draft: bool,
    ) -> Result<PullRequest> {
        let mut state = self.check("create_pull_request")?;
        let pr = PullRequest {
            number: state.pull_requests.len() as u64 + 1,
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            draft,
        };
        state.pull_requests.push(pr.clone());
        Ok(pr)
    }

    fn edit_pull_request(&self, number: u64, title: &str, body: &str) -> Result<PullRequest> {
        let mut state = self.check("edit_pull_request")?;
        let pr = state
            .pull_requests
            .iter_mut()
            .find(|pr| pr.number == number)
            .ok_or_else(|| GitPromoteError::remote(format!("Pull request #{} does not exist", number)))?;
        pr.title = title.to_string();
        pr.body = body.to_string();
        Ok(pr.clone())
    }
}

impl DocumentStore for MockRepository {
    fn read_document(&self, path: &str) -> Result<Option<Markdown>> {
        Ok(self.check("read_document")?.documents.get(path).cloned())
    }

    fn write_document(&self, path: &str, lines: &[String]) -> Result<()> {
        self.check("write_document")?
            .documents
            .insert(path.to_string(), lines.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &str) -> Result<String> {
        let state = self.check("read_file")?;
        if let Some(content) = state.files.get(path) {
            return Ok(content.clone());
        }
        state
            .documents
            .get(path)
            .map(|lines| to_file(lines))
            .ok_or_else(|| {
                GitPromoteError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} does not exist", path),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn commit(id: &str, message: &str, secs: i64) -> Commit {
        Commit::new(id, message, Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[test]
    fn test_mock_repository_branches() {
        let repo = MockRepository::new();
        repo.add_commit("main", commit("a", "feat: init", 1));
        repo.fork_branch("main", "develop");
        repo.add_commit("develop", commit("b", "fix: bug", 2));

        assert_eq!(repo.branch_head("main").unwrap(), "a");
        assert_eq!(repo.branch_head("develop").unwrap(), "b");
        assert!(repo.branch_head("missing").unwrap_err().is_not_found());

        let between = repo.list_commits_between("main", "develop").unwrap();
        assert_eq!(between.len(), 1);
        assert_eq!(between[0].id, "b");
    }

    #[test]
    fn test_mock_repository_commits_since() {
        let repo = MockRepository::new();
        repo.add_commit("main", commit("a", "feat: one", 1));
        repo.add_commit("main", commit("b", "feat: two", 2));
        repo.add_commit("main", commit("c", "feat: three", 3));

        let ids: Vec<String> = repo
            .list_commits_since("main", Some("a"))
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["c", "b"]);
        assert_eq!(repo.list_commits_since("main", None).unwrap().len(), 3);
    }

    #[test]
    fn test_mock_repository_writes() {
        let repo = MockRepository::new();
        repo.add_commit("main", commit("a", "feat: one", 1));
        repo.ensure_branch("promo", "a").unwrap();

        let files = vec![FileChange::new("CHANGELOG.md", "# Changelog\n")];
        repo.write_files("promo", &files, "release").unwrap();

        assert_eq!(repo.history("promo").len(), 2);
        assert_eq!(repo.history("main").len(), 1);
        assert!(repo.read_file("CHANGELOG.md").is_err());
        assert_eq!(repo.commits_written()[0].files, files);
    }

    #[test]
    fn test_mock_repository_failure_injection() {
        let repo = MockRepository::new();
        repo.fail_on("list_release_tags");
        let err = repo.list_release_tags().unwrap_err();
        assert!(matches!(err, GitPromoteError::Remote(_)));
        assert!(!err.is_not_found());
    }
}
