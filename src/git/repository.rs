use crate::domain::{Commit, TagRef};
use crate::error::{GitPromoteError, Result};
use crate::git::{BranchWriter, CommitSource, FileChange, TagSource};
use chrono::{TimeZone, Utc};
use git2::build::TreeUpdateBuilder;
use git2::{BranchType, FileMode, Oid, Repository as Git2Repo, Signature, Sort};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

const FALLBACK_NAME: &str = "git-promote";
const FALLBACK_EMAIL: &str = "git-promote@users.noreply.github.com";

/// Wrapper around git2::Repository implementing the commit, tag and branch
/// collaborator traits
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Repository::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    /// Root of the working tree, or the git dir for bare repositories
    pub fn workdir(&self) -> Result<std::path::PathBuf> {
        let repo = self.lock()?;
        Ok(repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf())
    }

    /// URL of the named remote, `None` when it is not configured
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        let repo = self.lock()?;
        let url = match repo.find_remote(name) {
            Ok(remote) => remote.url().map(str::to_string),
            Err(e) if e.code() == git2::ErrorCode::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(url)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo
            .lock()
            .map_err(|_| GitPromoteError::remote("repository handle is poisoned"))
    }
}

fn branch_tip(repo: &Git2Repo, branch: &str) -> Result<Oid> {
    let found = repo
        .find_branch(branch, BranchType::Local)
        .map_err(|e| match e.code() {
            git2::ErrorCode::NotFound => GitPromoteError::branch_not_found(branch),
            _ => GitPromoteError::Git(e),
        })?;

    found
        .get()
        .target()
        .ok_or_else(|| GitPromoteError::branch_not_found(format!("{} (no target)", branch)))
}

fn walk(repo: &Git2Repo, push: Oid, hide: Option<Oid>) -> Result<Vec<Commit>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;
    revwalk.push(push)?;
    if let Some(hide) = hide {
        revwalk.hide(hide)?;
    }

    let mut commits = Vec::new();
    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        let timestamp = Utc
            .timestamp_opt(commit.author().when().seconds(), 0)
            .single()
            .unwrap_or_default();
        commits.push(Commit::new(
            commit.id().to_string(),
            commit.message().unwrap_or_default(),
            timestamp,
        ));
    }
    Ok(commits)
}

fn signature(repo: &Git2Repo) -> Result<Signature<'static>> {
    match repo.signature() {
        Ok(sig) => Ok(sig.to_owned()),
        Err(_) => Ok(Signature::now(FALLBACK_NAME, FALLBACK_EMAIL)?),
    }
}

impl CommitSource for Git2Repository {
    fn branch_head(&self, branch: &str) -> Result<String> {
        let repo = self.lock()?;
        Ok(branch_tip(&repo, branch)?.to_string())
    }

    fn list_commits_since(&self, branch: &str, since: Option<&str>) -> Result<Vec<Commit>> {
        let repo = self.lock()?;
        let tip = branch_tip(&repo, branch)?;
        let hide = since.map(Oid::from_str).transpose()?;
        let commits = walk(&repo, tip, hide)?;
        debug!(branch, since = ?since, count = commits.len(), "listed commits");
        Ok(commits)
    }

    fn list_commits_between(&self, base: &str, head: &str) -> Result<Vec<Commit>> {
        let repo = self.lock()?;
        let head_tip = branch_tip(&repo, head)?;
        let base_tip = branch_tip(&repo, base)?;
        let commits = walk(&repo, head_tip, Some(base_tip))?;
        debug!(base, head, count = commits.len(), "listed commits between branches");
        Ok(commits)
    }
}

impl TagSource for Git2Repository {
    fn list_release_tags(&self) -> Result<Vec<TagRef>> {
        let repo = self.lock()?;
        let names = repo.tag_names(None)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            let reference = repo.find_reference(&format!("refs/tags/{}", name))?;
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagRef::new(name, commit.id().to_string())),
                Err(e) => debug!(tag = name, error = %e, "skipping tag that does not point at a commit"),
            }
        }
        Ok(tags)
    }
}

impl BranchWriter for Git2Repository {
    fn ensure_branch(&self, name: &str, at_commit: &str) -> Result<()> {
        let repo = self.lock()?;
        let commit = repo.find_commit(Oid::from_str(at_commit)?)?;
        repo.branch(name, &commit, true)?;
        debug!(branch = name, commit = at_commit, "branch reset");
        Ok(())
    }

    fn write_files(&self, branch: &str, files: &[FileChange], message: &str) -> Result<String> {
        let repo = self.lock()?;
        let parent = repo.find_commit(branch_tip(&repo, branch)?)?;
        let baseline = parent.tree()?;

        let mut update = TreeUpdateBuilder::new();
        for file in files {
            let blob = repo.blob(file.content.as_bytes())?;
            update.upsert(file.path.as_str(), blob, FileMode::Blob);
        }
        let tree = repo.find_tree(update.create_updated(&repo, &baseline)?)?;

        let sig = signature(&repo)?;
        let oid = repo.commit(
            Some(&format!("refs/heads/{}", branch)),
            &sig,
            &sig,
            message,
            &tree,
            &[&parent],
        )?;
        debug!(branch, commit = %oid, files = files.len(), "files committed");
        Ok(oid.to_string())
    }
}
