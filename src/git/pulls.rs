use crate::error::{GitPromoteError, Result};
use crate::git::{PullRequest, PullRequestWriter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Ledger {
    /// Highest number ever handed out, so closed numbers are not reused
    #[serde(default)]
    last_number: u64,
    #[serde(default)]
    pull_requests: Vec<PullRequest>,
}

/// Pull requests kept in a TOML file next to the repository
///
/// Stands in for a hosting service when running against a local clone. Only
/// open pull requests are listed; closing one removes it. The file is read
/// and rewritten as a whole on every change.
pub struct PullRequestLedger {
    path: PathBuf,
    guard: Mutex<()>,
}

impl PullRequestLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PullRequestLedger {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every recorded pull request
    pub fn list(&self) -> Result<Vec<PullRequest>> {
        Ok(self.load()?.pull_requests)
    }

    /// Close pull request `number`, returning it as it was last recorded
    pub fn close_pull_request(&self, number: u64) -> Result<PullRequest> {
        self.update(|ledger| {
            let index = ledger
                .pull_requests
                .iter()
                .position(|pr| pr.number == number)
                .ok_or_else(|| GitPromoteError::remote(format!("Pull request #{} does not exist", number)))?;
            let pr = ledger.pull_requests.remove(index);
            debug!(number, head = %pr.head, base = %pr.base, "pull request closed");
            Ok(pr)
        })
    }

    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            return Ok(Ledger::default());
        }
        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            GitPromoteError::remote(format!(
                "Failed to parse pull request ledger {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let content = toml::to_string(ledger)
            .map_err(|e| GitPromoteError::remote(format!("Failed to serialize pull requests: {}", e)))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn update<T>(&self, change: impl FnOnce(&mut Ledger) -> Result<T>) -> Result<T> {
        let _lock = self
            .guard
            .lock()
            .map_err(|_| GitPromoteError::remote("pull request ledger lock is poisoned"))?;
        let mut ledger = self.load()?;
        let result = change(&mut ledger)?;
        self.save(&ledger)?;
        Ok(result)
    }
}

impl PullRequestWriter for PullRequestLedger {
    fn find_pull_request(&self, head: &str, base: &str) -> Result<PullRequest> {
        let ledger = self.load()?;
        let mut matches = ledger
            .pull_requests
            .into_iter()
            .filter(|pr| pr.head == head && pr.base == base);

        match (matches.next(), matches.next()) {
            (Some(pr), None) => Ok(pr),
            (None, _) => Err(GitPromoteError::PullRequestNotFound {
                head: head.to_string(),
                base: base.to_string(),
            }),
            (Some(_), Some(_)) => Err(GitPromoteError::MultiplePullRequestsFound {
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
        self.update(|ledger| {
            let highest = ledger.pull_requests.iter().map(|pr| pr.number).max().unwrap_or(0);
            let number = ledger.last_number.max(highest) + 1;
            ledger.last_number = number;
            let pr = PullRequest {
                number,
                head: head.to_string(),
                base: base.to_string(),
                title: title.to_string(),
                body: body.to_string(),
                draft,
            };
            ledger.pull_requests.push(pr.clone());
            debug!(number, head, base, "pull request recorded");
            Ok(pr)
        })
    }

    fn edit_pull_request(&self, number: u64, title: &str, body: &str) -> Result<PullRequest> {
        self.update(|ledger| {
            let pr = ledger
                .pull_requests
                .iter_mut()
                .find(|pr| pr.number == number)
                .ok_or_else(|| GitPromoteError::remote(format!("Pull request #{} does not exist", number)))?;
            pr.title = title.to_string();
            pr.body = body.to_string();
            Ok(pr.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_upsert_creates_then_edits() {
        let dir = TempDir::new().unwrap();
        let ledger = PullRequestLedger::new(dir.path().join("pulls.toml"));

        let created = ledger
            .upsert_pull_request("release--branch--main", "main", "release(main): v1.0.0", "body", false)
            .unwrap();
        assert_eq!(created.number, 1);

        let edited = ledger
            .upsert_pull_request("release--branch--main", "main", "release(main): v1.1.0", "new body", false)
            .unwrap();
        assert_eq!(edited.number, 1);
        assert_eq!(edited.title, "release(main): v1.1.0");

        let all = ledger.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].body, "new body");
    }

    #[test]
    fn test_find_not_found() {
        let dir = TempDir::new().unwrap();
        let ledger = PullRequestLedger::new(dir.path().join("pulls.toml"));
        let err = ledger.find_pull_request("a", "b").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_multiple() {
        let dir = TempDir::new().unwrap();
        let ledger = PullRequestLedger::new(dir.path().join("pulls.toml"));
        ledger.create_pull_request("a", "b", "one", "", true).unwrap();
        ledger.create_pull_request("a", "b", "two", "", true).unwrap();

        let err = ledger.upsert_pull_request("a", "b", "three", "", true).unwrap_err();
        assert!(matches!(err, GitPromoteError::MultiplePullRequestsFound { .. }));
    }

    #[test]
    fn test_close_removes_pull_request() {
        let dir = TempDir::new().unwrap();
        let ledger = PullRequestLedger::new(dir.path().join("pulls.toml"));
        let opened = ledger
            .upsert_pull_request("release--branch--main", "main", "release(main): v1.0.0", "body", false)
            .unwrap();

        let closed = ledger.close_pull_request(opened.number).unwrap();
        assert_eq!(closed, opened);
        assert!(ledger.list().unwrap().is_empty());
        assert!(ledger
            .find_pull_request("release--branch--main", "main")
            .unwrap_err()
            .is_not_found());

        let err = ledger.close_pull_request(opened.number).unwrap_err();
        assert!(matches!(err, GitPromoteError::Remote(_)));

        let reopened = ledger
            .upsert_pull_request("release--branch--main", "main", "release(main): v1.1.0", "body", false)
            .unwrap();
        assert_eq!(reopened.number, opened.number + 1);
    }

    #[test]
    fn test_ledger_persists_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("pulls.toml");
        PullRequestLedger::new(&path)
            .create_pull_request("feature", "develop", "feat: x", "line1\nline2", true)
            .unwrap();

        let reopened = PullRequestLedger::new(&path);
        let pr = reopened.find_pull_request("feature", "develop").unwrap();
        assert!(pr.draft);
        assert_eq!(pr.body, "line1\nline2");
    }
}
