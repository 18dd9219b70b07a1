use crate::conventional::{classify, Classification};
use crate::domain::{Commit, CommitCategory, Increment};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

/// A commit together with how it was classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    pub commit: Commit,
    pub classification: Classification,
}

/// Commits grouped by changelog category, newest first within each category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedCommits {
    sections: BTreeMap<CommitCategory, Vec<ClassifiedCommit>>,
    seen: HashSet<String>,
}

impl CategorizedCommits {
    /// Create an empty collection
    pub fn new() -> Self {
        CategorizedCommits::default()
    }

    /// Classify and group a batch of commits.
    ///
    /// Duplicate identifiers are counted once and unclassifiable messages are
    /// dropped. The result does not depend on input order.
    pub fn aggregate(commits: impl IntoIterator<Item = Commit>) -> Self {
        let mut categorized = CategorizedCommits::new();
        for commit in commits {
            categorized.insert(commit);
        }
        categorized
    }

    /// Classify one commit and insert it at its sorted position.
    ///
    /// Returns `false` when the commit was a duplicate or uncategorized.
    pub fn insert(&mut self, commit: Commit) -> bool {
        if !self.seen.insert(commit.id.clone()) {
            return false;
        }

        let classification = classify(&commit.message);
        if !classification.category.is_section() {
            return false;
        }

        let entries = self.sections.entry(classification.category).or_default();
        let index = entries.partition_point(|existing| newest_first(&existing.commit, &commit).is_lt());
        entries.insert(
            index,
            ClassifiedCommit {
                commit,
                classification,
            },
        );
        true
    }

    /// Commits filed under `category`
    pub fn get(&self, category: CommitCategory) -> &[ClassifiedCommit] {
        self.sections
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// Non-empty sections in changelog order
    pub fn sections(&self) -> impl Iterator<Item = (CommitCategory, &[ClassifiedCommit])> + '_ {
        CommitCategory::SECTIONS
            .iter()
            .map(|category| (*category, self.get(*category)))
            .filter(|(_, commits)| !commits.is_empty())
    }

    /// Number of categorized commits
    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Version increment implied by the categories present
    pub fn increment(&self) -> Increment {
        if !self.get(CommitCategory::Breaking).is_empty() {
            Increment::Major
        } else if !self.get(CommitCategory::Feature).is_empty() {
            Increment::Minor
        } else if !self.get(CommitCategory::Fix).is_empty() {
            Increment::Patch
        } else {
            Increment::None
        }
    }
}

/// Newer timestamps sort first; equal timestamps fall back to the identifier
fn newest_first(a: &Commit, b: &Commit) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| a.id.cmp(&b.id))
}
