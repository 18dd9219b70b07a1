/// Source and target of a promotion, relative to the stable release branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    /// Branch whose commits are being promoted
    pub head: String,
    /// Branch receiving the release pull request
    pub base: String,
    /// The stable/default branch that carries plain releases
    pub release_branch: String,
}

impl BranchContext {
    /// Create a new branch context
    pub fn new(
        head: impl Into<String>,
        base: impl Into<String>,
        release_branch: impl Into<String>,
    ) -> Self {
        BranchContext {
            head: head.into(),
            base: base.into(),
            release_branch: release_branch.into(),
        }
    }

    /// Commits move from one branch to another
    pub fn is_promotion(&self) -> bool {
        self.head != self.base
    }

    /// Check if the target branch is the release branch (plain versions)
    pub fn targets_release_branch(&self) -> bool {
        self.base == self.release_branch
    }

    /// Versions for this target carry a prerelease suffix
    pub fn is_prerelease_target(&self) -> bool {
        !self.targets_release_branch()
    }

    /// Intermediate branch that holds the changelog commit for the target
    pub fn promotion_branch(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.base)
    }
}
