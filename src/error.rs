use thiserror::Error;

/// Unified error type for git-promote operations
#[derive(Error, Debug)]
pub enum GitPromoteError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Invalid prerelease state for '{version}': {reason}")]
    InvalidPrereleaseState { version: String, reason: String },

    #[error("No release version found in repository tags")]
    NoReleaseVersionFound,

    #[error("No prerelease version found for identifier '{identifier}'")]
    NoPrereleaseVersionFound { identifier: String },

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("No pull request found for branch {head} targeting {base}")]
    PullRequestNotFound { head: String, base: String },

    #[error("Multiple pull requests found for branch {head} targeting {base}")]
    MultiplePullRequestsFound { head: String, base: String },

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-promote
pub type Result<T> = std::result::Result<T, GitPromoteError>;

impl GitPromoteError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitPromoteError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitPromoteError::Version(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        GitPromoteError::Remote(msg.into())
    }

    /// Create a branch-not-found error
    pub fn branch_not_found(name: impl Into<String>) -> Self {
        GitPromoteError::BranchNotFound(name.into())
    }

    /// Create a prerelease-state error for a version whose suffix cannot be read
    pub fn invalid_prerelease(version: impl Into<String>, reason: impl Into<String>) -> Self {
        GitPromoteError::InvalidPrereleaseState {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error reports something absent rather than a failure.
    ///
    /// Lineage lookups and pull-request discovery use these to tell "nothing
    /// there yet" apart from transport errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GitPromoteError::NoReleaseVersionFound
                | GitPromoteError::NoPrereleaseVersionFound { .. }
                | GitPromoteError::BranchNotFound(_)
                | GitPromoteError::PullRequestNotFound { .. }
        )
    }
}
