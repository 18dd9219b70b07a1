use std::fmt;

/// Non-fatal conditions met while gathering release state.
/// These are reported to the user but never stop a run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No release tag exists yet
    NoReleaseVersion,
    /// No prerelease tag carries the identifier
    NoPrereleaseVersion { identifier: String },
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String },
    /// None of the commits call for a version change
    NothingToRelease { head: String, base: String, commits: usize },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoReleaseVersion => write!(
                f,
                "No release version found, the next version is computed from v0.0.0"
            ),
            BoundaryWarning::NoPrereleaseVersion { identifier } => {
                write!(f, "No prerelease version found for identifier '{}'", identifier)
            }
            BoundaryWarning::UnparsableTag { tag } => {
                write!(f, "Ignoring tag '{}': not a semantic version", tag)
            }
            BoundaryWarning::NothingToRelease { head, base, commits } => write!(
                f,
                "Nothing to release from '{}' into '{}' ({} commit(s) without a version change)",
                head, base, commits
            ),
        }
    }
}
