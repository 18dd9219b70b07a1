use crate::domain::prerelease::PreRelease;
use crate::error::{GitPromoteError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Semantic version representation
///
/// Thin wrapper over [`semver::Version`] so precedence follows the semver
/// rules (a release outranks its prereleases). Every operation returns a new
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    inner: semver::Version,
}

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            inner: semver::Version::new(major, minor, patch),
        }
    }

    /// The zero version every repository starts from
    pub fn zero() -> Self {
        Version::new(0, 0, 0)
    }

    /// Parse a version, accepting an optional `v`/`V` prefix ("v1.2.3-rc.0")
    pub fn parse(s: &str) -> Result<Self> {
        let clean = s.trim().trim_start_matches(['v', 'V']);
        let inner = semver::Version::parse(clean)
            .map_err(|e| GitPromoteError::version(format!("Invalid version '{}': {}", s, e)))?;
        Ok(Version { inner })
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Whether this version carries a prerelease suffix
    pub fn is_prerelease(&self) -> bool {
        !self.inner.pre.is_empty()
    }

    /// Raw prerelease suffix ("drc.3"), empty for releases
    pub fn prerelease_str(&self) -> &str {
        self.inner.pre.as_str()
    }

    /// Prerelease identifier ("drc" for "1.2.0-drc.3"), empty for releases
    pub fn prerelease_identifier(&self) -> &str {
        PreRelease::identifier_of(self.inner.pre.as_str())
    }

    /// Parsed prerelease lineage state
    ///
    /// Fails with `InvalidPrereleaseState` when the suffix has no integer
    /// sequence number.
    pub fn prerelease(&self) -> Result<PreRelease> {
        PreRelease::parse(self.inner.pre.as_str())
            .map_err(|e| match e {
                GitPromoteError::InvalidPrereleaseState { reason, .. } => {
                    GitPromoteError::invalid_prerelease(self.to_string(), reason)
                }
                other => other,
            })
    }

    /// The release this version belongs to ("1.2.0-rc.1" -> "1.2.0")
    pub fn release(&self) -> Self {
        Version::new(self.major(), self.minor(), self.patch())
    }

    /// Same major and minor as `other`
    pub fn same_minor_line(&self, other: &Version) -> bool {
        self.major() == other.major() && self.minor() == other.minor()
    }

    /// Bump version according to increment type
    pub fn bump(&self, increment: Increment) -> Self {
        match increment {
            Increment::Major => Version::new(self.major() + 1, 0, 0),
            Increment::Minor => Version::new(self.major(), self.minor() + 1, 0),
            Increment::Patch => Version::new(self.major(), self.minor(), self.patch() + 1),
            Increment::None => self.clone(),
        }
    }

    /// This release with a prerelease suffix attached
    pub fn with_prerelease(&self, prerelease: &PreRelease) -> Result<Self> {
        let pre = semver::Prerelease::new(&prerelease.to_string()).map_err(|e| {
            GitPromoteError::version(format!(
                "Invalid prerelease '{}' for {}: {}",
                prerelease,
                self.release(),
                e
            ))
        })?;
        let mut inner = semver::Version::new(self.major(), self.minor(), self.patch());
        inner.pre = pre;
        Ok(Version { inner })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Version increment decision derived from categorized commits
///
/// Ordered by precedence: `Major > Minor > Patch > None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Increment {
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for Increment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Increment::Major => "major",
            Increment::Minor => "minor",
            Increment::Patch => "patch",
            Increment::None => "none",
        };
        write!(f, "{}", name)
    }
}
