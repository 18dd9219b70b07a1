use crate::boundary::BoundaryWarning;
use crate::domain::version::Version;
use crate::error::{GitPromoteError, Result};
use std::collections::HashMap;
use tracing::debug;

/// A tag as listed by the version-control service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// Commit the tag points at
    pub commit_id: String,
}

impl TagRef {
    /// Create a new tag reference
    pub fn new(name: impl Into<String>, commit_id: impl Into<String>) -> Self {
        TagRef {
            name: name.into(),
            commit_id: commit_id.into(),
        }
    }

    /// Parse the tag name as `v<semver>`
    pub fn version(&self) -> Option<Version> {
        Version::parse(&self.name).ok()
    }
}

/// A tag that parsed as a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub version: Version,
    pub tag: TagRef,
}

/// Latest released version and latest prerelease for one identifier
///
/// Rebuilt from the tag list on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionLineage {
    pub latest_release: Option<Version>,
    pub latest_prerelease: Option<Version>,
}

impl VersionLineage {
    pub fn new(latest_release: Option<Version>, latest_prerelease: Option<Version>) -> Self {
        VersionLineage {
            latest_release,
            latest_prerelease,
        }
    }
}

/// Repository tags split into releases and prereleases by identifier
#[derive(Debug, Clone, Default)]
pub struct ReleaseTags {
    releases: Vec<ReleaseTag>,
    prereleases: HashMap<String, Vec<ReleaseTag>>,
}

impl ReleaseTags {
    /// Build from raw tags, ignoring names that are not semantic versions
    pub fn from_tags(tags: impl IntoIterator<Item = TagRef>) -> Self {
        let mut parsed = ReleaseTags::default();
        for tag in tags {
            let Some(version) = tag.version() else {
                debug!("{}", BoundaryWarning::UnparsableTag { tag: tag.name.clone() });
                continue;
            };

            let entry = ReleaseTag { version, tag };
            if entry.version.is_prerelease() {
                parsed
                    .prereleases
                    .entry(entry.version.prerelease_identifier().to_string())
                    .or_default()
                    .push(entry);
            } else {
                parsed.releases.push(entry);
            }
        }
        parsed
    }

    /// Highest release tag by semver precedence
    pub fn latest_release(&self) -> Result<&ReleaseTag> {
        self.releases
            .iter()
            .max_by(|a, b| a.version.cmp(&b.version))
            .ok_or(GitPromoteError::NoReleaseVersionFound)
    }

    /// Highest release tag below the latest one
    pub fn previous_release(&self) -> Result<Option<&ReleaseTag>> {
        let latest = self.latest_release()?;
        Ok(self
            .releases
            .iter()
            .filter(|r| r.version < latest.version)
            .max_by(|a, b| a.version.cmp(&b.version)))
    }

    /// Highest prerelease tag carrying `identifier`
    pub fn latest_prerelease(&self, identifier: &str) -> Result<&ReleaseTag> {
        self.prereleases
            .get(identifier)
            .and_then(|tags| tags.iter().max_by(|a, b| a.version.cmp(&b.version)))
            .ok_or_else(|| GitPromoteError::NoPrereleaseVersionFound {
                identifier: identifier.to_string(),
            })
    }

    /// Lineage for computing the next version; absent tags become `None`
    pub fn lineage(&self, identifier: Option<&str>) -> VersionLineage {
        let latest_release = self.latest_release().ok().map(|r| r.version.clone());
        let latest_prerelease = identifier
            .filter(|id| !id.is_empty())
            .and_then(|id| self.latest_prerelease(id).ok())
            .map(|r| r.version.clone());
        VersionLineage::new(latest_release, latest_prerelease)
    }
}
