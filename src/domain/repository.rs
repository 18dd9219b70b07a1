use crate::domain::version::Version;
use once_cell::sync::Lazy;
use regex::Regex;

/// `git@host:owner/name.git` or `https://host/owner/name`
static REMOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[:/]([^/:]+)/([^/]+?)(?:\.git)?/?$").unwrap());

/// Where the repository is hosted, used to build changelog links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMetadata {
    /// Base URL of the hosting service, without trailing slash
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepositoryMetadata {
    /// Repository hosted on github.com
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepositoryMetadata::with_host("https://github.com", owner, name)
    }

    pub fn with_host(
        host: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let host = host.into();
        RepositoryMetadata {
            host: host.trim_end_matches('/').to_string(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Owner and name taken from a remote URL, under the given host
    pub fn from_remote_url(host: &str, url: &str) -> Option<Self> {
        let caps = REMOTE_RE.captures(url.trim())?;
        Some(RepositoryMetadata::with_host(host, &caps[1], &caps[2]))
    }

    /// `https://github.com/owner/name`
    pub fn url(&self) -> String {
        format!("{}/{}/{}", self.host, self.owner, self.name)
    }

    pub fn commit_url(&self, id: &str) -> String {
        format!("{}/commit/{}", self.url(), id)
    }

    pub fn compare_url(&self, from: &Version, to: &Version) -> String {
        format!("{}/compare/v{}...v{}", self.url(), from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let repo = RepositoryMetadata::new("exampleOrg", "exampleRepo");
        assert_eq!(
            repo.commit_url("1234567890abcdef"),
            "https://github.com/exampleOrg/exampleRepo/commit/1234567890abcdef"
        );
        assert_eq!(
            repo.compare_url(&Version::new(0, 9, 0), &Version::new(1, 0, 0)),
            "https://github.com/exampleOrg/exampleRepo/compare/v0.9.0...v1.0.0"
        );
    }

    #[test]
    fn test_custom_host_trailing_slash() {
        let repo = RepositoryMetadata::with_host("https://git.example.com/", "org", "repo");
        assert_eq!(repo.url(), "https://git.example.com/org/repo");
    }

    #[test]
    fn test_from_remote_url() {
        for url in [
            "git@github.com:jakbytes/version_actions.git",
            "https://github.com/jakbytes/version_actions.git",
            "https://github.com/jakbytes/version_actions",
            "ssh://git@github.com/jakbytes/version_actions/",
        ] {
            let repo = RepositoryMetadata::from_remote_url("https://github.com", url).unwrap();
            assert_eq!(repo.owner, "jakbytes", "{}", url);
            assert_eq!(repo.name, "version_actions", "{}", url);
        }
        assert!(RepositoryMetadata::from_remote_url("https://github.com", "local").is_none());
    }
}
