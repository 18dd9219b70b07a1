use crate::domain::RepositoryMetadata;
use crate::error::{GitPromoteError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Represents the complete configuration for git-promote.
///
/// Contains the repository identity used for changelog links, release
/// settings, and the prerelease identifier of each promotion branch.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    /// Branch name to prerelease identifier ("develop" = "drc")
    #[serde(default)]
    pub branches: HashMap<String, String>,
}

fn default_host() -> String {
    "https://github.com".to_string()
}

/// Where the repository lives; owner and name may be left empty and taken
/// from the `origin` remote instead.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub name: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            host: default_host(),
            owner: String::new(),
            name: String::new(),
        }
    }
}

impl RepositoryConfig {
    /// Metadata when both owner and name are configured
    pub fn metadata(&self) -> Option<RepositoryMetadata> {
        if self.owner.is_empty() || self.name.is_empty() {
            return None;
        }
        Some(RepositoryMetadata::with_host(
            self.host.as_str(),
            self.owner.as_str(),
            self.name.as_str(),
        ))
    }
}

fn default_release_branch() -> String {
    "main".to_string()
}

fn default_changelog() -> String {
    "CHANGELOG.md".to_string()
}

fn default_artifact() -> String {
    "release.txt".to_string()
}

fn default_branch_prefix() -> String {
    "release--branch--".to_string()
}

fn default_pull_requests() -> String {
    ".git/git-promote/pulls.toml".to_string()
}

/// Release settings.
///
/// Paths are relative to the repository working tree.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Stable branch that carries plain releases
    #[serde(default = "default_release_branch")]
    pub branch: String,

    #[serde(default = "default_changelog")]
    pub changelog: String,

    /// File receiving the latest section after each run
    #[serde(default = "default_artifact")]
    pub artifact: String,

    /// Prefix of the intermediate branch holding the changelog commit
    #[serde(default = "default_branch_prefix")]
    pub branch_prefix: String,

    /// Extra files committed together with the changelog
    #[serde(default)]
    pub commit_files: Vec<String>,

    /// Ledger file recording open pull requests
    #[serde(default = "default_pull_requests")]
    pub pull_requests: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            branch: default_release_branch(),
            changelog: default_changelog(),
            artifact: default_artifact(),
            branch_prefix: default_branch_prefix(),
            commit_files: Vec::new(),
            pull_requests: default_pull_requests(),
        }
    }
}

impl Config {
    /// Prerelease identifier configured for `branch`
    pub fn prerelease_identifier(&self, branch: &str) -> Option<&str> {
        self.branches
            .get(branch)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitpromote.toml` in current directory
/// 3. `.gitpromote.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| GitPromoteError::config(format!("Cannot read {}: {}", path, e)))?
    } else if Path::new("./gitpromote.toml").exists() {
        fs::read_to_string("./gitpromote.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitpromote.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| GitPromoteError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.release.branch, "main");
        assert_eq!(config.release.changelog, "CHANGELOG.md");
        assert_eq!(config.release.artifact, "release.txt");
        assert_eq!(config.release.branch_prefix, "release--branch--");
        assert!(config.branches.is_empty());
        assert!(config.repository.metadata().is_none());
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: Config = toml::from_str(
            r#"
[repository]
owner = "jakbytes"
name = "version_actions"

[release]
changelog = "docs/CHANGELOG.md"

[branches]
develop = "drc"
staging = "src"
main = ""
"#,
        )
        .unwrap();

        assert_eq!(config.release.changelog, "docs/CHANGELOG.md");
        assert_eq!(config.release.branch, "main");
        assert_eq!(
            config.repository.metadata().unwrap().url(),
            "https://github.com/jakbytes/version_actions"
        );
        assert_eq!(config.prerelease_identifier("develop"), Some("drc"));
        assert_eq!(config.prerelease_identifier("main"), None);
        assert_eq!(config.prerelease_identifier("feature"), None);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = toml::from_str::<Config>("[release\nbranch = 1")
            .map_err(|e| GitPromoteError::config(e.to_string()))
            .unwrap_err();
        assert!(matches!(err, GitPromoteError::Config(_)));
    }
}
