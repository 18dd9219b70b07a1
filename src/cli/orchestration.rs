//! Workflow orchestration behind each subcommand
//!
//! This module keeps argument parsing apart from the workflows: the argument
//! structs mirror the CLI arguments without depending on clap, so the
//! workflows can also be driven programmatically.

use anyhow::{Context, Result};

use crate::changelog::ChangelogComposer;
use crate::config::Config;
use crate::domain::{BranchContext, RepositoryMetadata};
use crate::error::GitPromoteError;
use crate::git::{FsDocumentStore, Git2Repository, PullRequest, PullRequestLedger};
use crate::output::Outputs;
use crate::promotion::{
    latest_conventional_commit, Collaborators, ExtractedCommit, PromotionHandler, PromotionOutcome,
    PromotionRequest, PromotionSettings, PullRequestHandler,
};
use crate::ui;

/// Remote whose URL supplies the repository owner and name when unconfigured
const ORIGIN: &str = "origin";

/// Arguments for the version workflow
#[derive(Debug, Clone, PartialEq)]
pub struct VersionArgs {
    /// Branch whose commits are promoted
    pub head: String,
    /// Branch receiving the release
    pub base: String,
    /// Prerelease identifier; falls back to the `[branches]` table
    pub prerelease: Option<String>,
    /// Stable branch; falls back to `release.branch`
    pub release_branch: Option<String>,
    /// Event that started the run
    pub trigger: String,
    /// Files committed with the changelog, in addition to `release.commit_files`
    pub commit_files: Vec<String>,
}

/// Arguments for the working-branch pull request workflow
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestArgs {
    pub head: String,
    pub base: String,
}

/// Arguments for the commit extraction workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractArgs {
    pub branch: String,
}

/// Collaborators backed by a local clone
///
/// Commits, tags and branches come from the git repository, pull requests
/// from the ledger file and documents from the working tree.
pub struct LocalBackend {
    pub repository: Git2Repository,
    pub pull_requests: PullRequestLedger,
    pub documents: FsDocumentStore,
}

impl LocalBackend {
    /// Open the repository containing `path`
    pub fn open(path: &str, config: &Config) -> Result<Self> {
        let repository =
            Git2Repository::open(path).with_context(|| format!("Cannot open git repository at '{}'", path))?;
        let workdir = repository.workdir()?;

        Ok(LocalBackend {
            pull_requests: PullRequestLedger::new(workdir.join(&config.release.pull_requests)),
            documents: FsDocumentStore::new(workdir),
            repository,
        })
    }

    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            commits: &self.repository,
            tags: &self.repository,
            branches: &self.repository,
            pull_requests: &self.pull_requests,
            documents: &self.documents,
        }
    }

    /// Repository identity from the configuration, else from the origin remote
    pub fn metadata(&self, config: &Config) -> Result<RepositoryMetadata> {
        if let Some(metadata) = config.repository.metadata() {
            return Ok(metadata);
        }

        let url = self.repository.remote_url(ORIGIN)?;
        let metadata = url
            .as_deref()
            .and_then(|url| RepositoryMetadata::from_remote_url(&config.repository.host, url))
            .ok_or_else(|| {
                GitPromoteError::config(
                    "Repository owner and name are not configured and cannot be read from the origin remote",
                )
            })?;
        Ok(metadata)
    }
}

/// Compute the next version, update the changelog and open the release pull request
pub fn run_version(
    args: &VersionArgs,
    config: &Config,
    backend: &LocalBackend,
    outputs: &mut Outputs,
) -> Result<PromotionOutcome> {
    let release_branch = args
        .release_branch
        .clone()
        .unwrap_or_else(|| config.release.branch.clone());
    let prerelease_identifier = args
        .prerelease
        .clone()
        .filter(|id| !id.is_empty())
        .or_else(|| config.prerelease_identifier(&args.base).map(str::to_string));

    let mut commit_files = config.release.commit_files.clone();
    for path in &args.commit_files {
        if !commit_files.contains(path) {
            commit_files.push(path.clone());
        }
    }

    let request = PromotionRequest {
        branches: BranchContext::new(args.head.as_str(), args.base.as_str(), release_branch),
        prerelease_identifier,
        trigger: args.trigger.clone(),
        commit_files,
    };
    let settings = PromotionSettings {
        changelog_path: config.release.changelog.clone(),
        artifact_path: config.release.artifact.clone(),
        branch_prefix: config.release.branch_prefix.clone(),
    };
    let composer = ChangelogComposer::new(backend.metadata(config)?);

    ui::display_status(&format!("Promoting '{}' into '{}'", args.head, args.base));
    let outcome = PromotionHandler::new(backend.collaborators(), composer, settings).run(&request)?;

    match &outcome {
        PromotionOutcome::Committed { release, pull_request } => {
            ui::display_version_change(release.previous.as_ref(), &release.version, release.increment);
            ui::display_success(&format!(
                "Pull request #{} '{}' is up to date",
                pull_request.number, pull_request.title
            ));
        }
        PromotionOutcome::Released(release) => {
            ui::display_version_change(release.previous.as_ref(), &release.version, release.increment);
            ui::display_success(&format!("Wrote {}", config.release.artifact));
        }
        PromotionOutcome::Skipped { .. } => {
            ui::display_status("No version change");
        }
    }

    if let Some(release) = outcome.release() {
        outputs.set("version", Some(format!("v{}", release.version).as_str()))?;
    }
    Ok(outcome)
}

/// Create or refresh the draft pull request of a working branch
pub fn run_pull_request(args: &PullRequestArgs, config: &Config, backend: &LocalBackend) -> Result<PullRequest> {
    let composer = ChangelogComposer::new(backend.metadata(config)?);
    let handler = PullRequestHandler::new(&backend.repository, &backend.pull_requests, composer);

    let pull_request = handler.run(&args.head, &args.base)?;
    ui::display_success(&format!(
        "Draft pull request #{} '{}' is up to date",
        pull_request.number, pull_request.title
    ));
    Ok(pull_request)
}

/// Report the newest conventional commit on a branch
pub fn run_extract(args: &ExtractArgs, backend: &LocalBackend, outputs: &mut Outputs) -> Result<Option<ExtractedCommit>> {
    let extracted = latest_conventional_commit(&backend.repository, &args.branch)?;

    match &extracted {
        Some(found) => {
            for (key, value) in found.fields() {
                outputs.set(key, value.as_deref())?;
            }
        }
        None => ui::display_status(&format!("No conventional commit found on '{}'", args.branch)),
    }
    Ok(extracted)
}
