use crate::analyzer::{next_version, CategorizedCommits};
use crate::boundary::BoundaryWarning;
use crate::changelog::{to_file, to_text, ChangelogComposer, Markdown};
use crate::domain::{BranchContext, Commit, Increment, ReleaseTags, Version, VersionLineage};
use crate::error::{GitPromoteError, Result};
use crate::git::{
    BranchWriter, CommitSource, DocumentStore, FileChange, PullRequest, PullRequestWriter, TagSource,
};
use tracing::{debug, info, warn};

/// Trigger value of a run that is the release event itself
pub const RELEASE_TRIGGER: &str = "release";

const ATTRIBUTION: &str = "This release was composed by git-promote";

/// Every collaborator a promotion needs
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub commits: &'a dyn CommitSource,
    pub tags: &'a dyn TagSource,
    pub branches: &'a dyn BranchWriter,
    pub pull_requests: &'a dyn PullRequestWriter,
    pub documents: &'a dyn DocumentStore,
}

impl<'a> Collaborators<'a> {
    /// Use one value for every collaborator
    pub fn single<R>(repo: &'a R) -> Self
    where
        R: CommitSource + TagSource + BranchWriter + PullRequestWriter + DocumentStore,
    {
        Collaborators {
            commits: repo,
            tags: repo,
            branches: repo,
            pull_requests: repo,
            documents: repo,
        }
    }
}

/// Paths and naming used by a promotion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionSettings {
    pub changelog_path: String,
    pub artifact_path: String,
    pub branch_prefix: String,
}

impl Default for PromotionSettings {
    fn default() -> Self {
        PromotionSettings {
            changelog_path: "CHANGELOG.md".to_string(),
            artifact_path: "release.txt".to_string(),
            branch_prefix: "release--branch--".to_string(),
        }
    }
}

/// One promotion run, fully resolved by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionRequest {
    pub branches: BranchContext,
    /// Required when the target is not the release branch
    pub prerelease_identifier: Option<String>,
    /// Event that started the run; `release` marks the tag event itself
    pub trigger: String,
    /// Extra files committed with the changelog
    pub commit_files: Vec<String>,
}

/// Everything composed for a new version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub previous: Option<Version>,
    pub version: Version,
    pub increment: Increment,
    pub title: String,
    pub body: Markdown,
    /// Section for this version only
    pub section: Markdown,
    /// Full changelog document
    pub document: Markdown,
}

/// How a promotion run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionOutcome {
    /// The changelog was committed to the promotion branch and the pull request upserted
    Committed {
        release: Release,
        pull_request: PullRequest,
    },
    /// Release event on the release branch; only local files were written
    Released(Release),
    /// No commit called for a version change; nothing was written
    Skipped {
        latest_release: Option<Version>,
        commits: usize,
    },
}

impl PromotionOutcome {
    pub fn release(&self) -> Option<&Release> {
        match self {
            PromotionOutcome::Committed { release, .. } | PromotionOutcome::Released(release) => Some(release),
            PromotionOutcome::Skipped { .. } => None,
        }
    }
}

/// Drives one promotion from tag lookup to pull request
pub struct PromotionHandler<'a> {
    collaborators: Collaborators<'a>,
    composer: ChangelogComposer,
    settings: PromotionSettings,
}

impl<'a> PromotionHandler<'a> {
    pub fn new(collaborators: Collaborators<'a>, composer: ChangelogComposer, settings: PromotionSettings) -> Self {
        PromotionHandler {
            collaborators,
            composer,
            settings,
        }
    }

    /// Run the promotion.
    ///
    /// Collaborator failures abort the run. Nothing is written until the
    /// changelog has been composed and every committed file has been read.
    pub fn run(&self, request: &PromotionRequest) -> Result<PromotionOutcome> {
        let branches = &request.branches;
        debug!(
            head = %branches.head,
            base = %branches.base,
            release_branch = %branches.release_branch,
            identifier = ?request.prerelease_identifier,
            trigger = %request.trigger,
            "starting promotion"
        );

        let identifier = self.resolve_identifier(request)?;
        let tags = ReleaseTags::from_tags(self.collaborators.tags.list_release_tags()?);
        let lineage = self.gather_versions(&tags, identifier)?;

        let commits = self.gather_commits(branches, &tags)?;
        let fetched = commits.len();
        let categorized = CategorizedCommits::aggregate(commits);
        let increment = categorized.increment();

        if increment == Increment::None {
            warn!(
                "{}",
                BoundaryWarning::NothingToRelease {
                    head: branches.head.clone(),
                    base: branches.base.clone(),
                    commits: fetched,
                }
            );
            return Ok(PromotionOutcome::Skipped {
                latest_release: lineage.latest_release,
                commits: fetched,
            });
        }

        let version = next_version(
            &lineage,
            branches.is_prerelease_target(),
            identifier.unwrap_or_default(),
            increment,
        )?;
        info!(version = %version, increment = %increment, "computed next version");

        let release = self.compose(branches, lineage.latest_release, version, increment, &categorized)?;

        let files = if branches.is_promotion() || request.trigger != RELEASE_TRIGGER {
            Some(self.gather_files(request, &release)?)
        } else {
            None
        };

        let documents = self.collaborators.documents;
        documents.write_document(&self.settings.changelog_path, &release.document)?;
        documents.write_document(&self.settings.artifact_path, &release.section)?;

        match files {
            Some(files) => {
                let pull_request = self.commit_changelog(branches, &release, &files)?;
                Ok(PromotionOutcome::Committed { release, pull_request })
            }
            None => {
                info!(artifact = %self.settings.artifact_path, "release event, skipping pull request");
                Ok(PromotionOutcome::Released(release))
            }
        }
    }

    fn resolve_identifier<'r>(&self, request: &'r PromotionRequest) -> Result<Option<&'r str>> {
        let identifier = request
            .prerelease_identifier
            .as_deref()
            .filter(|id| !id.is_empty());

        if request.branches.is_prerelease_target() && identifier.is_none() {
            return Err(GitPromoteError::config(format!(
                "No prerelease identifier configured for branch '{}'",
                request.branches.base
            )));
        }
        Ok(identifier)
    }

    fn gather_versions(&self, tags: &ReleaseTags, identifier: Option<&str>) -> Result<VersionLineage> {
        match tags.latest_release() {
            Ok(latest) => debug!(version = %latest.version, "latest release"),
            Err(e) if e.is_not_found() => warn!("{}", BoundaryWarning::NoReleaseVersion),
            Err(e) => return Err(e),
        }

        if let Some(identifier) = identifier {
            match tags.latest_prerelease(identifier) {
                Ok(latest) => debug!(version = %latest.version, "latest prerelease"),
                Err(e) if e.is_not_found() => warn!(
                    "{}",
                    BoundaryWarning::NoPrereleaseVersion {
                        identifier: identifier.to_string()
                    }
                ),
                Err(e) => return Err(e),
            }
        }

        Ok(tags.lineage(identifier))
    }

    fn gather_commits(&self, branches: &BranchContext, tags: &ReleaseTags) -> Result<Vec<Commit>> {
        let source = self.collaborators.commits;
        if branches.is_promotion() {
            return source.list_commits_between(&branches.base, &branches.head);
        }

        let since = tags.latest_release().ok().map(|r| r.tag.commit_id.as_str());
        source.list_commits_since(&branches.head, since)
    }

    fn compose(
        &self,
        branches: &BranchContext,
        previous: Option<Version>,
        version: Version,
        increment: Increment,
        categorized: &CategorizedCommits,
    ) -> Result<Release> {
        let section = self
            .composer
            .render_section(previous.as_ref(), &version, categorized, true);
        let existing = self
            .collaborators
            .documents
            .read_document(&self.settings.changelog_path)?;
        let document = self
            .composer
            .compose_document(existing.as_deref(), &section, &version);

        let title = format!("release({}): v{}", branches.base, version);
        let body = release_body(branches, &section);

        Ok(Release {
            previous,
            version,
            increment,
            title,
            body,
            section,
            document,
        })
    }

    /// Files committed on the promotion branch: the changelog, then every
    /// auxiliary file read from the working tree
    fn gather_files(&self, request: &PromotionRequest, release: &Release) -> Result<Vec<FileChange>> {
        let mut files = vec![FileChange::new(
            self.settings.changelog_path.as_str(),
            to_file(&release.document),
        )];
        for path in &request.commit_files {
            if *path == self.settings.changelog_path {
                continue;
            }
            let content = self.collaborators.documents.read_file(path)?;
            files.push(FileChange::new(path.as_str(), content));
        }
        Ok(files)
    }

    fn commit_changelog(&self, branches: &BranchContext, release: &Release, files: &[FileChange]) -> Result<PullRequest> {
        let promotion_branch = branches.promotion_branch(&self.settings.branch_prefix);
        let tip = self.collaborators.commits.branch_head(&branches.head)?;

        info!(branch = %promotion_branch, at = %tip, "committing changelog");
        self.collaborators.branches.ensure_branch(&promotion_branch, &tip)?;
        self.collaborators
            .branches
            .write_files(&promotion_branch, files, &release.title)?;

        self.collaborators.pull_requests.upsert_pull_request(
            &promotion_branch,
            &branches.base,
            &release.title,
            &to_text(&release.body),
            false,
        )
    }
}

/// Pull request body wrapping the latest section
pub fn release_body(branches: &BranchContext, section: &[String]) -> Markdown {
    let header = if branches.targets_release_branch() {
        ":robot: I have created a release *beep* *boop*"
    } else {
        ":robot: I have created a release candidate *beep* *boop*"
    };

    let mut body = vec![
        header.to_string(),
        String::new(),
        "---".to_string(),
        String::new(),
    ];
    body.extend(section.iter().cloned());
    body.extend(["---".to_string(), String::new(), ATTRIBUTION.to_string()]);
    body
}
