use anyhow::Result;
use clap::{Parser, Subcommand};

use git_promote::cli::{self, ExtractArgs, LocalBackend, PullRequestArgs, VersionArgs};
use git_promote::config;
use git_promote::output::Outputs;
use git_promote::ui;

#[derive(Parser)]
#[command(
    name = "git-promote",
    version,
    about = "Version, changelog and release pull requests from conventional commits"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, global = true, default_value = ".", help = "Path inside the git repository")]
    repo: String,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the next version and open the release pull request
    Version {
        #[arg(long, help = "Branch whose commits are promoted")]
        head: String,

        #[arg(long, help = "Branch receiving the release")]
        base: String,

        #[arg(long, help = "Prerelease identifier for the target branch")]
        prerelease: Option<String>,

        #[arg(long, help = "Stable branch carrying plain releases")]
        release_branch: Option<String>,

        #[arg(long, default_value = "push", help = "Event that started the run")]
        trigger: String,

        #[arg(long = "commit-file", help = "Extra file committed with the changelog")]
        commit_files: Vec<String>,
    },

    /// Create or refresh the draft pull request of a working branch
    PullRequest {
        #[arg(long)]
        head: String,

        #[arg(long)]
        base: String,
    },

    /// Report the newest conventional commit on a branch
    Extract {
        #[arg(long)]
        branch: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let backend = LocalBackend::open(&args.repo, &config)?;
    let mut outputs = Outputs::from_env()?;

    match args.command {
        Command::Version {
            head,
            base,
            prerelease,
            release_branch,
            trigger,
            commit_files,
        } => {
            let version_args = VersionArgs {
                head,
                base,
                prerelease,
                release_branch,
                trigger,
                commit_files,
            };
            let outcome = cli::run_version(&version_args, &config, &backend, &mut outputs)?;
            if let Some(release) = outcome.release() {
                println!("v{}", release.version);
            }
        }
        Command::PullRequest { head, base } => {
            let pull_request = cli::run_pull_request(&PullRequestArgs { head, base }, &config, &backend)?;
            println!("{}", pull_request.number);
        }
        Command::Extract { branch } => {
            if let Some(extracted) = cli::run_extract(&ExtractArgs { branch }, &backend, &mut outputs)? {
                for (key, value) in extracted.fields() {
                    if let Some(value) = value {
                        println!("{}={}", key, value);
                    }
                }
            }
        }
    }

    Ok(())
}
