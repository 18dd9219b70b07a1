//! Orchestration of a promotion run and the pull requests it maintains

pub mod extract;
pub mod handler;
pub mod pull_request;

pub use extract::{latest_conventional_commit, ExtractedCommit};
pub use handler::{
    release_body, Collaborators, PromotionHandler, PromotionOutcome, PromotionRequest, PromotionSettings, Release,
    RELEASE_TRIGGER,
};
pub use pull_request::PullRequestHandler;
