//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod category;
pub mod commit;
pub mod prerelease;
pub mod repository;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use category::CommitCategory;
pub use commit::{Commit, ParsedCommit};
pub use prerelease::PreRelease;
pub use repository::RepositoryMetadata;
pub use tag::{ReleaseTag, ReleaseTags, TagRef, VersionLineage};
pub use version::{Increment, Version};
