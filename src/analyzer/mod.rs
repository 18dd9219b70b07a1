//! Analysis engine: commit aggregation and next-version computation

pub mod aggregator;
pub mod incrementer;

pub use aggregator::{CategorizedCommits, ClassifiedCommit};
pub use incrementer::next_version;
