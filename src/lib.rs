pub mod analyzer;
pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod output;
pub mod promotion;
pub mod ui;

pub use error::{GitPromoteError, Result};
