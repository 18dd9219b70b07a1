//! Commit classification against the conventional commits grammar
//!
//! Two independent checks are applied to every message: the subject must
//! parse as `type(scope)!: description` (any type token), and the type must
//! match one of the recognized changelog keywords for the commit to land in a
//! section. Breaking changes take precedence over the type.

use crate::domain::{CommitCategory, ParsedCommit};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Compiled once; one pattern per typed category, tested against the subject
static CATEGORY_PATTERNS: Lazy<Vec<(CommitCategory, Regex)>> = Lazy::new(|| {
    CommitCategory::TYPED
        .iter()
        .filter_map(|category| {
            let keyword = category.keyword()?;
            let pattern = format!(r"^{}(\([^()\r\n]*\))?!?:\s", regex::escape(keyword));
            Regex::new(&pattern).ok().map(|re| (*category, re))
        })
        .collect()
});

/// Outcome of classifying one commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: CommitCategory,
    pub breaking: bool,
    /// Subject description with the type prefix removed
    pub description: String,
    /// Every line after the subject, blank lines included
    pub body_lines: Vec<String>,
}

impl Classification {
    fn uncategorized(message: &str) -> Self {
        Classification {
            category: CommitCategory::Uncategorized,
            breaking: false,
            description: message.trim().lines().next().unwrap_or_default().to_string(),
            body_lines: Vec::new(),
        }
    }
}

/// Classify a full commit message.
///
/// Messages that do not parse come back as `Uncategorized`; callers drop them
/// from the changelog without reporting an error.
pub fn classify(message: &str) -> Classification {
    let Some(parsed) = ParsedCommit::parse(message) else {
        debug!(subject = %first_line(message), "not a conventional commit");
        return Classification::uncategorized(message);
    };

    let trimmed = message.trim();
    let subject = first_line(trimmed);
    let body_lines = trimmed
        .lines()
        .skip(1)
        .map(|line| line.to_string())
        .collect();

    let category = if parsed.is_breaking_change {
        CommitCategory::Breaking
    } else {
        category_for_subject(subject)
    };

    Classification {
        category,
        breaking: parsed.is_breaking_change,
        description: parsed.description,
        body_lines,
    }
}

/// Section selected by the subject's type keyword alone
pub fn category_for_subject(subject: &str) -> CommitCategory {
    CATEGORY_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(subject))
        .map(|(category, _)| *category)
        .unwrap_or(CommitCategory::Uncategorized)
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}
