use std::fmt;

/// Changelog category a commit is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommitCategory {
    Breaking,
    Feature,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Debug,
    /// Not a conventional commit, or a type with no changelog section
    Uncategorized,
}

impl CommitCategory {
    /// The eleven changelog sections, in the order they are rendered
    pub const SECTIONS: [CommitCategory; 11] = [
        CommitCategory::Breaking,
        CommitCategory::Feature,
        CommitCategory::Fix,
        CommitCategory::Docs,
        CommitCategory::Style,
        CommitCategory::Refactor,
        CommitCategory::Perf,
        CommitCategory::Test,
        CommitCategory::Build,
        CommitCategory::Ci,
        CommitCategory::Debug,
    ];

    /// Categories selected by the commit type token
    pub const TYPED: [CommitCategory; 10] = [
        CommitCategory::Feature,
        CommitCategory::Fix,
        CommitCategory::Docs,
        CommitCategory::Style,
        CommitCategory::Refactor,
        CommitCategory::Perf,
        CommitCategory::Test,
        CommitCategory::Build,
        CommitCategory::Ci,
        CommitCategory::Debug,
    ];

    /// Commit type keyword for this category, if it has one
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            CommitCategory::Feature => Some("feat"),
            CommitCategory::Fix => Some("fix"),
            CommitCategory::Docs => Some("docs"),
            CommitCategory::Style => Some("style"),
            CommitCategory::Refactor => Some("refactor"),
            CommitCategory::Perf => Some("perf"),
            CommitCategory::Test => Some("test"),
            CommitCategory::Build => Some("build"),
            CommitCategory::Ci => Some("ci"),
            CommitCategory::Debug => Some("debug"),
            CommitCategory::Breaking | CommitCategory::Uncategorized => None,
        }
    }

    /// Changelog subheading text
    pub fn title(&self) -> &'static str {
        match self {
            CommitCategory::Breaking => "⚠ BREAKING CHANGES",
            CommitCategory::Feature => "Features",
            CommitCategory::Fix => "Fixes",
            CommitCategory::Docs => "Documentation",
            CommitCategory::Style => "Styles",
            CommitCategory::Refactor => "Refactors",
            CommitCategory::Perf => "Performance",
            CommitCategory::Test => "Test",
            CommitCategory::Build => "Build",
            CommitCategory::Ci => "CI/CD",
            CommitCategory::Debug => "Debugging",
            CommitCategory::Uncategorized => "Uncategorized",
        }
    }

    /// Whether commits in this category appear in the changelog
    pub fn is_section(&self) -> bool {
        !matches!(self, CommitCategory::Uncategorized)
    }
}

impl fmt::Display for CommitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
