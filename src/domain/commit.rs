use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Subject line grammar: `type(scope)!: description`
static SUBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9_-]*)(?:\(([^()\r\n]*)\))?(!)?:\s+(\S.*)$")
        .expect("subject pattern is valid")
});

/// Footer line: `Token: value` or `Token #value`
static FOOTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(BREAKING CHANGE|BREAKING-CHANGE|[A-Za-z][A-Za-z0-9-]*)(?:: | #)(.*)$")
        .expect("footer pattern is valid")
});

const BREAKING_MARKERS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

/// A commit as read from the version-control service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full commit hash
    pub id: String,
    /// Subject, optional body and optional footers
    pub message: String,
    /// Authorship time
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    /// Create a new commit record
    pub fn new(id: impl Into<String>, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Commit {
            id: id.into(),
            message: message.into(),
            timestamp,
        }
    }

    /// First seven characters of the hash
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(7) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }

    /// First line of the message
    pub fn subject(&self) -> &str {
        self.message.trim().lines().next().unwrap_or_default()
    }
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    /// `!` directly before the colon
    pub exclamation: bool,
    pub is_breaking_change: bool,
    pub body: Option<String>,
    /// Footer tokens with their values, in first-seen order
    pub footers: Vec<(String, Vec<String>)>,
}

impl ParsedCommit {
    /// Parse a commit message according to the conventional commits grammar.
    ///
    /// Returns `None` when the subject line does not have the
    /// `type(scope)!: description` shape. Any type token is accepted.
    pub fn parse(message: &str) -> Option<Self> {
        let message = message.trim();
        let mut lines = message.lines();
        let subject = lines.next()?;
        let captures = SUBJECT_RE.captures(subject.trim_end())?;

        let r#type = captures.get(1)?.as_str().to_string();
        let scope = captures
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());
        let exclamation = captures.get(3).is_some();
        let description = captures.get(4)?.as_str().trim().to_string();

        let rest: Vec<&str> = lines.collect();
        let (body, footers) = split_body_and_footers(&rest);

        let is_breaking_change = exclamation || has_breaking_marker(&rest);

        Some(ParsedCommit {
            r#type,
            scope,
            description,
            exclamation,
            is_breaking_change,
            body,
            footers,
        })
    }

    /// Footers rendered as `key=v1, v2; key2=v3`
    pub fn joined_footers(&self) -> Option<String> {
        if self.footers.is_empty() {
            return None;
        }
        let joined = self
            .footers
            .iter()
            .map(|(key, values)| format!("{}={}", key, values.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");
        Some(joined)
    }
}

/// Whether any line after the subject opens with a breaking-change footer
pub fn has_breaking_marker(lines: &[&str]) -> bool {
    lines
        .iter()
        .any(|line| BREAKING_MARKERS.iter().any(|marker| line.starts_with(marker)))
}

/// Footers are the trailing paragraph when its first line is a footer token.
fn split_body_and_footers(rest: &[&str]) -> (Option<String>, Vec<(String, Vec<String>)>) {
    let last_paragraph_start = rest
        .iter()
        .rposition(|line| line.trim().is_empty())
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let trailing = &rest[last_paragraph_start..];
    let has_footers = trailing
        .first()
        .map(|line| FOOTER_RE.is_match(line))
        .unwrap_or(false);

    let (body_lines, footer_lines) = if has_footers {
        (&rest[..last_paragraph_start], trailing)
    } else {
        (rest, &rest[rest.len()..])
    };

    let mut footers: Vec<(String, Vec<String>)> = Vec::new();
    let mut last_key: Option<usize> = None;
    for line in footer_lines {
        if let Some(captures) = FOOTER_RE.captures(line) {
            let key = captures[1].to_string();
            let value = captures[2].trim().to_string();
            let idx = match footers.iter().position(|(k, _)| *k == key) {
                Some(idx) => {
                    footers[idx].1.push(value);
                    idx
                }
                None => {
                    footers.push((key, vec![value]));
                    footers.len() - 1
                }
            };
            last_key = Some(idx);
        } else if let Some(idx) = last_key {
            // continuation of the previous footer value
            if let Some(value) = footers[idx].1.last_mut() {
                value.push('\n');
                value.push_str(line);
            }
        }
    }

    let body = body_lines.join("\n").trim().to_string();
    let body = if body.is_empty() { None } else { Some(body) };

    (body, footers)
}
