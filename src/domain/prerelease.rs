//! Prerelease lineage state: `<identifier>.<number>`
//!
//! Each promotion stage owns an identifier (e.g. `drc`, `src`) and a sequence
//! number that restarts whenever the release target changes.

use crate::error::{GitPromoteError, Result};
use std::fmt;

/// Prerelease identifier with its sequence number
///
/// # Examples
/// - "rc.0" -> PreRelease { identifier: "rc", number: 0 }
/// - "drc.12" -> PreRelease { identifier: "drc", number: 12 }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    pub identifier: String,
    pub number: u64,
}

impl PreRelease {
    /// Create a new prerelease
    pub fn new(identifier: impl Into<String>, number: u64) -> Self {
        PreRelease {
            identifier: identifier.into(),
            number,
        }
    }

    /// Parse a prerelease string such as "beta.1".
    ///
    /// Fails with `InvalidPrereleaseState` when the identifier is empty or the
    /// second field is missing or not an integer.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split('.');
        let identifier = parts.next().unwrap_or_default();
        if identifier.is_empty() {
            return Err(GitPromoteError::invalid_prerelease(
                s,
                "empty prerelease identifier",
            ));
        }

        let number = match parts.next() {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                GitPromoteError::invalid_prerelease(s, format!("sequence '{}': {}", raw, e))
            })?,
            None => {
                return Err(GitPromoteError::invalid_prerelease(
                    s,
                    "missing prerelease sequence number",
                ))
            }
        };

        Ok(PreRelease {
            identifier: identifier.to_string(),
            number,
        })
    }

    /// Identifier portion of a raw prerelease string ("drc.3" -> "drc")
    pub fn identifier_of(s: &str) -> &str {
        s.split('.').next().unwrap_or_default()
    }

    /// Next number in the same lane
    pub fn increment(&self) -> Self {
        PreRelease {
            identifier: self.identifier.clone(),
            number: self.number + 1,
        }
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.identifier, self.number)
    }
}
