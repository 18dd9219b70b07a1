//! Step outputs for CI runners
//!
//! When `GITHUB_OUTPUT` names a file, each value is appended to it as a
//! `key=value` line. Without the variable every write is a no-op.

use crate::error::Result;
use std::fs::{File, OpenOptions};
use std::io::Write;
use tracing::debug;

/// Environment variable naming the output file
pub const OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Appends escaped `key=value` lines to the runner's output file
#[derive(Debug)]
pub struct Outputs {
    file: Option<File>,
}

impl Outputs {
    /// Open the file named by `GITHUB_OUTPUT`, if any
    pub fn from_env() -> Result<Self> {
        match std::env::var(OUTPUT_ENV) {
            Ok(path) if !path.is_empty() => Self::open(&path),
            _ => Ok(Outputs { file: None }),
        }
    }

    /// Append to `path`, creating it when missing
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(path, "writing step outputs");
        Ok(Outputs { file: Some(file) })
    }

    /// Outputs that are discarded
    pub fn disabled() -> Self {
        Outputs { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Write one value; `None` writes nothing
    pub fn set(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        let (Some(file), Some(value)) = (self.file.as_mut(), value) else {
            return Ok(());
        };
        writeln!(file, "{}={}", key, escape(value))?;
        Ok(())
    }
}

/// HTML-escape `text`, then percent-encode the characters the runner treats
/// as command syntax.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&#34;"),
            c => escaped.push(c),
        }
    }

    escaped
        .replace('%', "%25")
        .replace('\n', "%0A")
        .replace('\r', "%0D")
        .replace(']', "%5D")
}
