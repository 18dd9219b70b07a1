use crate::changelog::{to_file, Markdown};
use crate::error::Result;
use crate::git::DocumentStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Documents stored as files under a root directory
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsDocumentStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl DocumentStore for FsDocumentStore {
    fn read_document(&self, path: &str) -> Result<Option<Markdown>> {
        match fs::read_to_string(self.resolve(path)) {
            Ok(content) => Ok(Some(content.lines().map(str::to_string).collect())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, path: &str, lines: &[String]) -> Result<()> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, to_file(lines))?;
        Ok(())
    }

    fn read_file(&self, path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.resolve(path))?)
    }
}
