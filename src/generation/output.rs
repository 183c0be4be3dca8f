//! Filesystem output for rendered projects
//!
//! Writes go through [`FileSystemOutput`], which claims the destination root
//! first and removes it again if any later write fails, so a failed run leaves
//! nothing behind.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::error::{Error, Result};
use crate::core::templates::RenderedFile;

/// Writes rendered files under a destination root that it creates itself
#[derive(Debug)]
pub struct FileSystemOutput {
    root: PathBuf,
}

impl FileSystemOutput {
    /// Create the destination root.
    ///
    /// Missing parent directories are created; the root itself must not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationConflict`] if `root` already exists and
    /// [`Error::WriteFailure`] for any other I/O error.
    pub fn create(root: &Path) -> Result<Self> {
        if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
        }

        fs::create_dir(root).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::DestinationConflict(root.to_path_buf()),
            _ => Error::write(root, e),
        })?;

        debug!(path = %root.display(), "Created destination directory");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every file in order, stopping at the first failure.
    ///
    /// Returns the written paths, each joined onto the root.
    pub fn write_files(&self, files: &[RenderedFile]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(files.len());

        for file in files {
            let path = self.root.join(&file.relative_path);

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
            }

            let mut handle = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .map_err(|e| Error::write(&path, e))?;
            handle
                .write_all(file.contents.as_bytes())
                .map_err(|e| Error::write(&path, e))?;
            handle.flush().map_err(|e| Error::write(&path, e))?;

            debug!(path = %path.display(), bytes = file.contents.len(), "Wrote file");
            written.push(path);
        }

        Ok(written)
    }

    /// Remove the destination root and everything written under it.
    pub fn rollback(self) {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => debug!(path = %self.root.display(), "Removed partial output"),
            Err(e) => warn!(
                path = %self.root.display(),
                error = %e,
                "Failed to remove partial output"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rendered(path: &str, contents: &str) -> RenderedFile {
        RenderedFile {
            relative_path: PathBuf::from(path),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn test_create_refuses_existing_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let error = FileSystemOutput::create(temp_dir.path()).unwrap_err();
        assert!(matches!(error, Error::DestinationConflict(_)));
    }

    #[test]
    fn test_create_makes_missing_parents() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("deeply/nested/project");

        let output = FileSystemOutput::create(&root).unwrap();

        assert!(output.root().is_dir());
    }

    #[test]
    fn test_write_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = FileSystemOutput::create(&temp_dir.path().join("demo")).unwrap();

        let written = output
            .write_files(&[
                rendered("src/demo/main.py", "print('hi')\n"),
                rendered("pyproject.toml", "[project]\nname = \"demo\"\n"),
            ])
            .unwrap();

        assert_eq!(written.len(), 2);
        let main = std::fs::read_to_string(temp_dir.path().join("demo/src/demo/main.py"))
            .expect("Failed to read main.py");
        assert_eq!(main, "print('hi')\n");
    }

    #[test]
    fn test_write_files_stops_at_first_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = FileSystemOutput::create(&temp_dir.path().join("demo")).unwrap();

        // "a" is written as a file, so "a/b" cannot get its parent directory
        let error = output
            .write_files(&[rendered("a", "file"), rendered("a/b", "nested")])
            .unwrap_err();

        match error {
            Error::WriteFailure { path, .. } => assert!(path.ends_with("a")),
            other => panic!("expected write failure, got {other:?}"),
        }
    }

    #[test]
    fn test_rollback_removes_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("demo");
        let output = FileSystemOutput::create(&root).unwrap();
        output.write_files(&[rendered("x/y.txt", "y")]).unwrap();

        output.rollback();

        assert!(!root.exists());
        assert!(temp_dir.path().exists());
    }
}
