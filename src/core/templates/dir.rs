//! Filesystem-based template store
//!
//! Loads a template bundle from a directory on the filesystem, typically given
//! with `--template-dir`. The directory uses the same layout as the embedded
//! bundle, so `maya templates export` output works unchanged as a starting point.

use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use crate::core::error::{Error, Result};
use crate::core::templates::repository::TemplateStore;
use crate::core::templates::types::TemplateFile;

/// Template store backed by a directory tree
#[derive(Debug, Clone)]
pub struct DirectoryTemplateStore {
    root: PathBuf,
}

impl DirectoryTemplateStore {
    /// Open the bundle rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateNotFound`] if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::TemplateNotFound(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn label(&self) -> String {
        self.root.display().to_string()
    }

    fn files(&self) -> Result<Vec<TemplateFile>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                Error::TemplateNotFound(format!("cannot read {}: {e}", self.root.display()))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&self.root).map_err(|_| {
                Error::TemplateNotFound(format!(
                    "{} is outside {}",
                    entry.path().display(),
                    self.root.display()
                ))
            })?;
            let relative_path = relative
                .components()
                .map(|c| {
                    c.as_os_str().to_str().ok_or_else(|| {
                        Error::integrity(format!(
                            "template file name {} is not valid UTF-8",
                            entry.path().display()
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?
                .join("/");

            let contents = std::fs::read(entry.path()).map_err(|e| {
                Error::TemplateNotFound(format!("cannot read {}: {e}", entry.path().display()))
            })?;

            debug!(file = %relative_path, "Loaded template file");
            files.push(TemplateFile {
                relative_path,
                contents,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }
}
