//! Template value types.

use std::path::{Component, Path, PathBuf};

use crate::core::config::{Configuration, PackageManager};
use crate::core::error::{Error, Result};
use crate::core::templates::placeholder::substitute;

/// Represents a single raw file within a template store.
///
/// `relative_path` always uses `/` separators regardless of platform, so stores
/// backed by the binary and by a directory produce identical paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the store root, e.g. `src/{{project_name}}/main.py`
    pub relative_path: String,

    /// The raw contents of the file
    pub contents: Vec<u8>,
}

/// One file to render for a given configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Output path relative to the destination root, still containing placeholders
    pub relative_path: String,

    /// Text with embedded placeholders
    pub contents: String,

    /// Package manager this entry was selected for, if it is a variant
    pub variant: Option<PackageManager>,
}

/// A template entry with every placeholder substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Output path relative to the destination root
    pub relative_path: PathBuf,
    pub contents: String,
}

impl TemplateEntry {
    /// Substitute placeholders in both the path and the contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateIntegrity`] on unknown placeholders or when the
    /// rendered path would escape the destination root.
    pub fn render(&self, config: &Configuration) -> Result<RenderedFile> {
        let path = substitute(&self.relative_path, config, &self.relative_path)?;
        let relative_path = safe_relative_path(&path)?;
        let contents = substitute(&self.contents, config, &self.relative_path)?;

        Ok(RenderedFile {
            relative_path,
            contents,
        })
    }
}

/// Turn a `/`-separated template path into a path that stays inside its root.
fn safe_relative_path(path: &str) -> Result<PathBuf> {
    let mut out = PathBuf::new();

    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => {
                return Err(Error::integrity(format!(
                    "template path '{path}' escapes the destination directory"
                )));
            }
        }
    }

    if out.as_os_str().is_empty() {
        return Err(Error::integrity(format!("template path '{path}' is empty")));
    }

    Ok(out)
}
