//! Embedded template bundle for binary distribution.
//!
//! The `templates/python/` directory is compiled into the binary with
//! `rust-embed`, so `maya init` works right after `cargo install` and the
//! templates always match the CLI version. The bundle is a process-wide
//! constant; [`EmbeddedTemplateStore`] is a zero-sized handle to it.

use std::io;
use std::path::Path;

use rust_embed::RustEmbed;
use tracing::{debug, info};

use crate::core::error::Result;
use crate::core::templates::repository::TemplateStore;
use crate::core::templates::types::TemplateFile;

/// Container for all templates embedded at compile time.
#[derive(RustEmbed)]
#[folder = "templates/python/"]
struct EmbeddedTemplates;

/// Implementation of `TemplateStore` that reads from embedded resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateStore;

impl EmbeddedTemplateStore {
    pub fn new() -> Self {
        Self
    }

    /// Write the raw bundle (manifest and every variant source included) to
    /// `output_dir`, preserving its layout.
    ///
    /// Returns the number of files written.
    pub fn export(&self, output_dir: &Path) -> io::Result<usize> {
        info!(output_dir = %output_dir.display(), "Exporting embedded templates");

        let mut count = 0;
        for file in embedded_files() {
            let file_path = output_dir.join(&file.relative_path);
            if let Some(parent) = file_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&file_path, &file.contents)?;
            debug!(file = %file_path.display(), "Exported template file");
            count += 1;
        }

        Ok(count)
    }
}

impl TemplateStore for EmbeddedTemplateStore {
    fn label(&self) -> String {
        "embedded".to_string()
    }

    fn files(&self) -> Result<Vec<TemplateFile>> {
        Ok(embedded_files())
    }
}

fn embedded_files() -> Vec<TemplateFile> {
    let mut files: Vec<TemplateFile> = EmbeddedTemplates::iter()
        .filter_map(|path| {
            EmbeddedTemplates::get(&path).map(|file| TemplateFile {
                relative_path: path.replace('\\', "/"),
                contents: file.data.into_owned(),
            })
        })
        .collect();
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    files
}
