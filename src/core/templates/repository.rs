//! Domain definitions for template stores
//!
//! A template store owns the raw files of one template bundle. Stores differ
//! only in where the files come from (the binary itself, a directory); turning
//! raw files into the entries to render for a configuration is shared by all of
//! them through [`TemplateStore::entries_for`].
//!
//! # Core Concepts
//!
//! - **Template File**: a raw file of the bundle, including the manifest and
//!   every variant source
//! - **Template Entry**: a file to render, with variants already resolved
//! - **Manifest**: optional `manifest.yml` declaring the variants

use std::collections::HashMap;

use crate::core::config::{Configuration, PackageManager};
use crate::core::error::{Error, Result};
use crate::core::templates::manifest::{MANIFEST_FILE, TemplateManifest};
use crate::core::templates::types::{TemplateEntry, TemplateFile};

/// Trait for accessing a template bundle from various sources.
///
/// Implementors provide [`files`](TemplateStore::files); everything else has a
/// default implementation on top of it.
pub trait TemplateStore {
    /// Short label for logs and listings (e.g. `embedded`, a directory path)
    fn label(&self) -> String;

    /// All raw files of the bundle with `/`-separated relative paths.
    fn files(&self) -> Result<Vec<TemplateFile>>;

    /// Load the manifest, or an empty one if the bundle has none.
    fn manifest(&self) -> Result<TemplateManifest> {
        let files = self.files()?;
        load_manifest(&files)
    }

    /// Entries to render for `package_manager`, sorted by relative path.
    fn entries_for(&self, package_manager: PackageManager) -> Result<Vec<TemplateEntry>> {
        resolve_entries(self.files()?, package_manager)
    }

    /// Entries to render for `config`.
    ///
    /// Deterministic: the same configuration always yields the same ordered set.
    fn list_entries(&self, config: &Configuration) -> Result<Vec<TemplateEntry>> {
        self.entries_for(config.package_manager())
    }
}

impl<T: TemplateStore + ?Sized> TemplateStore for Box<T> {
    fn label(&self) -> String {
        (**self).label()
    }

    fn files(&self) -> Result<Vec<TemplateFile>> {
        (**self).files()
    }
}

fn load_manifest(files: &[TemplateFile]) -> Result<TemplateManifest> {
    match files.iter().find(|f| f.relative_path == MANIFEST_FILE) {
        Some(file) => TemplateManifest::parse(&decode(file)?),
        None => Ok(TemplateManifest::default()),
    }
}

fn decode(file: &TemplateFile) -> Result<String> {
    String::from_utf8(file.contents.clone()).map_err(|_| {
        Error::integrity(format!(
            "template '{}' is not valid UTF-8 text",
            file.relative_path
        ))
    })
}

/// Split raw files into plain entries and the selected variant of each variant output.
fn resolve_entries(
    files: Vec<TemplateFile>,
    package_manager: PackageManager,
) -> Result<Vec<TemplateEntry>> {
    let manifest = load_manifest(&files)?;
    let variant_sources = manifest.variant_sources();
    let by_path: HashMap<&str, &TemplateFile> = files
        .iter()
        .map(|f| (f.relative_path.as_str(), f))
        .collect();

    let mut entries = Vec::with_capacity(files.len());
    for file in &files {
        let path = file.relative_path.as_str();
        if path == MANIFEST_FILE || variant_sources.contains(path) {
            continue;
        }
        entries.push(TemplateEntry {
            relative_path: file.relative_path.clone(),
            contents: decode(file)?,
            variant: None,
        });
    }

    for selected in manifest.select(package_manager)? {
        if by_path.contains_key(selected.output) {
            return Err(Error::integrity(format!(
                "variant output '{}' collides with a plain template of the same path",
                selected.output
            )));
        }

        let source = by_path.get(selected.source).ok_or_else(|| {
            Error::integrity(format!(
                "variant source '{}' for '{}' is missing from the bundle",
                selected.source, selected.output
            ))
        })?;

        entries.push(TemplateEntry {
            relative_path: selected.output.to_string(),
            contents: decode(source)?,
            variant: Some(package_manager),
        });
    }

    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MemoryStore(Vec<TemplateFile>);

    impl TemplateStore for MemoryStore {
        fn label(&self) -> String {
            "memory".to_string()
        }

        fn files(&self) -> Result<Vec<TemplateFile>> {
            Ok(self.0.clone())
        }
    }

    fn file(path: &str, contents: &str) -> TemplateFile {
        TemplateFile {
            relative_path: path.to_string(),
            contents: contents.as_bytes().to_vec(),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore(vec![
            file("pyproject.toml", "name = \"{{project_name}}\""),
            file(
                MANIFEST_FILE,
                "variants:\n  - output: justfile\n    sources:\n      pip: variants/pip/justfile\n      uv: variants/uv/justfile\n",
            ),
            file("variants/pip/justfile", "install:\n    pip install -e ."),
            file("variants/uv/justfile", "install:\n    uv pip install -e ."),
            file("README.md", "# {{project_name}}"),
        ])
    }

    #[test]
    fn test_entries_resolve_variants() {
        let entries = store().entries_for(PackageManager::Uv).unwrap();
        let paths: Vec<&str> = entries.iter().map(|e| e.relative_path.as_str()).collect();

        assert_eq!(paths, vec!["README.md", "justfile", "pyproject.toml"]);

        let justfile = entries.iter().find(|e| e.relative_path == "justfile").unwrap();
        assert_eq!(justfile.variant, Some(PackageManager::Uv));
        assert!(justfile.contents.contains("uv pip install"));
    }

    #[test]
    fn test_entries_are_deterministic() {
        let store = store();
        assert_eq!(
            store.entries_for(PackageManager::Pip).unwrap(),
            store.entries_for(PackageManager::Pip).unwrap()
        );
    }

    #[test]
    fn test_list_entries_uses_config_package_manager() {
        let config = Configuration::builder("demo").build().unwrap();
        let entries = store().list_entries(&config).unwrap();
        let justfile = entries.iter().find(|e| e.relative_path == "justfile").unwrap();
        assert_eq!(justfile.variant, Some(PackageManager::Pip));
        assert!(!justfile.contents.contains("uv"));
    }

    #[test]
    fn test_store_without_manifest_has_no_variants() {
        let store = MemoryStore(vec![file("a.txt", "a"), file("b/c.txt", "c")]);
        let entries = store.entries_for(PackageManager::Pip).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.variant.is_none()));
        assert_eq!(store.manifest().unwrap(), TemplateManifest::default());
    }

    #[test]
    fn test_missing_variant_source_is_integrity_error() {
        let store = MemoryStore(vec![file(
            MANIFEST_FILE,
            "variants:\n  - output: justfile\n    sources:\n      pip: gone/justfile\n      uv: gone/justfile\n",
        )]);
        let error = store.entries_for(PackageManager::Pip).unwrap_err();
        assert!(matches!(error, Error::TemplateIntegrity(_)));
        assert!(error.to_string().contains("gone/justfile"));
    }

    #[test]
    fn test_variant_colliding_with_plain_file_is_integrity_error() {
        let mut files = store().0;
        files.push(file("justfile", "plain"));
        let error = MemoryStore(files)
            .entries_for(PackageManager::Pip)
            .unwrap_err();
        assert!(error.to_string().contains("collides"));
    }

    #[test]
    fn test_non_utf8_template_is_integrity_error() {
        let store = MemoryStore(vec![TemplateFile {
            relative_path: "logo.png".to_string(),
            contents: vec![0xff, 0xfe, 0x00],
        }]);
        let error = store.entries_for(PackageManager::Pip).unwrap_err();
        assert!(error.to_string().contains("logo.png"));
    }
}
