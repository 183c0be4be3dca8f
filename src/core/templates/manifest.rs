//! Manifest file format for Maya template stores.
//!
//! A store may carry a `manifest.yml` at its root. It names the bundle and
//! declares the variant outputs: logical files that exist once per package
//! manager, only one of which ends up in a generated project.
//!
//! ```yaml
//! name: python
//! description: Python project with linting, testing and CI
//! variants:
//!   - output: justfile
//!     sources:
//!       pip: variants/pip/justfile
//!       uv: variants/uv/justfile
//! ```

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::PackageManager;
use crate::core::error::{Error, Result};

/// File name of the manifest at the store root
pub const MANIFEST_FILE: &str = "manifest.yml";

/// The root manifest structure for a template store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// The name of the template bundle
    #[serde(default)]
    pub name: String,

    /// A short description of what the bundle generates
    #[serde(default)]
    pub description: Option<String>,

    /// Outputs that come in one flavor per package manager
    #[serde(default)]
    pub variants: Vec<VariantSpec>,
}

/// A logical output file and its per-package-manager source files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSpec {
    /// Destination path relative to the project root
    pub output: String,

    /// Package manager name to source file path, relative to the store root
    pub sources: BTreeMap<String, String>,
}

/// A variant resolved for one package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedVariant<'a> {
    pub output: &'a str,
    pub source: &'a str,
}

impl TemplateManifest {
    /// Parse and validate manifest YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateIntegrity`] if the YAML is malformed, a variant
    /// names an unknown package manager, or two variants share an output.
    pub fn parse(content: &str) -> Result<Self> {
        debug!(content_length = content.len(), "Parsing template manifest");

        let manifest: Self = serde_yaml::from_str(content)
            .map_err(|e| Error::integrity(format!("invalid {MANIFEST_FILE}: {e}")))?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        let mut outputs = HashSet::new();

        for variant in &self.variants {
            if !outputs.insert(variant.output.as_str()) {
                return Err(Error::integrity(format!(
                    "variant output '{}' is declared more than once",
                    variant.output
                )));
            }

            for key in variant.sources.keys() {
                PackageManager::from_str(key).map_err(|_| {
                    Error::integrity(format!(
                        "variant '{}' has a source for unknown package manager '{key}'",
                        variant.output
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Every file referenced as a variant source, whichever manager it belongs to
    pub fn variant_sources(&self) -> HashSet<&str> {
        self.variants
            .iter()
            .flat_map(|v| v.sources.values().map(String::as_str))
            .collect()
    }

    /// Pick the source of every variant for `package_manager`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateIntegrity`] if a variant has no source for it.
    pub fn select(&self, package_manager: PackageManager) -> Result<Vec<SelectedVariant<'_>>> {
        self.variants
            .iter()
            .map(|variant| {
                variant
                    .sources
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(package_manager.as_str()))
                    .map(|(_, source)| SelectedVariant {
                        output: &variant.output,
                        source,
                    })
                    .ok_or_else(|| {
                        Error::integrity(format!(
                            "variant '{}' has no source for package manager '{package_manager}'",
                            variant.output
                        ))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
name: python
description: Python project
variants:
  - output: justfile
    sources:
      pip: variants/pip/justfile
      uv: variants/uv/justfile
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = TemplateManifest::parse(MANIFEST).unwrap();

        assert_eq!(manifest.name, "python");
        assert_eq!(manifest.description.as_deref(), Some("Python project"));
        assert_eq!(manifest.variants.len(), 1);
        assert_eq!(manifest.variants[0].output, "justfile");
    }

    #[test]
    fn test_select_picks_one_source_per_variant() {
        let manifest = TemplateManifest::parse(MANIFEST).unwrap();

        let pip = manifest.select(PackageManager::Pip).unwrap();
        assert_eq!(
            pip,
            vec![SelectedVariant {
                output: "justfile",
                source: "variants/pip/justfile"
            }]
        );

        let uv = manifest.select(PackageManager::Uv).unwrap();
        assert_eq!(uv[0].source, "variants/uv/justfile");
    }

    #[test]
    fn test_variant_sources_cover_all_managers() {
        let manifest = TemplateManifest::parse(MANIFEST).unwrap();
        let sources = manifest.variant_sources();
        assert!(sources.contains("variants/pip/justfile"));
        assert!(sources.contains("variants/uv/justfile"));
        assert_eq!(sources.len(), 2);
    }

    #[test]
    fn test_select_fails_without_matching_source() {
        let manifest = TemplateManifest::parse(
            "variants:\n  - output: justfile\n    sources:\n      pip: justfile.pip\n",
        )
        .unwrap();

        let error = manifest.select(PackageManager::Uv).unwrap_err();
        assert!(matches!(error, Error::TemplateIntegrity(_)));
        assert!(error.to_string().contains("'uv'"));
    }

    #[test]
    fn test_parse_rejects_unknown_package_manager() {
        let error = TemplateManifest::parse(
            "variants:\n  - output: justfile\n    sources:\n      conda: justfile.conda\n",
        )
        .unwrap_err();
        assert!(error.to_string().contains("conda"));
    }

    #[test]
    fn test_parse_rejects_duplicate_outputs() {
        let error = TemplateManifest::parse(
            "variants:\n  - output: justfile\n    sources: {pip: a}\n  - output: justfile\n    sources: {pip: b}\n",
        )
        .unwrap_err();
        assert!(error.to_string().contains("more than once"));
    }

    #[test]
    fn test_parse_rejects_malformed_yaml() {
        assert!(TemplateManifest::parse("variants: [unclosed").is_err());
    }
}
