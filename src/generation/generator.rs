//! Project generation - renders a template store into a new project directory

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::core::config::Configuration;
use crate::core::error::{Error, Result};
use crate::core::templates::{RenderedFile, TemplateStore};
use crate::generation::output::FileSystemOutput;

/// Result of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// The project directory that was created
    pub destination: PathBuf,
    /// Every file written, in write order
    pub files: Vec<PathBuf>,
}

/// Renders the entries of a template store and writes them under a destination root
pub struct ProjectGenerator {
    store: Box<dyn TemplateStore>,
}

impl ProjectGenerator {
    pub fn new(store: impl TemplateStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn store(&self) -> &dyn TemplateStore {
        self.store.as_ref()
    }

    /// Render every entry for `config` in memory, without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateIntegrity`] if any entry fails to render.
    pub fn plan(&self, config: &Configuration) -> Result<Vec<RenderedFile>> {
        let entries = self.store.list_entries(config)?;
        debug!(
            store = %self.store.label(),
            entries = entries.len(),
            package_manager = %config.package_manager(),
            "Resolved template entries"
        );

        entries.iter().map(|entry| entry.render(config)).collect()
    }

    /// Fail if anything already exists at `destination`, including a dangling symlink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationConflict`] naming the existing path.
    pub fn check_destination(&self, destination: &Path) -> Result<()> {
        if destination.symlink_metadata().is_ok() {
            return Err(Error::DestinationConflict(destination.to_path_buf()));
        }
        Ok(())
    }

    /// Generate a new project at `destination`.
    ///
    /// Generation is all-or-nothing: every file is rendered before the first
    /// write, and if a write fails the destination directory is removed again.
    ///
    /// # Errors
    ///
    /// - [`Error::DestinationConflict`] if `destination` already exists; nothing is written
    /// - [`Error::TemplateIntegrity`] if rendering fails; nothing is written
    /// - [`Error::WriteFailure`] if an I/O operation fails; partial output is removed
    pub fn generate(
        &self,
        destination: &Path,
        config: &Configuration,
    ) -> Result<GenerationSummary> {
        info!(
            destination = %destination.display(),
            project = %config.project_name(),
            "Generating project"
        );

        self.check_destination(destination)?;

        let rendered = self.plan(config)?;
        let output = FileSystemOutput::create(destination)?;

        match output.write_files(&rendered) {
            Ok(files) => {
                info!(
                    destination = %destination.display(),
                    files = files.len(),
                    "Successfully generated project"
                );
                Ok(GenerationSummary {
                    destination: destination.to_path_buf(),
                    files,
                })
            }
            Err(e) => {
                error!(error = ?e, "Generation failed, removing partial output");
                output.rollback();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PackageManager;
    use crate::core::templates::{EmbeddedTemplateStore, TemplateFile, tokens_in};
    use tempfile::TempDir;

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

    fn config(package_manager: PackageManager) -> Configuration {
        Configuration::builder("my_project")
            .package_manager(package_manager)
            .python_version("3.9")
            .author_name("A")
            .author_email("a@x.com")
            .github_username("au")
            .build()
            .unwrap()
    }

    #[test]
    fn test_plan_matches_list_entries() {
        let generator = ProjectGenerator::new(EmbeddedTemplateStore::new());
        let config = config(PackageManager::Pip);

        let plan = generator.plan(&config).unwrap();
        let entries = generator.store().list_entries(&config).unwrap();

        assert_eq!(plan.len(), entries.len());
        for file in &plan {
            assert!(tokens_in(&file.relative_path.to_string_lossy()).is_empty());
            assert!(tokens_in(&file.contents).is_empty());
        }
    }

    #[test]
    fn test_generate_writes_every_planned_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let destination = temp_dir.path().join("my_project");
        let generator = ProjectGenerator::new(EmbeddedTemplateStore::new());
        let config = config(PackageManager::Uv);

        let summary = generator.generate(&destination, &config).unwrap();

        let plan = generator.plan(&config).unwrap();
        assert_eq!(summary.destination, destination);
        assert_eq!(summary.files.len(), plan.len());
        for file in plan {
            let on_disk = std::fs::read_to_string(destination.join(&file.relative_path)).unwrap();
            assert_eq!(on_disk, file.contents);
        }
    }

    #[test]
    fn test_generate_refuses_existing_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let generator = ProjectGenerator::new(EmbeddedTemplateStore::new());

        let error = generator
            .generate(temp_dir.path(), &config(PackageManager::Pip))
            .unwrap_err();

        assert!(matches!(error, Error::DestinationConflict(_)));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_check_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let generator = ProjectGenerator::new(EmbeddedTemplateStore::new());

        assert!(
            generator
                .check_destination(&temp_dir.path().join("my_project"))
                .is_ok()
        );
        let error = generator.check_destination(temp_dir.path()).unwrap_err();
        assert!(matches!(error, Error::DestinationConflict(_)));
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_integrity_error_writes_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let destination = temp_dir.path().join("my_project");
        let generator = ProjectGenerator::new(MemoryStore(vec![
            file("a.txt", "{{project_name}}"),
            file("b.txt", "{{license}}"),
        ]));

        let error = generator
            .generate(&destination, &config(PackageManager::Pip))
            .unwrap_err();

        assert!(matches!(error, Error::TemplateIntegrity(_)));
        assert!(!destination.exists());
    }

    #[test]
    fn test_write_failure_rolls_back() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let destination = temp_dir.path().join("my_project");
        let generator = ProjectGenerator::new(MemoryStore(vec![
            file("a", "written first"),
            file("a/b", "cannot be written"),
        ]));

        let error = generator
            .generate(&destination, &config(PackageManager::Pip))
            .unwrap_err();

        assert!(matches!(error, Error::WriteFailure { .. }));
        assert!(!destination.exists());
    }
}
