//! Maya library
//!
//! Scaffolds Python projects with linting, testing and CI configured, from a
//! template bundle embedded in the binary or read from a directory.
//!
//! ```no_run
//! use maya::{Configuration, EmbeddedTemplateStore, PackageManager, ProjectGenerator};
//! use std::path::Path;
//!
//! let config = Configuration::builder("my_project")
//!     .package_manager(PackageManager::Uv)
//!     .build()?;
//! let generator = ProjectGenerator::new(EmbeddedTemplateStore::new());
//! generator.generate(Path::new("my_project"), &config)?;
//! # Ok::<(), maya::Error>(())
//! ```
#![deny(unsafe_code)]

pub mod core;
pub mod generation;

pub use crate::core::config::{Configuration, ConfigurationBuilder, PackageManager};
pub use crate::core::error::{Error, Result};
pub use crate::core::templates::{DirectoryTemplateStore, EmbeddedTemplateStore, TemplateStore};
pub use crate::generation::{GenerationSummary, ProjectGenerator};
